//! Carousel controller
//!
//! Orchestrates navigation requests from gestures, the public API and
//! viewport resizes. All deferred work goes through single-slot timers that
//! the embedder drives by calling [`Carousel::poll`].

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, trace};

use crate::clock::{Clock, SystemClock};
use crate::config::{CarouselConfig, GestureThresholds, TimingConfig};
use crate::error::Result;
use crate::gesture::{
    resist, FinishedGesture, GestureDecision, GestureTracker, InputEvent, InputKind, MoveOutcome,
};
use crate::layout::SlideLayout;
use crate::subscriber::{SlideChangeSubscriber, SubscriberList};
use crate::surface::SlideSurface;
use crate::timer::TimerSlot;

/// Optional arguments of a navigation call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlideOptions {
    /// Transition duration; the configured speed when `None`
    pub speed_ms: Option<u32>,
    /// Use plain index order instead of the slide's on-screen side
    pub ignore_wrap: bool,
}

impl SlideOptions {
    pub fn with_speed(speed_ms: u32) -> Self {
        Self {
            speed_ms: Some(speed_ms),
            ..Default::default()
        }
    }
}

/// How the embedder should treat the input event it just delivered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputResponse {
    /// The event is a horizontal drag; native scrolling must not run
    pub suppress_default: bool,
}

/// Read-only view of the carousel state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarouselSnapshot {
    pub index: usize,
    pub original_index: usize,
    pub width: f32,
    pub continuous: bool,
    pub offsets: Vec<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Side the outgoing slide leaves towards
    fn factor(self) -> isize {
        match self {
            Direction::Forward => -1,
            Direction::Backward => 1,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingReset {
    index: isize,
    offset: f32,
}

#[derive(Debug, Clone, Copy)]
struct SlideRequest {
    destination: isize,
    options: SlideOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum TimerKind {
    Reset,
    Resize,
    Notify,
    Retry,
}

/// A horizontally scrolling slide carousel
pub struct Carousel<S> {
    layout: SlideLayout<S>,
    tracker: GestureTracker,
    clock: Arc<dyn Clock>,
    index: usize,
    continuous: bool,
    speed_ms: u32,
    thresholds: GestureThresholds,
    timing: TimingConfig,
    reset_timer: TimerSlot<PendingReset>,
    resize_timer: TimerSlot<()>,
    notify_timer: TimerSlot<u32>,
    retry_timer: TimerSlot<SlideRequest>,
    subscribers: SubscriberList,
}

impl<S: SlideSurface> Carousel<S> {
    /// Build a carousel over the surface's slides using the system clock
    pub fn new(surface: S, config: CarouselConfig) -> Result<Self> {
        Self::with_clock(surface, config, Arc::new(SystemClock::new()))
    }

    /// Build a carousel with an explicit time source
    pub fn with_clock(surface: S, config: CarouselConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        config.validate()?;

        let layout = SlideLayout::new(surface, config.continuous)?;
        let continuous = config.continuous && layout.len() >= 2;
        let index = layout.wrap_index(config.start_slide);

        let mut carousel = Self {
            layout,
            tracker: GestureTracker::new(),
            clock,
            index,
            continuous,
            speed_ms: config.speed_ms,
            thresholds: config.gesture,
            timing: config.timing,
            reset_timer: TimerSlot::new(),
            resize_timer: TimerSlot::new(),
            notify_timer: TimerSlot::new(),
            retry_timer: TimerSlot::new(),
            subscribers: SubscriberList::default(),
        };

        carousel.relayout();
        carousel.layout.surface_mut().reveal();

        debug!(
            "Carousel ready: {} slides ({} original), continuous={}, start={}",
            carousel.layout.len(),
            carousel.layout.slides().original_count(),
            carousel.continuous,
            carousel.index
        );
        Ok(carousel)
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Current index mapped back onto the slides supplied at construction
    pub fn original_index(&self) -> usize {
        self.index % self.layout.slides().original_count()
    }

    /// Number of slides including clones
    pub fn slide_count(&self) -> usize {
        self.layout.len()
    }

    pub fn original_count(&self) -> usize {
        self.layout.slides().original_count()
    }

    pub fn is_continuous(&self) -> bool {
        self.continuous
    }

    pub fn speed_ms(&self) -> u32 {
        self.speed_ms
    }

    pub fn width(&self) -> f32 {
        self.layout.width()
    }

    pub fn offsets(&self) -> Vec<f32> {
        self.layout.offsets()
    }

    pub fn layout(&self) -> &SlideLayout<S> {
        &self.layout
    }

    pub fn surface(&self) -> &S {
        self.layout.surface()
    }

    pub fn surface_mut(&mut self) -> &mut S {
        self.layout.surface_mut()
    }

    /// A touch session is open
    pub fn gesture_active(&self) -> bool {
        self.tracker.is_active()
    }

    /// A navigation is waiting to be re-issued or to be announced
    pub fn is_transitioning(&self) -> bool {
        self.retry_timer.is_pending() || self.notify_timer.is_pending()
    }

    pub fn has_pending_reset(&self) -> bool {
        self.reset_timer.is_pending()
    }

    /// Earliest deadline among the pending timers
    pub fn next_deadline(&self) -> Option<u64> {
        [
            self.reset_timer.deadline(),
            self.resize_timer.deadline(),
            self.notify_timer.deadline(),
            self.retry_timer.deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    pub fn snapshot(&self) -> CarouselSnapshot {
        CarouselSnapshot {
            index: self.index,
            original_index: self.original_index(),
            width: self.layout.width(),
            continuous: self.continuous,
            offsets: self.layout.offsets(),
        }
    }

    /// Register a subscriber for "slide changed" notifications
    pub fn add_subscriber(&self, subscriber: &Arc<dyn SlideChangeSubscriber>) {
        self.subscribers.add(subscriber);
    }

    /// Number of subscribers still alive
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Go to the previous slide; no-op at the first slide unless continuous
    pub fn prev(&mut self) {
        if self.continuous || self.index > 0 {
            self.slide(self.index as isize - 1);
        }
    }

    /// Go to the next slide; no-op at the last slide unless continuous
    pub fn next(&mut self) {
        if self.continuous || self.index + 1 < self.layout.len() {
            self.slide(self.index as isize + 1);
        }
    }

    /// Navigate to `destination` at the configured speed
    pub fn slide(&mut self, destination: isize) {
        self.slide_with(destination, SlideOptions::default());
    }

    /// Navigate to `destination`
    ///
    /// The destination is a logical position: in continuous mode values
    /// outside `[0, N)` are legal and wrap.
    pub fn slide_with(&mut self, destination: isize, options: SlideOptions) {
        if self.index as isize == destination {
            return;
        }

        if self.tracker.is_active() {
            trace!("Gesture in progress, deferring slide to {}", destination);
            self.defer_slide(destination, options);
            return;
        }

        let mut needs_delay = false;
        if self.reset_timer.is_pending() {
            self.fire_reset();
            needs_delay = true;
        }

        let n = self.layout.len() as isize;
        let width = self.layout.width();

        if self.continuous && options.ignore_wrap {
            let seed = if destination == 0 && self.offset(0) > 0.0 {
                Some(-width)
            } else if destination == n - 1 && self.offset(destination) < 0.0 {
                Some(width)
            } else {
                None
            };
            if let Some(distance) = seed {
                self.layout.set_offset(destination, distance, 0);
                needs_delay = true;
            }
        }

        if needs_delay {
            self.defer_slide(destination, options);
            return;
        }

        let speed = options.speed_ms.unwrap_or(self.speed_ms);
        let current = self.index as isize;
        let mut destination = destination;

        let natural = if current - destination < 0 {
            Direction::Forward
        } else {
            Direction::Backward
        };

        let direction = if self.continuous && !options.ignore_wrap {
            // Trust the side the destination actually sits on, and extend the
            // index space by one lap so the walk below takes the short way.
            let actual = if self.offset(self.layout.wrap_index(destination) as isize) > 0.0 {
                Direction::Forward
            } else {
                Direction::Backward
            };
            if actual != natural {
                destination -= actual.factor() * n;
            }
            actual
        } else {
            if self.continuous {
                if destination == 0 && self.offset(0) > 0.0 {
                    self.layout.set_offset(0, -width, 0);
                } else if destination == n - 1 && self.offset(destination) < 0.0 {
                    self.layout.set_offset(destination, width, 0);
                }
            }
            natural
        };
        let factor = direction.factor();

        debug!(
            "Slide {} -> {} ({:?}, speed {}ms)",
            self.index, destination, direction, speed
        );

        // Seed everything strictly between the two positions on the far side
        let (low, high) = (current.min(destination), current.max(destination));
        for pos in (low + 1)..high {
            let slot = self.layout.wrap_index(pos) as isize;
            self.layout.set_offset(slot, width * factor as f32, 0);
        }

        let destination = self.layout.wrap_index(destination);

        self.layout.set_offset(current, width * factor as f32, speed);
        self.layout.set_offset(destination as isize, 0.0, speed);

        if self.continuous {
            let neighbour = self.layout.wrap_index(destination as isize - factor) as isize;
            self.schedule_reset(neighbour, -width * factor as f32, speed);
        }

        self.index = destination;
        self.schedule_notify();
    }

    /// Feed one raw input sample
    pub fn handle_input(&mut self, event: &InputEvent) -> InputResponse {
        match event.kind {
            InputKind::Start => {
                if self.tracker.start(event) && self.reset_timer.is_pending() {
                    self.fire_reset();
                }
                InputResponse::default()
            }
            InputKind::Move => match self.tracker.update(event) {
                MoveOutcome::Drag { dx } => {
                    self.drag(dx);
                    InputResponse {
                        suppress_default: true,
                    }
                }
                MoveOutcome::Vertical | MoveOutcome::Ignored => InputResponse::default(),
            },
            InputKind::End => {
                if let Some(gesture) = self.tracker.end(event) {
                    self.finish_gesture(gesture);
                }
                InputResponse::default()
            }
        }
    }

    /// Note a viewport resize; the first of a burst arms one relayout
    pub fn resize(&mut self) {
        let deadline = self.clock.now_ms() + self.timing.resize_settle_ms;
        if self.resize_timer.arm(deadline, ()) {
            trace!("Relayout scheduled for {}ms", deadline);
        }
    }

    /// Re-measure the viewport and re-stack every slide
    pub fn relayout(&mut self) {
        let width = self.layout.surface().measure_width();
        // A pending reset carries an offset for the old width; relayout
        // places the neighbours itself
        if self.reset_timer.cancel().is_some() {
            trace!("Dropped pending reset for relayout at {}px", width);
        }
        self.layout.relayout(width, self.index, self.continuous);
    }

    /// Run every timer whose deadline has passed; returns how many ran
    ///
    /// Timers armed while firing wait for the next poll.
    pub fn poll(&mut self) -> usize {
        let now = self.clock.now_ms();
        let mut due: Vec<(u64, TimerKind)> = [
            (self.reset_timer.deadline(), TimerKind::Reset),
            (self.resize_timer.deadline(), TimerKind::Resize),
            (self.notify_timer.deadline(), TimerKind::Notify),
            (self.retry_timer.deadline(), TimerKind::Retry),
        ]
        .into_iter()
        .filter_map(|(deadline, kind)| deadline.filter(|d| *d <= now).map(|d| (d, kind)))
        .collect();
        due.sort();

        let mut fired = 0;
        for (_, kind) in due {
            match kind {
                TimerKind::Reset => {
                    if let Some(reset) = self.reset_timer.take_due(now) {
                        self.apply_reset(reset);
                        fired += 1;
                    }
                }
                TimerKind::Resize => {
                    if self.resize_timer.take_due(now).is_some() {
                        if self.tracker.is_active() {
                            // Drag owns the offsets; try again after another window
                            self.resize_timer
                                .arm(now + self.timing.resize_settle_ms, ());
                        } else {
                            self.relayout();
                        }
                        fired += 1;
                    }
                }
                TimerKind::Notify => {
                    if let Some(changes) = self.notify_timer.take_due(now) {
                        debug!("Slide changed to {} ({} changes)", self.index, changes);
                        for _ in 0..changes {
                            self.subscribers.notify();
                        }
                        fired += 1;
                    }
                }
                TimerKind::Retry => {
                    if let Some(request) = self.retry_timer.take_due(now) {
                        self.slide_with(request.destination, request.options);
                        fired += 1;
                    }
                }
            }
        }
        fired
    }

    fn offset(&self, index: isize) -> f32 {
        self.layout.offset(index).unwrap_or(0.0)
    }

    fn defer_slide(&mut self, destination: isize, options: SlideOptions) {
        let deadline = self.clock.now_ms() + self.timing.retry_delay_ms;
        self.retry_timer.rearm(
            deadline,
            SlideRequest {
                destination,
                options,
            },
        );
    }

    /// One notification per committed change, delivered together
    fn schedule_notify(&mut self) {
        if let Some(changes) = self.notify_timer.payload_mut() {
            *changes += 1;
            return;
        }
        let deadline = self.clock.now_ms() + self.timing.notify_delay_ms;
        self.notify_timer.arm(deadline, 1);
    }

    /// Snap `index` to `offset` after `delay_ms`, or right away for zero
    fn schedule_reset(&mut self, index: isize, offset: f32, delay_ms: u32) {
        let reset = PendingReset { index, offset };
        if delay_ms == 0 {
            self.apply_reset(reset);
            return;
        }
        let deadline = self.clock.now_ms() + u64::from(delay_ms);
        if !self.reset_timer.arm(deadline, reset) {
            debug!("Reset already pending, keeping it over slide {}", index);
        }
    }

    fn fire_reset(&mut self) {
        if let Some(reset) = self.reset_timer.fire_now() {
            self.apply_reset(reset);
        }
    }

    fn apply_reset(&mut self, reset: PendingReset) {
        trace!("Reset slide {} to {}", reset.index, reset.offset);
        self.layout.set_offset(reset.index, reset.offset, 0);
    }

    /// Paint the live drag on the current slide and its neighbours
    fn drag(&mut self, dx: f32) {
        let current = self.index as isize;
        if self.continuous {
            let prev = self.layout.wrap_index(current - 1) as isize;
            let next = self.layout.wrap_index(current + 1) as isize;
            for pos in [prev, current, next] {
                self.layout.drag(pos, dx);
            }
        } else {
            let last = self.layout.len() - 1;
            let beyond_edge = (self.index == 0 && dx > 0.0) || (self.index == last && dx < 0.0);
            let dx = if beyond_edge {
                resist(dx, self.layout.width())
            } else {
                dx
            };
            for pos in [current - 1, current, current + 1] {
                self.layout.drag(pos, dx);
            }
        }
    }

    /// Commit or revert a finished gesture and settle the three tracked slides
    fn finish_gesture(&mut self, gesture: FinishedGesture) {
        let last = self.layout.len() - 1;
        let dx = gesture.delta.x;
        let past_bounds =
            !self.continuous && ((self.index == 0 && dx > 0.0) || (self.index == last && dx < 0.0));

        let decision = gesture.decide(&self.thresholds, self.layout.width(), past_bounds);
        debug!("Gesture finished: {:?} (dx={}, {}ms)", decision, dx, gesture.duration_ms);

        let current = self.index as isize;
        self.index = match decision {
            GestureDecision::Ignored => return,
            GestureDecision::Revert => self.index,
            GestureDecision::CommitForward => self.layout.wrap_index(current + 1),
            GestureDecision::CommitBackward => self.layout.wrap_index(current - 1),
        };

        self.settle(gesture.advances());

        if matches!(
            decision,
            GestureDecision::CommitForward | GestureDecision::CommitBackward
        ) {
            self.schedule_notify();
        }
    }

    fn settle(&mut self, advancing: bool) {
        let speed = self.speed_ms;
        let width = self.layout.width();
        let current = self.index as isize;
        let last = self.layout.len() - 1;

        self.layout.set_offset(current, 0.0, speed);

        if self.continuous {
            let prev = self.layout.wrap_index(current - 1) as isize;
            let next = self.layout.wrap_index(current + 1) as isize;
            self.layout
                .set_offset(prev, -width, if advancing { speed } else { 0 });
            self.layout
                .set_offset(next, width, if advancing { 0 } else { speed });
        } else if advancing {
            self.layout.set_offset(current - 1, -width, speed);
            if self.index < last {
                self.layout.set_offset(current + 1, width, 0);
            }
        } else {
            if self.index > 0 {
                self.layout.set_offset(current - 1, -width, 0);
            }
            self.layout.set_offset(current + 1, width, speed);
        }
    }
}
