//! Gesture tracker
//!
//! Turns a stream of start/move/end samples into a live horizontal drag and,
//! once the touch ends, a [`FinishedGesture`] the controller decides on.
//! A session lives for exactly one physical touch.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::GestureThresholds;

/// A touch point in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Phase of a raw input sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputKind {
    Start,
    Move,
    End,
}

/// One raw sample from the input source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputEvent {
    pub kind: InputKind,
    /// Active touch points; more than one means this is not a slide gesture
    pub points: Vec<Point>,
    pub timestamp_ms: u64,
    /// Pinch scale reported by the source, `1.0` when not scaling
    #[serde(default)]
    pub scale: Option<f32>,
}

impl InputEvent {
    pub fn start(x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self {
            kind: InputKind::Start,
            points: vec![Point::new(x, y)],
            timestamp_ms,
            scale: None,
        }
    }

    pub fn moved(x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self {
            kind: InputKind::Move,
            points: vec![Point::new(x, y)],
            timestamp_ms,
            scale: None,
        }
    }

    pub fn end(timestamp_ms: u64) -> Self {
        Self {
            kind: InputKind::End,
            points: Vec::new(),
            timestamp_ms,
            scale: None,
        }
    }

    /// Multi-point or scaling payload
    pub fn is_multi_touch(&self) -> bool {
        self.points.len() > 1 || self.scale.is_some_and(|scale| scale != 1.0)
    }
}

/// Dominant axis a session locked onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Where a session started
#[derive(Debug, Clone, Copy, PartialEq)]
struct GestureSample {
    point: Point,
    timestamp_ms: u64,
}

/// State of the touch in progress
#[derive(Debug, Clone)]
struct GestureSession {
    start: GestureSample,
    last_delta: Point,
    axis: Option<Axis>,
}

/// Result of feeding a move sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    /// No session, or a multi-point sample
    Ignored,
    /// Session is vertical; native scrolling proceeds
    Vertical,
    /// Horizontal drag; default scrolling must be suppressed
    Drag { dx: f32 },
}

/// What the controller should do with a finished gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureDecision {
    /// Advance to the next index
    CommitForward,
    /// Go back to the previous index
    CommitBackward,
    /// Settle back onto the current slide
    Revert,
    /// Vertical gesture, navigation untouched
    Ignored,
}

/// A completed session handed to the controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinishedGesture {
    pub delta: Point,
    pub duration_ms: u64,
    pub axis: Option<Axis>,
}

impl FinishedGesture {
    pub fn is_vertical(&self) -> bool {
        self.axis == Some(Axis::Vertical)
    }

    /// Whether the drag was a flick or travelled far enough to change slide
    pub fn is_swipe(&self, thresholds: &GestureThresholds, width: f32) -> bool {
        let distance = self.delta.x.abs();
        (self.duration_ms < thresholds.swipe_duration_ms
            && distance > thresholds.swipe_min_distance_px)
            || distance > width * thresholds.commit_fraction
    }

    /// Advancing means the finger travelled left
    pub fn advances(&self) -> bool {
        self.delta.x < 0.0
    }

    /// Decide the outcome; `past_bounds` blocks a commit off either end
    pub fn decide(
        &self,
        thresholds: &GestureThresholds,
        width: f32,
        past_bounds: bool,
    ) -> GestureDecision {
        if self.is_vertical() {
            return GestureDecision::Ignored;
        }
        if !self.is_swipe(thresholds, width) || past_bounds {
            return GestureDecision::Revert;
        }
        if self.advances() {
            GestureDecision::CommitForward
        } else {
            GestureDecision::CommitBackward
        }
    }
}

/// Damp a drag past a non-wrapping boundary
///
/// The result always has the sign of `dx`, grows with `|dx|` and stays
/// strictly smaller than it.
pub fn resist(dx: f32, width: f32) -> f32 {
    dx / (dx.abs() / width + 1.0)
}

/// Tracks at most one touch session
#[derive(Debug, Default)]
pub struct GestureTracker {
    session: Option<GestureSession>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session is open between a start and its end
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn axis(&self) -> Option<Axis> {
        self.session.as_ref().and_then(|session| session.axis)
    }

    /// Open a session, discarding any unfinished one
    pub fn start(&mut self, event: &InputEvent) -> bool {
        let Some(point) = event.points.first().copied() else {
            return false;
        };
        trace!("Gesture start at ({}, {})", point.x, point.y);
        self.session = Some(GestureSession {
            start: GestureSample {
                point,
                timestamp_ms: event.timestamp_ms,
            },
            last_delta: Point::default(),
            axis: None,
        });
        true
    }

    /// Feed a move sample
    pub fn update(&mut self, event: &InputEvent) -> MoveOutcome {
        let Some(session) = self.session.as_mut() else {
            return MoveOutcome::Ignored;
        };
        if event.is_multi_touch() {
            return MoveOutcome::Ignored;
        }
        let Some(point) = event.points.first() else {
            return MoveOutcome::Ignored;
        };

        if session.axis == Some(Axis::Vertical) {
            return MoveOutcome::Vertical;
        }

        let delta = Point::new(
            point.x - session.start.point.x,
            point.y - session.start.point.y,
        );
        session.last_delta = delta;

        let axis = *session.axis.get_or_insert(if delta.x.abs() < delta.y.abs() {
            Axis::Vertical
        } else {
            Axis::Horizontal
        });

        match axis {
            Axis::Vertical => {
                trace!("Gesture locked vertical");
                MoveOutcome::Vertical
            }
            Axis::Horizontal => {
                trace!("Gesture drag dx={}", delta.x);
                MoveOutcome::Drag { dx: delta.x }
            }
        }
    }

    /// Close the session; `None` when no session was open
    pub fn end(&mut self, event: &InputEvent) -> Option<FinishedGesture> {
        let session = self.session.take()?;
        Some(FinishedGesture {
            delta: session.last_delta,
            duration_ms: event
                .timestamp_ms
                .saturating_sub(session.start.timestamp_ms),
            axis: session.axis,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finished(dx: f32, duration_ms: u64) -> FinishedGesture {
        FinishedGesture {
            delta: Point::new(dx, 0.0),
            duration_ms,
            axis: Some(Axis::Horizontal),
        }
    }

    #[test]
    fn test_short_flick_commits() {
        let thresholds = GestureThresholds::default();
        let gesture = finished(-25.0, 200);
        assert_eq!(
            gesture.decide(&thresholds, 300.0, false),
            GestureDecision::CommitForward
        );
    }

    #[test]
    fn test_slow_drag_needs_half_width() {
        let thresholds = GestureThresholds::default();
        assert_eq!(
            finished(25.0, 400).decide(&thresholds, 300.0, false),
            GestureDecision::Revert
        );
        assert_eq!(
            finished(25.0, 400).decide(&thresholds, 40.0, false),
            GestureDecision::CommitBackward
        );
        assert_eq!(
            finished(151.0, 2_000).decide(&thresholds, 300.0, false),
            GestureDecision::CommitBackward
        );
    }

    #[test]
    fn test_past_bounds_reverts() {
        let thresholds = GestureThresholds::default();
        assert_eq!(
            finished(200.0, 100).decide(&thresholds, 300.0, true),
            GestureDecision::Revert
        );
    }

    #[test]
    fn test_resistance_monotonic_and_damped() {
        let width = 300.0;
        let mut previous = 0.0;
        for d in [1.0f32, 10.0, 50.0, 150.0, 300.0, 900.0, 5_000.0] {
            let resisted = resist(d, width);
            assert!(resisted > previous);
            assert!(resisted < d);
            assert!(resist(-d, width) == -resisted);
            previous = resisted;
        }
    }

    #[test]
    fn test_axis_locks_on_first_move() {
        let mut tracker = GestureTracker::new();
        tracker.start(&InputEvent::start(100.0, 100.0, 0));
        assert_eq!(
            tracker.update(&InputEvent::moved(90.0, 130.0, 10)),
            MoveOutcome::Vertical
        );
        // Large horizontal travel later in the session changes nothing
        assert_eq!(
            tracker.update(&InputEvent::moved(-200.0, 130.0, 20)),
            MoveOutcome::Vertical
        );
        let gesture = tracker.end(&InputEvent::end(30)).unwrap();
        assert!(gesture.is_vertical());
        assert_eq!(
            gesture.decide(&GestureThresholds::default(), 300.0, false),
            GestureDecision::Ignored
        );
    }

    #[test]
    fn test_horizontal_drag_reports_delta() {
        let mut tracker = GestureTracker::new();
        tracker.start(&InputEvent::start(100.0, 100.0, 1_000));
        assert_eq!(
            tracker.update(&InputEvent::moved(60.0, 105.0, 1_050)),
            MoveOutcome::Drag { dx: -40.0 }
        );
        assert_eq!(
            tracker.update(&InputEvent::moved(20.0, 160.0, 1_100)),
            MoveOutcome::Drag { dx: -80.0 }
        );
        let gesture = tracker.end(&InputEvent::end(1_150)).unwrap();
        assert_eq!(gesture.delta.x, -80.0);
        assert_eq!(gesture.duration_ms, 150);
        assert!(!tracker.is_active());
    }

    #[test]
    fn test_multi_touch_ignored() {
        let mut tracker = GestureTracker::new();
        tracker.start(&InputEvent::start(0.0, 0.0, 0));
        let mut pinch = InputEvent::moved(50.0, 0.0, 10);
        pinch.points.push(Point::new(80.0, 20.0));
        assert_eq!(tracker.update(&pinch), MoveOutcome::Ignored);

        let mut scaled = InputEvent::moved(50.0, 0.0, 20);
        scaled.scale = Some(1.4);
        assert_eq!(tracker.update(&scaled), MoveOutcome::Ignored);
        assert_eq!(tracker.axis(), None);
    }

    #[test]
    fn test_move_without_session_ignored() {
        let mut tracker = GestureTracker::new();
        assert_eq!(
            tracker.update(&InputEvent::moved(10.0, 0.0, 0)),
            MoveOutcome::Ignored
        );
        assert!(tracker.end(&InputEvent::end(5)).is_none());
    }

    #[test]
    fn test_new_start_overwrites_session() {
        let mut tracker = GestureTracker::new();
        tracker.start(&InputEvent::start(0.0, 0.0, 0));
        tracker.update(&InputEvent::moved(0.0, 50.0, 10));
        tracker.start(&InputEvent::start(200.0, 0.0, 100));
        assert_eq!(tracker.axis(), None);
        assert_eq!(
            tracker.update(&InputEvent::moved(150.0, 0.0, 110)),
            MoveOutcome::Drag { dx: -50.0 }
        );
    }
}
