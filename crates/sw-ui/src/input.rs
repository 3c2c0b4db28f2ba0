//! Pointer and touch input translated into carousel samples

use egui::{Pos2, Response, Ui};
use sw_core::{InputEvent, InputKind, Point};
use tracing::trace;

/// Pointer state of one frame, relative to the carousel widget
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerFrame {
    pub pressed: bool,
    pub dragging: bool,
    pub released: bool,
    pub pos: Option<Pos2>,
    /// Fingers on the screen, zero for a mouse
    pub touches: usize,
    /// Pinch zoom factor this frame, `1.0` when not pinching
    pub zoom: f32,
}

impl PointerFrame {
    /// Read this frame's pointer state for a widget response
    pub fn read(ui: &Ui, response: &Response) -> Self {
        let (touches, zoom) = ui
            .input(|i| i.multi_touch())
            .map(|touch| (touch.num_touches, touch.zoom_delta))
            .unwrap_or((0, 1.0));
        Self {
            pressed: response.drag_started(),
            dragging: response.dragged(),
            released: response.drag_released(),
            pos: response.interact_pointer_pos(),
            touches,
            zoom,
        }
    }
}

/// Turns per-frame pointer state into start/move/end samples
#[derive(Debug, Default)]
pub struct InputAdapter {
    active: bool,
    last: Option<Point>,
}

impl InputAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Samples for one frame; positions are made relative to `origin`
    pub fn events(
        &mut self,
        frame: &PointerFrame,
        origin: Pos2,
        timestamp_ms: u64,
    ) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let point = frame.pos.map(|pos| Point::new(pos.x - origin.x, pos.y - origin.y));

        if frame.pressed {
            if let Some(point) = point {
                events.push(InputEvent::start(point.x, point.y, timestamp_ms));
                self.active = true;
                self.last = Some(point);
            }
        }

        if self.active && frame.dragging && !frame.pressed {
            if let Some(point) = point.filter(|p| Some(*p) != self.last) {
                let mut points = vec![point];
                // Extra fingers make the sample a pinch, not a swipe
                points.extend((1..frame.touches).map(|_| point));
                events.push(InputEvent {
                    kind: InputKind::Move,
                    points,
                    timestamp_ms,
                    scale: (frame.zoom != 1.0).then_some(frame.zoom),
                });
                self.last = Some(point);
            }
        }

        if self.active && frame.released {
            events.push(InputEvent::end(timestamp_ms));
            self.active = false;
            self.last = None;
        }

        if !events.is_empty() {
            trace!("Pointer produced {} samples", events.len());
        }
        events
    }
}
