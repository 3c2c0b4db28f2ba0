//! Carousel widget

use std::sync::Arc;

use egui::{vec2, Align2, Color32, FontId, Rect, Response, Rounding, Sense, Ui};
use sw_core::{Carousel, CarouselConfig, Clock, SystemClock};
use tracing::debug;

use crate::input::{InputAdapter, PointerFrame};
use crate::surface::{EguiSurface, SlideContent};

/// A carousel drawn into an egui `Ui`
pub struct CarouselView {
    carousel: Carousel<EguiSurface>,
    input: InputAdapter,
    clock: Arc<dyn Clock>,
    last_width: Option<f32>,
}

impl CarouselView {
    /// Build the view; `initial_width` is used until the first frame is laid out
    pub fn new(
        slides: Vec<SlideContent>,
        config: CarouselConfig,
        initial_width: f32,
    ) -> sw_core::Result<Self> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());
        let surface = EguiSurface::new(slides, initial_width);
        let carousel = Carousel::with_clock(surface, config, Arc::clone(&clock))?;
        Ok(Self {
            carousel,
            input: InputAdapter::new(),
            clock,
            last_width: None,
        })
    }

    pub fn carousel(&self) -> &Carousel<EguiSurface> {
        &self.carousel
    }

    pub fn carousel_mut(&mut self) -> &mut Carousel<EguiSurface> {
        &mut self.carousel
    }

    /// Lay out, feed input, run due timers and paint
    pub fn ui(&mut self, ui: &mut Ui, height: f32) -> Response {
        let size = vec2(ui.available_width(), height);
        let (rect, response) = ui.allocate_exact_size(size, Sense::drag());

        let time = ui.input(|i| i.time);
        self.carousel.surface_mut().set_time(time);

        self.track_width(rect.width());

        let frame = PointerFrame::read(ui, &response);
        let now = self.clock.now_ms();
        for event in self.input.events(&frame, rect.min, now) {
            self.carousel.handle_input(&event);
        }

        self.carousel.poll();
        self.paint(ui, rect, time);

        let surface = self.carousel.surface();
        if surface.is_animating(time)
            || self.carousel.next_deadline().is_some()
            || self.carousel.gesture_active()
        {
            ui.ctx().request_repaint();
        }

        response
    }

    fn track_width(&mut self, width: f32) {
        if self.last_width == Some(width) {
            return;
        }
        self.carousel.surface_mut().set_viewport_width(width);
        match self.last_width {
            // First layout replaces the guessed width straight away
            None => self.carousel.relayout(),
            Some(previous) => {
                debug!("Viewport resized {} -> {}", previous, width);
                self.carousel.resize();
            }
        }
        self.last_width = Some(width);
    }

    fn paint(&self, ui: &Ui, rect: Rect, time: f64) {
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, Rounding::ZERO, Color32::from_rgb(23, 23, 23));

        let surface = self.carousel.surface();
        if !surface.is_visible() {
            return;
        }

        for index in 0..surface.len() {
            let (Some(left), Some(width), Some(content)) = (
                surface.position(index, time),
                surface.slide_width(index),
                surface.content(index),
            ) else {
                continue;
            };
            if left >= rect.width() || left + width <= 0.0 {
                continue;
            }

            let slide_rect = Rect::from_min_size(
                rect.min + vec2(left, 0.0),
                vec2(width, rect.height()),
            )
            .shrink(4.0);
            let [r, g, b] = content.color;
            painter.rect_filled(slide_rect, Rounding::same(8.0), Color32::from_rgb(r, g, b));
            painter.text(
                slide_rect.center(),
                Align2::CENTER_CENTER,
                &content.title,
                FontId::proportional(32.0),
                Color32::WHITE,
            );
            if !content.body.is_empty() {
                painter.text(
                    slide_rect.center() + vec2(0.0, 36.0),
                    Align2::CENTER_CENTER,
                    &content.body,
                    FontId::proportional(16.0),
                    Color32::from_rgb(230, 230, 230),
                );
            }
        }
    }
}
