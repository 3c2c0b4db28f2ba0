//! Rendering surface backed by per-slide animation state

use serde::{Deserialize, Serialize};
use sw_core::{SlideStyle, SlideSurface};

/// What a slide displays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideContent {
    pub title: String,
    #[serde(default)]
    pub body: String,
    /// Background colour (RGB)
    pub color: [u8; 3],
}

/// One slide's current transition
#[derive(Debug, Clone)]
struct SlideVisual {
    content: SlideContent,
    from: f32,
    to: f32,
    /// Frame time the transition started, in seconds
    started: f64,
    duration_ms: u32,
    width: f32,
}

impl SlideVisual {
    fn position(&self, time: f64) -> f32 {
        if self.duration_ms == 0 {
            return self.to;
        }
        let elapsed_ms = ((time - self.started) * 1000.0).max(0.0);
        let t = (elapsed_ms / f64::from(self.duration_ms)).min(1.0) as f32;
        self.from + (self.to - self.from) * ease_out(t)
    }

    fn is_animating(&self, time: f64) -> bool {
        self.duration_ms > 0 && (time - self.started) * 1000.0 < f64::from(self.duration_ms)
    }
}

fn ease_out(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// Slide container painted by [`crate::CarouselView`]
#[derive(Debug, Clone)]
pub struct EguiSurface {
    slides: Vec<SlideVisual>,
    viewport_width: f32,
    time: f64,
    visible: bool,
}

impl EguiSurface {
    pub fn new(contents: Vec<SlideContent>, viewport_width: f32) -> Self {
        let slides = contents
            .into_iter()
            .map(|content| SlideVisual {
                content,
                from: 0.0,
                to: 0.0,
                started: 0.0,
                duration_ms: 0,
                width: viewport_width,
            })
            .collect();
        Self {
            slides,
            viewport_width,
            time: 0.0,
            visible: false,
        }
    }

    /// Advance the frame clock transitions start from
    pub fn set_time(&mut self, time: f64) {
        self.time = time;
    }

    pub fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = width;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn content(&self, index: usize) -> Option<&SlideContent> {
        self.slides.get(index).map(|slide| &slide.content)
    }

    /// Painted left offset of a slide at `time`
    pub fn position(&self, index: usize, time: f64) -> Option<f32> {
        self.slides.get(index).map(|slide| slide.position(time))
    }

    pub fn slide_width(&self, index: usize) -> Option<f32> {
        self.slides.get(index).map(|slide| slide.width)
    }

    /// Any slide still moving at `time`
    pub fn is_animating(&self, time: f64) -> bool {
        self.slides.iter().any(|slide| slide.is_animating(time))
    }
}

impl SlideSurface for EguiSurface {
    fn slide_count(&self) -> usize {
        self.slides.len()
    }

    fn measure_width(&self) -> f32 {
        self.viewport_width
    }

    fn set_style(&mut self, index: usize, style: SlideStyle) {
        let time = self.time;
        if let Some(slide) = self.slides.get_mut(index) {
            // Retarget from wherever the slide is painted right now
            slide.from = slide.position(time);
            slide.to = style.left_px;
            slide.started = time;
            slide.duration_ms = style.transition_ms;
        }
    }

    fn clone_slide(&mut self, index: usize) -> usize {
        let copy = self.slides[index].clone();
        self.slides.push(copy);
        self.slides.len() - 1
    }

    fn size_slide(&mut self, index: usize, width: f32) {
        if let Some(slide) = self.slides.get_mut(index) {
            slide.width = width;
        }
    }

    fn reveal(&mut self) {
        self.visible = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> EguiSurface {
        EguiSurface::new(
            vec![
                SlideContent {
                    title: "One".to_string(),
                    body: String::new(),
                    color: [200, 80, 80],
                },
                SlideContent {
                    title: "Two".to_string(),
                    body: String::new(),
                    color: [80, 200, 80],
                },
            ],
            400.0,
        )
    }

    #[test]
    fn test_zero_duration_jumps() {
        let mut surface = surface();
        surface.set_style(
            1,
            SlideStyle {
                transition_ms: 0,
                left_px: 400.0,
            },
        );
        assert_eq!(surface.position(1, 0.0), Some(400.0));
        assert!(!surface.is_animating(0.0));
    }

    #[test]
    fn test_transition_interpolates() {
        let mut surface = surface();
        surface.set_time(1.0);
        surface.set_style(
            0,
            SlideStyle {
                transition_ms: 200,
                left_px: -400.0,
            },
        );
        let halfway = surface.position(0, 1.1).unwrap();
        assert!(halfway < 0.0 && halfway > -400.0);
        assert!(surface.is_animating(1.1));
        assert_eq!(surface.position(0, 1.3), Some(-400.0));
        assert!(!surface.is_animating(1.25));
    }

    #[test]
    fn test_clone_copies_content() {
        let mut surface = surface();
        let index = surface.clone_slide(0);
        assert_eq!(index, 2);
        assert_eq!(surface.content(2), surface.content(0));
        assert_eq!(surface.slide_count(), 3);
    }

    #[test]
    fn test_out_of_range_style_ignored() {
        let mut surface = surface();
        surface.set_style(
            9,
            SlideStyle {
                transition_ms: 0,
                left_px: 1.0,
            },
        );
        assert_eq!(surface.position(9, 0.0), None);
    }
}
