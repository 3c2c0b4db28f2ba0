//! Rendering collaborator contract

use serde::{Deserialize, Serialize};

/// Visual placement of one slide
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlideStyle {
    /// Duration of the move to `left_px`; zero means jump immediately
    pub transition_ms: u32,
    /// Horizontal offset from the viewport origin
    pub left_px: f32,
}

/// Display surface holding the ordered slides
///
/// Style updates are visual only and may take effect asynchronously. Indices
/// passed in are always within `0..slide_count()`.
pub trait SlideSurface {
    /// Number of slide children currently attached
    fn slide_count(&self) -> usize;

    /// Width of the viewport in pixels
    fn measure_width(&self) -> f32;

    /// Move a slide to `style.left_px` over `style.transition_ms`
    fn set_style(&mut self, index: usize, style: SlideStyle);

    /// Append a deep copy of the slide at `index`, returning the copy's index
    fn clone_slide(&mut self, index: usize) -> usize;

    /// Size a slide to the viewport width
    fn size_slide(&mut self, _index: usize, _width: f32) {}

    /// Make the container visible once slides are stacked
    fn reveal(&mut self) {}
}
