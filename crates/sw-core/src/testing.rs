//! Test doubles for the rendering collaborator

use crate::surface::{SlideStyle, SlideSurface};

/// Surface that records every style call
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub contents: Vec<String>,
    pub width: f32,
    pub calls: Vec<(usize, SlideStyle)>,
    pub widths: Vec<f32>,
    /// Number of `size_slide` calls, one per slide per relayout
    pub sized: usize,
    pub revealed: bool,
}

impl RecordingSurface {
    pub fn with_slides(count: usize, width: f32) -> Self {
        Self {
            contents: (0..count).map(|i| format!("slide-{}", i)).collect(),
            width,
            widths: vec![0.0; count],
            ..Default::default()
        }
    }

    /// Last painted left offset of a slide
    pub fn left(&self, index: usize) -> f32 {
        self.last_style(index).map(|style| style.left_px).unwrap_or(f32::NAN)
    }

    pub fn last_style(&self, index: usize) -> Option<SlideStyle> {
        self.calls
            .iter()
            .rev()
            .find(|(i, _)| *i == index)
            .map(|(_, style)| *style)
    }
}

impl SlideSurface for RecordingSurface {
    fn slide_count(&self) -> usize {
        self.contents.len()
    }

    fn measure_width(&self) -> f32 {
        self.width
    }

    fn set_style(&mut self, index: usize, style: SlideStyle) {
        self.calls.push((index, style));
    }

    fn clone_slide(&mut self, index: usize) -> usize {
        let copy = self.contents[index].clone();
        self.contents.push(copy);
        self.widths.push(0.0);
        self.contents.len() - 1
    }

    fn size_slide(&mut self, index: usize, width: f32) {
        self.widths[index] = width;
        self.sized += 1;
    }

    fn reveal(&mut self) {
        self.revealed = true;
    }
}
