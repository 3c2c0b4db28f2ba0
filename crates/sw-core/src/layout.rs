//! Slide layout engine
//!
//! Owns the slide collection and the per-slide horizontal offsets. Logical
//! positions are unbounded integers; they are only wrapped into `[0, N)` at the
//! point where a slide is looked up.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{CarouselError, Result};
use crate::surface::{SlideStyle, SlideSurface};

/// Where a slide in the collection came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlideOrigin {
    /// Supplied by the embedder
    Original,
    /// Appended at construction so a short loop has distinct neighbours
    Clone { of: usize },
}

/// One display unit of the carousel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// Stable position in the collection
    pub index: usize,
    /// Resting distance from the viewport origin
    pub offset: f32,
    pub origin: SlideOrigin,
}

/// Ordered slides, fixed in length once built
#[derive(Debug, Clone)]
pub struct SlideCollection {
    slides: Vec<Slide>,
    original_count: usize,
}

impl SlideCollection {
    /// Build the collection from the surface's children
    ///
    /// In continuous mode a collection shorter than three gets exactly two
    /// clones appended: the first slide, then whatever now sits second.
    pub fn attach<S: SlideSurface>(surface: &mut S, continuous: bool) -> Result<Self> {
        let original_count = surface.slide_count();
        if original_count == 0 {
            return Err(CarouselError::EmptyCollection);
        }

        let mut slides: Vec<Slide> = (0..original_count)
            .map(|index| Slide {
                index,
                offset: 0.0,
                origin: SlideOrigin::Original,
            })
            .collect();

        if continuous && original_count < 3 {
            for source in [0, 1] {
                let root = match slides[source].origin {
                    SlideOrigin::Original => source,
                    SlideOrigin::Clone { of } => of,
                };
                let index = surface.clone_slide(source);
                debug!("Cloned slide {} as {} for continuous loop", source, index);
                slides.push(Slide {
                    index,
                    offset: 0.0,
                    origin: SlideOrigin::Clone { of: root },
                });
            }
        }

        Ok(Self {
            slides,
            original_count,
        })
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Number of slides supplied before any cloning
    pub fn original_count(&self) -> usize {
        self.original_count
    }

    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slide> {
        self.slides.iter()
    }

    /// Positive modulo into `[0, len)`
    pub fn wrap_index(&self, index: isize) -> usize {
        index.rem_euclid(self.slides.len() as isize) as usize
    }

    fn slot(&self, index: isize) -> Option<usize> {
        usize::try_from(index)
            .ok()
            .filter(|index| *index < self.slides.len())
    }
}

/// Offset bookkeeping on top of a rendering surface
pub struct SlideLayout<S> {
    surface: S,
    slides: SlideCollection,
    width: f32,
}

impl<S: SlideSurface> SlideLayout<S> {
    /// Attach to a surface, cloning slides for short continuous loops
    pub fn new(mut surface: S, continuous: bool) -> Result<Self> {
        let slides = SlideCollection::attach(&mut surface, continuous)?;
        let width = surface.measure_width();
        Ok(Self {
            surface,
            slides,
            width,
        })
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn slides(&self) -> &SlideCollection {
        &self.slides
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn wrap_index(&self, index: isize) -> usize {
        self.slides.wrap_index(index)
    }

    /// Resting offset of a slide, `None` when out of range
    pub fn offset(&self, index: isize) -> Option<f32> {
        self.slides
            .slot(index)
            .map(|slot| self.slides.slides[slot].offset)
    }

    pub fn offsets(&self) -> Vec<f32> {
        self.slides.iter().map(|slide| slide.offset).collect()
    }

    /// Record a resting offset and animate the slide there
    ///
    /// Out-of-range indices are ignored.
    pub fn set_offset(&mut self, index: isize, distance: f32, speed_ms: u32) {
        let Some(slot) = self.slides.slot(index) else {
            trace!("Ignoring offset for out-of-range slide {}", index);
            return;
        };
        self.slides.slides[slot].offset = distance;
        self.surface.set_style(
            slot,
            SlideStyle {
                transition_ms: speed_ms,
                left_px: distance,
            },
        );
    }

    /// Paint a slide at `distance` without touching its resting offset
    pub fn translate(&mut self, index: isize, distance: f32, speed_ms: u32) {
        if let Some(slot) = self.slides.slot(index) {
            self.surface.set_style(
                slot,
                SlideStyle {
                    transition_ms: speed_ms,
                    left_px: distance,
                },
            );
        }
    }

    /// Paint a slide displaced by `dx` from its resting offset
    pub fn drag(&mut self, index: isize, dx: f32) {
        if let Some(resting) = self.offset(index) {
            self.translate(index, resting + dx, 0);
        }
    }

    /// Re-stack every slide around `current` for a new viewport width
    pub fn relayout(&mut self, width: f32, current: usize, continuous: bool) {
        debug!("Relayout at width {} around slide {}", width, current);
        self.width = width;

        for pos in (0..self.slides.len()).rev() {
            self.surface.size_slide(pos, width);
            let distance = if current > pos {
                -width
            } else if current < pos {
                width
            } else {
                0.0
            };
            self.set_offset(pos as isize, distance, 0);
        }

        if continuous {
            let current = current as isize;
            let prev = self.wrap_index(current - 1) as isize;
            let next = self.wrap_index(current + 1) as isize;
            self.set_offset(prev, -width, 0);
            self.set_offset(next, width, 0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingSurface;

    fn layout(count: usize, continuous: bool) -> SlideLayout<RecordingSurface> {
        SlideLayout::new(RecordingSurface::with_slides(count, 300.0), continuous).unwrap()
    }

    #[test]
    fn test_wrap_index_range_and_period() {
        for n in 1..6 {
            let layout = layout(n, false);
            for i in -20isize..20 {
                let wrapped = layout.wrap_index(i);
                assert!(wrapped < n);
                assert_eq!(wrapped, layout.wrap_index(i + n as isize));
            }
        }
    }

    #[test]
    fn test_wrap_index_negative() {
        let layout = layout(4, false);
        assert_eq!(layout.wrap_index(-1), 3);
        assert_eq!(layout.wrap_index(-4), 0);
        assert_eq!(layout.wrap_index(-5), 3);
        assert_eq!(layout.wrap_index(9), 1);
    }

    #[test]
    fn test_set_offset_out_of_range_is_noop() {
        let mut layout = layout(3, false);
        layout.surface_mut().calls.clear();
        layout.set_offset(-1, 10.0, 0);
        layout.set_offset(3, 10.0, 0);
        assert!(layout.surface().calls.is_empty());
        assert_eq!(layout.offset(3), None);
    }

    #[test]
    fn test_set_offset_records_and_paints() {
        let mut layout = layout(3, false);
        layout.set_offset(1, -42.0, 120);
        assert_eq!(layout.offset(1), Some(-42.0));
        let (index, style) = *layout.surface().calls.last().unwrap();
        assert_eq!(index, 1);
        assert_eq!(style.left_px, -42.0);
        assert_eq!(style.transition_ms, 120);
    }

    #[test]
    fn test_translate_leaves_offset() {
        let mut layout = layout(3, false);
        layout.relayout(300.0, 0, false);
        layout.drag(1, -50.0);
        assert_eq!(layout.offset(1), Some(300.0));
        assert_eq!(layout.surface().left(1), 250.0);
    }

    #[test]
    fn test_relayout_three_bucket_stacking() {
        let mut layout = layout(5, false);
        layout.relayout(200.0, 2, false);
        assert_eq!(layout.offsets(), vec![-200.0, -200.0, 0.0, 200.0, 200.0]);
        assert!(layout.surface().widths.iter().all(|w| *w == 200.0));
    }

    #[test]
    fn test_relayout_continuous_wrap_neighbours() {
        let mut layout = layout(5, true);
        layout.relayout(100.0, 0, true);
        assert_eq!(layout.offsets(), vec![0.0, 100.0, 100.0, 100.0, -100.0]);
    }

    #[test]
    fn test_short_continuous_collection_is_cloned_once() {
        let layout = layout(2, true);
        assert_eq!(layout.len(), 4);
        assert_eq!(layout.slides().original_count(), 2);
        assert_eq!(
            layout.slides().get(2).map(|s| s.origin),
            Some(SlideOrigin::Clone { of: 0 })
        );
        assert_eq!(
            layout.slides().get(3).map(|s| s.origin),
            Some(SlideOrigin::Clone { of: 1 })
        );
        assert_eq!(layout.surface().contents, vec!["slide-0", "slide-1", "slide-0", "slide-1"]);
    }

    #[test]
    fn test_empty_surface_rejected() {
        let result = SlideLayout::new(RecordingSurface::with_slides(0, 300.0), true);
        assert!(matches!(result, Err(CarouselError::EmptyCollection)));
    }
}
