//! egui front end for the slide carousel
//!
//! This crate provides the rendering surface the carousel core paints
//! through, the pointer/touch adapter that feeds it gestures, and a widget
//! that ties both to an egui `Ui`.

pub mod input;
pub mod surface;
pub mod theme;
pub mod widget;

pub use input::{InputAdapter, PointerFrame};
pub use surface::{EguiSurface, SlideContent};
pub use theme::{apply_theme, Theme};
pub use widget::CarouselView;
