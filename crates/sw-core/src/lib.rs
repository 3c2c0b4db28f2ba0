//! Core functionality for the slide carousel
//!
//! This crate provides the slide layout engine, the gesture tracker and the
//! carousel controller that ties them together. Painting, raw input and wall
//! clock time are supplied by the embedder through the [`SlideSurface`] and
//! [`Clock`] traits.

pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod gesture;
pub mod layout;
pub mod subscriber;
pub mod surface;
pub mod timer;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{CarouselConfig, GestureThresholds, TimingConfig};
pub use controller::{Carousel, CarouselSnapshot, InputResponse, SlideOptions};
pub use error::{CarouselError, Result};
pub use gesture::{
    Axis, FinishedGesture, GestureDecision, GestureTracker, InputEvent, InputKind, MoveOutcome,
    Point,
};
pub use layout::{Slide, SlideCollection, SlideLayout, SlideOrigin};
pub use subscriber::{FnSubscriber, SlideChangeSubscriber};
pub use surface::{SlideStyle, SlideSurface};
pub use timer::TimerSlot;
