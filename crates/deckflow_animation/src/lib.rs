//! Deckflow Animation System
//!
//! Timed interpolation for carousel transitions.
//!
//! # Features
//!
//! - **Easing Curves**: Linear plus quadratic and cubic ease-in/out families
//! - **Interpolation**: [`Interpolate`] for `f32` and [`deckflow_core::Geometry`]
//! - **Synchronized Timelines**: many tracks on one shared clock, so every
//!   track starts and finishes together

pub mod easing;
pub mod timeline;
pub mod values;

pub use easing::Easing;
pub use timeline::{Timeline, TimelineClock, TrackId};
pub use values::Interpolate;
