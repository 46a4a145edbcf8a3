//! Deckflow Carousel
//!
//! A vertically stacked card carousel driven by wheel input. One card is
//! expanded; its neighbours are stacked above and below it, and the rest
//! are parked off-screen. Each navigation step tweens every card to its new
//! slot on a single shared clock.
//!
//! # Components
//!
//! - **Slot Classifier** ([`slot`]): relative position to [`SlotKind`]
//! - **Slot Layout** ([`layout`]): [`SlotKind`] to target geometry
//! - **Navigation Controller** ([`navigation`]): wheel deltas to commands
//!   under a cooldown, accumulator or debounce policy
//! - **Transition Driver** ([`transition`]): `Idle`/`Transitioning` state
//!   machine with a busy gate
//! - **Geometry Sink** ([`sink`]): where displayed geometry is written
//! - **Carousel** ([`carousel`]): wires everything together and listens to
//!   [`deckflow_platform`] events

pub mod carousel;
pub mod config;
pub mod layout;
pub mod navigation;
pub mod sink;
pub mod slot;
pub mod transition;

pub use carousel::{Carousel, FrameReport};
pub use config::{
    BelowWidth, BusyGatePolicy, CarouselConfig, RateLimitPolicy, SlotStyle, SlotStyles,
    DEFAULT_ACCUMULATOR_GAP_MS, DEFAULT_ACCUMULATOR_THRESHOLD, DEFAULT_COOLDOWN_MS,
    DEFAULT_DEBOUNCE_MS, DEFAULT_MIN_MAGNITUDE,
};
pub use layout::SlotLayout;
pub use navigation::{Direction, NavigationCommand, NavigationController};
pub use sink::{GeometrySink, GeometryUpdate, RecordingSink, SinkError};
pub use slot::{classify, slot_for, Side, SlotKind};
pub use transition::{TransitionDriver, TransitionHandle, TransitionState, TransitionTiming};

// Re-export the types callers need to build and drive a carousel
pub use deckflow_animation::Easing;
pub use deckflow_core::{ConfigError, Deck, Geometry, Item, ItemId, Size, ViewportMetrics};
