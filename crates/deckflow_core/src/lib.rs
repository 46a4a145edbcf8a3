//! Deckflow Core
//!
//! Foundational types shared by every Deckflow crate:
//!
//! - **Deck model**: [`Item`], [`ItemId`] and the circular [`Deck`]
//! - **Geometry**: per-item visual state ([`Geometry`]) and viewport metrics
//! - **Errors**: [`ConfigError`] for fail-fast construction
//! - **Index arithmetic**: normalized circular index helpers
//!
//! # Example
//!
//! ```rust
//! use deckflow_core::{relative_position, Deck};
//!
//! let deck = Deck::with_labels(["Mountain", "Ocean", "Forest"]).unwrap();
//! assert_eq!(deck.len(), 3);
//! assert_eq!(relative_position(0, 1, deck.len()), 2);
//! ```

pub mod deck;
pub mod error;
pub mod geometry;
pub mod index;

pub use deck::{Deck, Item, ItemId};
pub use error::{ConfigError, Result};
pub use geometry::{Geometry, Size, ViewportMetrics};
pub use index::{checked_index, relative_position, step_index, wrap_index};
