//! Configuration and model error types

use thiserror::Error;

/// Errors raised while building a deck or validating a configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A deck needs at least one item
    #[error("item count must be at least 1, got {0}")]
    EmptyDeck(usize),

    /// A width or height was negative or not finite
    #[error("invalid size for {field}: {value}")]
    InvalidSize {
        /// Name of the offending field
        field: &'static str,
        /// The rejected value
        value: f32,
    },

    /// Opacity outside 0.0..=1.0
    #[error("opacity for {field} must be within 0..=1, got {value}")]
    InvalidOpacity {
        /// Name of the offending field
        field: &'static str,
        /// The rejected value
        value: f32,
    },

    /// Negative or non-finite gap, padding, duration or threshold
    #[error("{field} must be a finite non-negative number, got {value}")]
    InvalidValue {
        /// Name of the offending field
        field: &'static str,
        /// The rejected value
        value: f64,
    },

    /// Two items share the same id
    #[error("duplicate item id {0}")]
    DuplicateItem(u64),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
