//! Platform error types

use thiserror::Error;

/// Platform-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// Event addressed to a target region that was never created
    #[error("Unknown target region: {0}")]
    UnknownTarget(u64),

    /// A listener was still borrowed when an event arrived for it
    #[error("Listener is busy and cannot receive events re-entrantly")]
    ListenerBusy,
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
