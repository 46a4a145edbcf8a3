//! Deckflow Platform Abstraction Layer
//!
//! Platform-agnostic event types and a small router that connects a host
//! surface (window, DOM region, terminal) to Deckflow components.
//!
//! # Architecture
//!
//! - [`Event`] - Everything a host can deliver: window, input and frame events
//! - [`EventListener`] - Implemented by components that react to events
//! - [`EventRouter`] - Attaches listeners to a single target region and
//!   detaches them without leaving references behind
//!
//! # Example
//!
//! ```ignore
//! use deckflow_platform::*;
//!
//! let mut router = EventRouter::new();
//! let region = router.create_target("card-stack");
//! let listener = router.attach(region, carousel.clone());
//!
//! router.dispatch(region, &Event::Input(InputEvent::scroll(0.0, 120.0, now_ms)))?;
//! router.broadcast(&Event::Frame { timestamp_ms: now_ms })?;
//!
//! router.detach(listener);
//! ```

mod error;
mod event;
mod input;
mod router;

// Re-export all public types
pub use error::{PlatformError, Result};
pub use event::{Event, EventListener, Propagation, WindowEvent};
pub use input::{InputEvent, ScrollPhase};
pub use router::{EventRouter, ListenerId, SharedListener, TargetId};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{PlatformError, Result};
    pub use crate::event::{Event, EventListener, Propagation, WindowEvent};
    pub use crate::input::{InputEvent, ScrollPhase};
    pub use crate::router::{EventRouter, ListenerId, SharedListener, TargetId};
}
