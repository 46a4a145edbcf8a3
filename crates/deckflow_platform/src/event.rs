//! Platform events and listener contract

use crate::input::InputEvent;

/// Whether an event should continue to later listeners on the same target
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Propagation {
    /// Let later listeners see the event
    #[default]
    Continue,
    /// The event was consumed (the host should also suppress its default
    /// scrolling behaviour)
    Stop,
}

/// Platform events
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Window-related event
    Window(WindowEvent),
    /// Input event addressed to a target region
    Input(InputEvent),
    /// Frame tick - time to advance animations and render
    Frame {
        /// Host monotonic time in milliseconds
        timestamp_ms: f64,
    },
}

/// Window events
#[derive(Clone, Debug, PartialEq)]
pub enum WindowEvent {
    /// Viewport was resized
    Resized {
        /// New width in logical pixels
        width: f32,
        /// New height in logical pixels
        height: f32,
    },
    /// Window gained or lost focus
    Focused(bool),
}

/// A component that receives events from an [`EventRouter`](crate::EventRouter)
pub trait EventListener {
    /// Handle an event
    fn on_event(&mut self, event: &Event) -> Propagation;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_propagation_default() {
        assert_eq!(Propagation::default(), Propagation::Continue);
    }
}
