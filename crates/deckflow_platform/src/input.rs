//! Input event types

/// Scroll gesture phase (for trackpad/touchpad scrolling)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScrollPhase {
    /// Scroll gesture starting (finger touched trackpad)
    Started,
    /// Scroll is in progress
    #[default]
    Moved,
    /// Scroll gesture ended (finger lifted, momentum may continue)
    Ended,
    /// Momentum/inertia scrolling has ended
    MomentumEnded,
}

/// Input events
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Scroll/wheel event
    Scroll {
        /// Horizontal scroll delta
        delta_x: f32,
        /// Vertical scroll delta, positive when scrolling down
        delta_y: f32,
        /// Scroll phase (for trackpad gestures)
        phase: ScrollPhase,
        /// Host monotonic time in milliseconds
        timestamp_ms: f64,
    },
    /// Scroll gesture ended (touchpad momentum finished)
    ScrollEnd {
        /// Host monotonic time in milliseconds
        timestamp_ms: f64,
    },
}

impl InputEvent {
    /// Plain mouse-wheel event
    pub fn scroll(delta_x: f32, delta_y: f32, timestamp_ms: f64) -> Self {
        InputEvent::Scroll {
            delta_x,
            delta_y,
            phase: ScrollPhase::Moved,
            timestamp_ms,
        }
    }

    pub fn timestamp_ms(&self) -> f64 {
        match self {
            InputEvent::Scroll { timestamp_ms, .. } | InputEvent::ScrollEnd { timestamp_ms } => {
                *timestamp_ms
            }
        }
    }
}
