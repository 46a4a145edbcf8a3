//! Carousel configuration
//!
//! Every field has a default, so a partial TOML table is a valid config:
//!
//! ```toml
//! item_count = 8
//! gap = 8.0
//! transition_duration_ms = 900.0
//! easing = "linear"
//!
//! [rate_limit]
//! policy = "cooldown"
//! cooldown_ms = 500.0
//! min_magnitude = 20.0
//! ```

use deckflow_animation::Easing;
use deckflow_core::{ConfigError, Size};
use serde::{Deserialize, Serialize};

/// Default cooldown between accepted wheel events
pub const DEFAULT_COOLDOWN_MS: f64 = 500.0;
/// Default minimum `|deltaY|` for the cooldown policy
pub const DEFAULT_MIN_MAGNITUDE: f32 = 20.0;
/// Default accumulated `|deltaY|` needed to navigate
pub const DEFAULT_ACCUMULATOR_THRESHOLD: f32 = 50.0;
/// Default idle gap after which the accumulator resets
pub const DEFAULT_ACCUMULATOR_GAP_MS: f64 = 150.0;
/// Default quiet window for the trailing debounce policy
pub const DEFAULT_DEBOUNCE_MS: f64 = 30.0;

// ============================================================================
// Input Policies
// ============================================================================

/// How raw wheel deltas are turned into navigation commands
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum RateLimitPolicy {
    /// Accept at most one event per `cooldown_ms`, ignoring small deltas
    Cooldown {
        #[serde(default = "default_cooldown_ms")]
        cooldown_ms: f64,
        #[serde(default = "default_min_magnitude")]
        min_magnitude: f32,
    },
    /// Sum `|deltaY|` until it reaches `threshold`; the sum resets after
    /// `gap_ms` without events
    Accumulator {
        #[serde(default = "default_accumulator_threshold")]
        threshold: f32,
        #[serde(default = "default_accumulator_gap_ms")]
        gap_ms: f64,
    },
    /// Navigate once the wheel has been quiet for `window_ms`
    Debounce {
        #[serde(default = "default_debounce_ms")]
        window_ms: f64,
    },
}

fn default_cooldown_ms() -> f64 {
    DEFAULT_COOLDOWN_MS
}

fn default_min_magnitude() -> f32 {
    DEFAULT_MIN_MAGNITUDE
}

fn default_accumulator_threshold() -> f32 {
    DEFAULT_ACCUMULATOR_THRESHOLD
}

fn default_accumulator_gap_ms() -> f64 {
    DEFAULT_ACCUMULATOR_GAP_MS
}

fn default_debounce_ms() -> f64 {
    DEFAULT_DEBOUNCE_MS
}

impl RateLimitPolicy {
    /// Cooldown policy with default thresholds
    pub fn cooldown() -> Self {
        RateLimitPolicy::Cooldown {
            cooldown_ms: DEFAULT_COOLDOWN_MS,
            min_magnitude: DEFAULT_MIN_MAGNITUDE,
        }
    }

    /// Accumulator policy with default thresholds
    pub fn accumulator() -> Self {
        RateLimitPolicy::Accumulator {
            threshold: DEFAULT_ACCUMULATOR_THRESHOLD,
            gap_ms: DEFAULT_ACCUMULATOR_GAP_MS,
        }
    }

    /// Trailing debounce with the default window
    pub fn debounce() -> Self {
        RateLimitPolicy::Debounce {
            window_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self::accumulator()
    }
}

/// What happens to navigation while a transition is in flight
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusyGatePolicy {
    /// Discard the command (and the wheel event that produced it)
    #[default]
    Drop,
    /// Start a new transition from the currently displayed geometry
    Supersede,
}

// ============================================================================
// Slot Styling
// ============================================================================

/// Which width the card below the expanded card uses
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BelowWidth {
    /// Same width as the expanded card
    #[default]
    Expanded,
    /// Same width as the first stacked tier
    Stacked,
}

/// Opacity and stacking order of one slot
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlotStyle {
    pub opacity: f32,
    pub stack_depth: i32,
}

impl SlotStyle {
    pub const fn new(opacity: f32, stack_depth: i32) -> Self {
        Self {
            opacity,
            stack_depth,
        }
    }
}

/// Styles for every slot kind
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotStyles {
    pub expanded: SlotStyle,
    pub above1: SlotStyle,
    pub above2: SlotStyle,
    pub below: SlotStyle,
    pub hidden: SlotStyle,
}

impl Default for SlotStyles {
    fn default() -> Self {
        Self {
            expanded: SlotStyle::new(1.0, 30),
            above1: SlotStyle::new(0.8, 20),
            above2: SlotStyle::new(0.6, 10),
            below: SlotStyle::new(0.8, 20),
            hidden: SlotStyle::new(0.0, 1),
        }
    }
}

// ============================================================================
// Carousel Configuration
// ============================================================================

/// Complete carousel configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Number of cards when the deck is built from the config
    pub item_count: usize,
    /// Size of the focused card
    pub expanded: Size,
    /// Sizes of the first and second stacked tiers
    pub stacked: [Size; 2],
    /// Space between the edges of neighbouring cards
    pub gap: f32,
    pub below_width: BelowWidth,
    /// Distance beyond the outermost visible edge where hidden cards park
    pub hidden_overshoot: f32,
    /// Horizontal space kept free on both sides of the viewport
    pub horizontal_padding: f32,
    pub styles: SlotStyles,
    pub transition_duration_ms: f64,
    pub easing: Easing,
    pub rate_limit: RateLimitPolicy,
    pub busy_gate: BusyGatePolicy,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            item_count: 6,
            expanded: Size::new(1024.0, 320.0),
            stacked: [Size::new(768.0, 48.0), Size::new(640.0, 24.0)],
            gap: 3.0,
            below_width: BelowWidth::Expanded,
            hidden_overshoot: 100.0,
            horizontal_padding: 16.0,
            styles: SlotStyles::default(),
            transition_duration_ms: 500.0,
            easing: Easing::EaseOutQuad,
            rate_limit: RateLimitPolicy::default(),
            busy_gate: BusyGatePolicy::Drop,
        }
    }
}

impl CarouselConfig {
    /// Check the configuration, failing on the first invalid field
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.item_count < 1 {
            return Err(ConfigError::EmptyDeck(self.item_count));
        }

        check_size("expanded", self.expanded)?;
        check_size("stacked[0]", self.stacked[0])?;
        check_size("stacked[1]", self.stacked[1])?;

        check_non_negative("gap", self.gap as f64)?;
        check_non_negative("hidden_overshoot", self.hidden_overshoot as f64)?;
        check_non_negative("horizontal_padding", self.horizontal_padding as f64)?;
        check_non_negative("transition_duration_ms", self.transition_duration_ms)?;

        check_opacity("styles.expanded", self.styles.expanded.opacity)?;
        check_opacity("styles.above1", self.styles.above1.opacity)?;
        check_opacity("styles.above2", self.styles.above2.opacity)?;
        check_opacity("styles.below", self.styles.below.opacity)?;
        check_opacity("styles.hidden", self.styles.hidden.opacity)?;

        match self.rate_limit {
            RateLimitPolicy::Cooldown {
                cooldown_ms,
                min_magnitude,
            } => {
                check_non_negative("rate_limit.cooldown_ms", cooldown_ms)?;
                check_non_negative("rate_limit.min_magnitude", min_magnitude as f64)?;
            }
            RateLimitPolicy::Accumulator { threshold, gap_ms } => {
                check_non_negative("rate_limit.threshold", threshold as f64)?;
                check_non_negative("rate_limit.gap_ms", gap_ms)?;
            }
            RateLimitPolicy::Debounce { window_ms } => {
                check_non_negative("rate_limit.window_ms", window_ms)?;
            }
        }

        Ok(())
    }
}

fn check_size(field: &'static str, size: Size) -> Result<(), ConfigError> {
    for value in [size.width, size.height] {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::InvalidSize { field, value });
        }
    }
    Ok(())
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidValue { field, value });
    }
    Ok(())
}

fn check_opacity(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::InvalidOpacity { field, value });
    }
    Ok(())
}
