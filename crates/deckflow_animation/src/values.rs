//! Animatable value types
//!
//! Provides the interpolation trait used by timelines, with implementations
//! for plain floats and full item geometry.

use deckflow_core::Geometry;

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

// ============================================================================
// f32 Implementation
// ============================================================================

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

// ============================================================================
// Geometry Implementation
// ============================================================================

impl Interpolate for Geometry {
    /// Continuous fields are interpolated. Stacking order is discrete and
    /// takes the destination value as soon as the tween has started.
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Geometry {
            y_offset: self.y_offset.lerp(&other.y_offset, t),
            width: self.width.lerp(&other.width, t),
            height: self.height.lerp(&other.height, t),
            opacity: self.opacity.lerp(&other.opacity, t),
            stack_depth: if t > 0.0 {
                other.stack_depth
            } else {
                self.stack_depth
            },
        }
    }
}
