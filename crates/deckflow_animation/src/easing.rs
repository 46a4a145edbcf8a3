//! Easing curves
//!
//! All curves map progress `t` in `0.0..=1.0` to eased progress with
//! `f(0) = 0` and `f(1) = 1`. Input outside the range is clamped.

use serde::{Deserialize, Serialize};

/// Easing function applied to a transition's progress
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant speed
    Linear,
    /// Cubic acceleration
    EaseIn,
    /// Cubic deceleration
    EaseOut,
    /// Cubic acceleration then deceleration
    #[default]
    EaseInOut,
    EaseInQuad,
    /// Quadratic deceleration
    EaseOutQuad,
    /// Quadratic in-out
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
}

impl Easing {
    /// Apply the curve to a progress value
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn | Easing::EaseInCubic => t * t * t,
            Easing::EaseOut | Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut | Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }

    /// Every supported curve, in declaration order
    pub const ALL: [Easing; 10] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::EaseInQuad,
        Easing::EaseOutQuad,
        Easing::EaseInOutQuad,
        Easing::EaseInCubic,
        Easing::EaseOutCubic,
        Easing::EaseInOutCubic,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        for easing in Easing::ALL {
            assert!(easing.apply(0.0).abs() < 1e-6, "{:?} at 0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{:?} at 1", easing);
        }
    }

    #[test]
    fn test_clamps_input() {
        assert_eq!(Easing::Linear.apply(-0.5), 0.0);
        assert_eq!(Easing::Linear.apply(1.5), 1.0);
    }

    #[test]
    fn test_curve_shapes() {
        assert!((Easing::Linear.apply(0.5) - 0.5).abs() < 1e-6);
        assert!(Easing::EaseIn.apply(0.5) < 0.5);
        assert!(Easing::EaseOut.apply(0.5) > 0.5);
        assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < 1e-6);
        assert!((Easing::EaseOutQuad.apply(0.5) - 0.75).abs() < 1e-6);
        assert!((Easing::EaseInOutQuad.apply(0.25) - 0.125).abs() < 1e-6);
    }

    #[test]
    fn test_monotonic() {
        for easing in Easing::ALL {
            let mut prev = 0.0;
            for step in 1..=100 {
                let v = easing.apply(step as f32 / 100.0);
                assert!(v + 1e-6 >= prev, "{:?} decreased at step {}", easing, step);
                prev = v;
            }
        }
    }
}
