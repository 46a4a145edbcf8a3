//! Wheel navigation
//!
//! Turns a stream of raw wheel deltas into discrete navigation commands
//! using one of the [`RateLimitPolicy`] variants. The busy gate is applied by
//! the carousel before events reach the controller.

use crate::config::RateLimitPolicy;

/// Direction of a navigation step
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Positive wheel delta, `next = (current + 1) mod N`
    Advance,
    /// Negative wheel delta, `next = (current - 1 + N) mod N`
    Retreat,
}

impl Direction {
    /// Direction for a wheel delta, or `None` for a zero delta
    pub fn from_delta(delta_y: f32) -> Option<Self> {
        if delta_y > 0.0 {
            Some(Direction::Advance)
        } else if delta_y < 0.0 {
            Some(Direction::Retreat)
        } else {
            None
        }
    }

    /// Index step for this direction
    pub fn step(&self) -> i64 {
        match self {
            Direction::Advance => 1,
            Direction::Retreat => -1,
        }
    }

    pub fn reverse(&self) -> Self {
        match self {
            Direction::Advance => Direction::Retreat,
            Direction::Retreat => Direction::Advance,
        }
    }
}

/// A navigation request produced from wheel input
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavigationCommand {
    pub direction: Direction,
    /// Time of the event (or debounce expiry) that produced the command
    pub timestamp_ms: f64,
}

#[derive(Clone, Debug, PartialEq)]
enum LimiterState {
    Cooldown {
        cooldown_ms: f64,
        min_magnitude: f32,
        last_accepted_ms: Option<f64>,
    },
    Accumulator {
        threshold: f32,
        gap_ms: f64,
        sum: f32,
        last_event_ms: Option<f64>,
    },
    Debounce {
        window_ms: f64,
        /// Latest direction and the time the quiet window expires
        pending: Option<(Direction, f64)>,
    },
}

impl LimiterState {
    fn from_policy(policy: RateLimitPolicy) -> Self {
        match policy {
            RateLimitPolicy::Cooldown {
                cooldown_ms,
                min_magnitude,
            } => LimiterState::Cooldown {
                cooldown_ms,
                min_magnitude,
                last_accepted_ms: None,
            },
            RateLimitPolicy::Accumulator { threshold, gap_ms } => LimiterState::Accumulator {
                threshold,
                gap_ms,
                sum: 0.0,
                last_event_ms: None,
            },
            RateLimitPolicy::Debounce { window_ms } => LimiterState::Debounce {
                window_ms,
                pending: None,
            },
        }
    }
}

/// Rate-limited wheel-to-navigation converter
#[derive(Clone, Debug)]
pub struct NavigationController {
    policy: RateLimitPolicy,
    state: LimiterState,
}

impl NavigationController {
    pub fn new(policy: RateLimitPolicy) -> Self {
        Self {
            policy,
            state: LimiterState::from_policy(policy),
        }
    }

    pub fn policy(&self) -> RateLimitPolicy {
        self.policy
    }

    /// Forget accumulated input, pending debounces and cooldowns
    pub fn reset(&mut self) {
        self.state = LimiterState::from_policy(self.policy);
    }

    /// Feed one wheel event
    ///
    /// Returns a command when the event is accepted. The debounce policy
    /// never answers here; see [`poll`](Self::poll).
    pub fn on_wheel(&mut self, delta_y: f32, now_ms: f64) -> Option<NavigationCommand> {
        let direction = Direction::from_delta(delta_y)?;

        match &mut self.state {
            LimiterState::Cooldown {
                cooldown_ms,
                min_magnitude,
                last_accepted_ms,
            } => {
                if delta_y.abs() < *min_magnitude {
                    tracing::trace!("wheel delta {} below magnitude threshold", delta_y);
                    return None;
                }
                if let Some(last) = *last_accepted_ms {
                    if now_ms - last < *cooldown_ms {
                        tracing::trace!("wheel event {}ms after last, cooling down", now_ms - last);
                        return None;
                    }
                }
                *last_accepted_ms = Some(now_ms);
            }

            LimiterState::Accumulator {
                threshold,
                gap_ms,
                sum,
                last_event_ms,
            } => {
                if let Some(last) = *last_event_ms {
                    if now_ms - last > *gap_ms {
                        *sum = 0.0;
                    }
                }
                *last_event_ms = Some(now_ms);
                *sum += delta_y.abs();

                if *sum < *threshold {
                    tracing::trace!("wheel accumulator at {}/{}", sum, threshold);
                    return None;
                }
                *sum = 0.0;
            }

            LimiterState::Debounce { window_ms, pending } => {
                *pending = Some((direction, now_ms + *window_ms));
                return None;
            }
        }

        Some(NavigationCommand {
            direction,
            timestamp_ms: now_ms,
        })
    }

    /// Check time-based policies; call once per frame
    pub fn poll(&mut self, now_ms: f64) -> Option<NavigationCommand> {
        let LimiterState::Debounce { pending, .. } = &mut self.state else {
            return None;
        };

        let (direction, deadline) = (*pending)?;
        if now_ms < deadline {
            return None;
        }
        *pending = None;
        Some(NavigationCommand {
            direction,
            timestamp_ms: deadline,
        })
    }

    /// Running `|deltaY|` sum of the accumulator policy (0 for other policies)
    pub fn accumulated(&self) -> f32 {
        match self.state {
            LimiterState::Accumulator { sum, .. } => sum,
            _ => 0.0,
        }
    }

    /// True while a debounced command is waiting for its quiet window
    pub fn has_pending(&self) -> bool {
        matches!(
            self.state,
            LimiterState::Debounce {
                pending: Some(_),
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accumulator() -> NavigationController {
        NavigationController::new(RateLimitPolicy::Accumulator {
            threshold: 50.0,
            gap_ms: 150.0,
        })
    }

    #[test]
    fn test_direction_from_delta() {
        assert_eq!(Direction::from_delta(3.0), Some(Direction::Advance));
        assert_eq!(Direction::from_delta(-0.5), Some(Direction::Retreat));
        assert_eq!(Direction::from_delta(0.0), None);
        assert_eq!(Direction::Advance.reverse(), Direction::Retreat);
    }

    #[test]
    fn test_accumulator_below_threshold() {
        let mut nav = accumulator();
        // 20 + 20 + 9 = 49 = threshold - 1
        assert_eq!(nav.on_wheel(20.0, 0.0), None);
        assert_eq!(nav.on_wheel(20.0, 10.0), None);
        assert_eq!(nav.on_wheel(9.0, 20.0), None);
        assert!((nav.accumulated() - 49.0).abs() < 1e-6);
    }

    #[test]
    fn test_accumulator_fires_once_and_resets() {
        let mut nav = accumulator();
        assert_eq!(nav.on_wheel(20.0, 0.0), None);
        assert_eq!(nav.on_wheel(20.0, 10.0), None);

        let command = nav.on_wheel(10.0, 20.0).unwrap();
        assert_eq!(command.direction, Direction::Advance);
        assert_eq!(command.timestamp_ms, 20.0);
        assert_eq!(nav.accumulated(), 0.0);

        assert_eq!(nav.on_wheel(30.0, 30.0), None);
    }

    #[test]
    fn test_accumulator_uses_magnitude_and_last_sign() {
        let mut nav = accumulator();
        assert_eq!(nav.on_wheel(30.0, 0.0), None);
        let command = nav.on_wheel(-30.0, 5.0).unwrap();
        assert_eq!(command.direction, Direction::Retreat);
    }

    #[test]
    fn test_accumulator_resets_after_gap() {
        let mut nav = accumulator();
        assert_eq!(nav.on_wheel(40.0, 0.0), None);
        assert_eq!(nav.on_wheel(40.0, 151.0), None);
        assert!((nav.accumulated() - 40.0).abs() < 1e-6);
        assert!(nav.on_wheel(10.0, 200.0).is_some());
    }

    #[test]
    fn test_cooldown_accepts_one_of_two_close_events() {
        let mut nav = NavigationController::new(RateLimitPolicy::Cooldown {
            cooldown_ms: 500.0,
            min_magnitude: 20.0,
        });

        let accepted = [nav.on_wheel(100.0, 1000.0), nav.on_wheel(100.0, 1010.0)]
            .iter()
            .filter(|c| c.is_some())
            .count();
        assert_eq!(accepted, 1);

        assert!(nav.on_wheel(100.0, 1500.0).is_some());
    }

    #[test]
    fn test_cooldown_ignores_small_deltas() {
        let mut nav = NavigationController::new(RateLimitPolicy::cooldown());
        assert_eq!(nav.on_wheel(19.0, 0.0), None);
        // A rejected small event does not start the cooldown
        assert!(nav.on_wheel(-25.0, 1.0).is_some());
    }

    #[test]
    fn test_debounce_fires_after_quiet_window() {
        let mut nav = NavigationController::new(RateLimitPolicy::Debounce { window_ms: 30.0 });

        assert_eq!(nav.on_wheel(5.0, 0.0), None);
        assert_eq!(nav.on_wheel(-5.0, 20.0), None);
        assert!(nav.has_pending());

        assert_eq!(nav.poll(45.0), None);
        let command = nav.poll(50.0).unwrap();
        assert_eq!(command.direction, Direction::Retreat);
        assert_eq!(command.timestamp_ms, 50.0);

        assert!(!nav.has_pending());
        assert_eq!(nav.poll(100.0), None);
    }

    #[test]
    fn test_zero_delta_ignored_and_reset() {
        let mut nav = accumulator();
        assert_eq!(nav.on_wheel(0.0, 0.0), None);
        assert_eq!(nav.on_wheel(45.0, 1.0), None);
        nav.reset();
        assert_eq!(nav.accumulated(), 0.0);
        assert_eq!(nav.poll(10.0), None);
    }
}
