//! Synchronized timelines
//!
//! A [`Timeline`] drives any number of tracks from one [`TimelineClock`].
//! Tracks cannot carry their own duration or delay, so every track in a
//! timeline starts and finishes on the same frame.

use crate::easing::Easing;
use crate::values::Interpolate;

/// Index of a track within its timeline
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TrackId(usize);

impl TrackId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Shared start time, duration and easing of a timeline
///
/// Times are milliseconds on the caller's monotonic clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimelineClock {
    started_at_ms: f64,
    duration_ms: f64,
    easing: Easing,
}

impl TimelineClock {
    pub fn new(started_at_ms: f64, duration_ms: f64, easing: Easing) -> Self {
        Self {
            started_at_ms,
            duration_ms: duration_ms.max(0.0),
            easing,
        }
    }

    pub fn started_at_ms(&self) -> f64 {
        self.started_at_ms
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Raw progress (0.0 to 1.0) at `now_ms`
    pub fn progress(&self, now_ms: f64) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.started_at_ms) / self.duration_ms).clamp(0.0, 1.0) as f32
    }

    /// Eased progress at `now_ms`
    pub fn eased(&self, now_ms: f64) -> f32 {
        self.easing.apply(self.progress(now_ms))
    }

    pub fn is_complete(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }
}

#[derive(Clone, Debug)]
struct Track<T: Interpolate> {
    from: T,
    to: T,
}

/// A set of value tracks sharing one clock
#[derive(Clone, Debug)]
pub struct Timeline<T: Interpolate> {
    clock: TimelineClock,
    tracks: Vec<Track<T>>,
}

impl<T: Interpolate> Timeline<T> {
    /// Create an empty timeline
    pub fn new(clock: TimelineClock) -> Self {
        Self {
            clock,
            tracks: Vec::new(),
        }
    }

    /// Add a track interpolating `from` to `to`
    pub fn add(&mut self, from: T, to: T) -> TrackId {
        self.tracks.push(Track { from, to });
        TrackId(self.tracks.len() - 1)
    }

    pub fn clock(&self) -> &TimelineClock {
        &self.clock
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Source value of a track
    pub fn from(&self, id: TrackId) -> Option<&T> {
        self.tracks.get(id.0).map(|track| &track.from)
    }

    /// Destination value of a track
    pub fn target(&self, id: TrackId) -> Option<&T> {
        self.tracks.get(id.0).map(|track| &track.to)
    }

    /// Replace a track's destination without touching the clock
    pub fn retarget(&mut self, id: TrackId, to: T) {
        if let Some(track) = self.tracks.get_mut(id.0) {
            track.to = to;
        }
    }

    /// Value of a single track at `now_ms`
    pub fn value(&self, id: TrackId, now_ms: f64) -> Option<T> {
        let t = self.clock.eased(now_ms);
        self.tracks
            .get(id.0)
            .map(|track| track.from.lerp(&track.to, t))
    }

    /// Values of every track at `now_ms`, in insertion order
    pub fn sample(&self, now_ms: f64) -> Vec<T> {
        let t = self.clock.eased(now_ms);
        self.tracks
            .iter()
            .map(|track| track.from.lerp(&track.to, t))
            .collect()
    }

    pub fn progress(&self, now_ms: f64) -> f32 {
        self.clock.progress(now_ms)
    }

    pub fn is_complete(&self, now_ms: f64) -> bool {
        self.clock.is_complete(now_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_progress() {
        let clock = TimelineClock::new(100.0, 500.0, Easing::Linear);
        assert_eq!(clock.progress(50.0), 0.0);
        assert!((clock.progress(350.0) - 0.5).abs() < 1e-6);
        assert_eq!(clock.progress(600.0), 1.0);
        assert!(clock.is_complete(600.0));
        assert!(!clock.is_complete(599.0));
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let clock = TimelineClock::new(0.0, 0.0, Easing::EaseInOut);
        assert_eq!(clock.progress(0.0), 1.0);
        assert!(clock.is_complete(0.0));
    }

    #[test]
    fn test_tracks_share_clock() {
        let mut timeline = Timeline::new(TimelineClock::new(0.0, 1000.0, Easing::Linear));
        let a = timeline.add(0.0_f32, 100.0);
        let b = timeline.add(50.0_f32, -50.0);

        assert_eq!(timeline.track_count(), 2);
        assert!((timeline.value(a, 250.0).unwrap() - 25.0).abs() < 1e-4);
        assert!((timeline.value(b, 250.0).unwrap() - 25.0).abs() < 1e-4);

        let end = timeline.sample(1000.0);
        assert!((end[0] - 100.0).abs() < 1e-4);
        assert!((end[1] - -50.0).abs() < 1e-4);
        assert!(timeline.is_complete(1000.0));
    }

    #[test]
    fn test_retarget_keeps_clock() {
        let mut timeline = Timeline::new(TimelineClock::new(0.0, 100.0, Easing::Linear));
        let id = timeline.add(0.0_f32, 10.0);
        timeline.retarget(id, 20.0);

        assert_eq!(timeline.target(id), Some(&20.0));
        assert_eq!(timeline.from(id), Some(&0.0));
        assert!((timeline.value(id, 50.0).unwrap() - 10.0).abs() < 1e-4);
    }
}
