//! Transition driver
//!
//! Finite-state machine over `Idle` and `Transitioning`. A transition moves
//! every item from its displayed geometry to its slot target on a single
//! shared [`Timeline`], so all items start and finish on the same frame.
//!
//! Cards entering from `Hidden`, and cards leaving `StackedBelow` for
//! `Hidden`, first snap to an off-screen entry geometry so they never sweep
//! across the visible stack.

use deckflow_animation::{Easing, Timeline, TimelineClock, TrackId};
use deckflow_core::{checked_index, Geometry};

use crate::layout::SlotLayout;
use crate::navigation::Direction;
use crate::slot::{slot_for, Side, SlotKind};

/// Current state of the driver
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum TransitionState {
    /// Every item rests at its slot target
    #[default]
    Idle,
    /// Items are tweening towards the slots of `to_index`
    Transitioning {
        from_index: usize,
        to_index: usize,
        direction: Direction,
        started_at_ms: f64,
    },
}

impl TransitionState {
    pub fn is_active(&self) -> bool {
        matches!(self, TransitionState::Transitioning { .. })
    }
}

/// Identifies one started transition
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TransitionHandle {
    pub sequence: u64,
    pub from_index: usize,
    pub to_index: usize,
}

/// Parameters shared by every track of a transition
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionTiming {
    pub duration_ms: f64,
    pub easing: Easing,
}

/// Drives displayed geometry for every item of a deck
#[derive(Clone, Debug)]
pub struct TransitionDriver {
    state: TransitionState,
    timeline: Option<Timeline<Geometry>>,
    tracks: Vec<TrackId>,
    displayed: Vec<Geometry>,
    /// Side hidden cards park on, follows the last navigation direction
    park: Side,
    sequence: u64,
}

impl TransitionDriver {
    /// Create a driver with every item already resting in its slot
    pub fn new(layout: &SlotLayout, len: usize, current: usize) -> Self {
        let mut driver = Self {
            state: TransitionState::Idle,
            timeline: None,
            tracks: Vec::new(),
            displayed: vec![Geometry::default(); len],
            park: Side::Above,
            sequence: 0,
        };
        driver.place(layout, current);
        driver
    }

    pub fn state(&self) -> TransitionState {
        self.state
    }

    /// True while a transition holds the busy gate
    pub fn is_busy(&self) -> bool {
        self.state.is_active()
    }

    /// Geometry as of the last tick, indexed by deck position
    pub fn displayed(&self) -> &[Geometry] {
        &self.displayed
    }

    pub fn park_side(&self) -> Side {
        self.park
    }

    /// True if `handle` is the transition currently in flight
    pub fn is_current(&self, handle: &TransitionHandle) -> bool {
        self.is_busy() && handle.sequence == self.sequence
    }

    /// Snap every item to its resting target (zero duration)
    ///
    /// Cancels any transition in flight.
    pub fn place(&mut self, layout: &SlotLayout, current: usize) {
        let len = self.displayed.len();
        let current = checked_index(current, len);
        for (item, geometry) in self.displayed.iter_mut().enumerate() {
            *geometry = layout.target(slot_for(item, current, len), self.park);
        }
        self.state = TransitionState::Idle;
        self.timeline = None;
        self.tracks.clear();
    }

    /// Start a transition from `from` to `to`
    ///
    /// A transition already in flight is superseded: its current values
    /// become the new sources.
    pub fn begin(
        &mut self,
        layout: &SlotLayout,
        from: usize,
        to: usize,
        direction: Direction,
        now_ms: f64,
        timing: TransitionTiming,
    ) -> TransitionHandle {
        let len = self.displayed.len();
        let from = checked_index(from, len);
        let to = checked_index(to, len);

        let superseding = self.timeline.is_some();
        if let Some(timeline) = &self.timeline {
            tracing::debug!(
                "superseding transition at {:.0}% progress",
                timeline.progress(now_ms) * 100.0
            );
            self.displayed = timeline.sample(now_ms);
        }

        self.park = match direction {
            Direction::Advance => Side::Above,
            Direction::Retreat => Side::Below,
        };

        let mut timeline =
            Timeline::new(TimelineClock::new(now_ms, timing.duration_ms, timing.easing));
        self.tracks.clear();

        for (item, displayed) in self.displayed.iter_mut().enumerate() {
            let old_slot = slot_for(item, from, len);
            let new_slot = slot_for(item, to, len);
            let target = layout.target(new_slot, self.park);

            // A card still on screen from a superseded transition continues
            // from where it is
            let snap = !superseding || displayed.is_invisible();
            let mut source = match (old_slot, new_slot) {
                (SlotKind::Hidden, slot) if snap && slot.is_visible() => layout.entry(slot),
                (SlotKind::StackedBelow, SlotKind::Hidden) if snap => {
                    layout.entry(SlotKind::StackedBelow)
                }
                _ => *displayed,
            };
            source.stack_depth = target.stack_depth;

            *displayed = source;
            self.tracks.push(timeline.add(source, target));
        }

        self.timeline = Some(timeline);
        self.sequence += 1;
        self.state = TransitionState::Transitioning {
            from_index: from,
            to_index: to,
            direction,
            started_at_ms: now_ms,
        };

        TransitionHandle {
            sequence: self.sequence,
            from_index: from,
            to_index: to,
        }
    }

    /// Advance displayed geometry to `now_ms`
    ///
    /// Returns true on the tick that completes a transition.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let Some(timeline) = &self.timeline else {
            return false;
        };

        if timeline.is_complete(now_ms) {
            for (displayed, track) in self.displayed.iter_mut().zip(&self.tracks) {
                if let Some(target) = timeline.target(*track) {
                    *displayed = *target;
                }
            }
            self.timeline = None;
            self.tracks.clear();
            self.state = TransitionState::Idle;
            return true;
        }

        self.displayed = timeline.sample(now_ms);
        false
    }

    /// Recompute targets after a layout change, keeping the active index
    ///
    /// At rest this snaps immediately. In flight, the destinations are
    /// replaced and the transition keeps its clock.
    pub fn relayout(&mut self, layout: &SlotLayout, current: usize, now_ms: f64) {
        let len = self.displayed.len();
        let current = checked_index(current, len);

        if self.timeline.is_none() {
            self.place(layout, current);
            return;
        }

        let park = self.park;
        if let Some(timeline) = &mut self.timeline {
            for (item, track) in self.tracks.iter().enumerate() {
                timeline.retarget(*track, layout.target(slot_for(item, current, len), park));
            }
            self.displayed = timeline.sample(now_ms);
        }
    }
}
