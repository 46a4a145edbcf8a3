//! Slot classification
//!
//! Maps an item's position relative to the active index onto one of five
//! visual slots. For decks with fewer than four items several positions
//! coincide; ties resolve in priority order Expanded, StackedAbove1,
//! StackedBelow, StackedAbove2, Hidden, so no slot is ever held twice.

use deckflow_core::{checked_index, relative_position};
use serde::{Deserialize, Serialize};

/// Visual role of an item for a given active index
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    /// The focused card, centered at full size
    Expanded,
    /// Directly above the expanded card
    StackedAbove1,
    /// Above the first stacked tier
    StackedAbove2,
    /// Directly below the expanded card
    StackedBelow,
    /// Parked off-screen with zero size and opacity
    Hidden,
}

/// Which side of the deck a slot enters from or parks on
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Side {
    #[default]
    Above,
    Below,
}

impl SlotKind {
    pub fn is_visible(&self) -> bool {
        !matches!(self, SlotKind::Hidden)
    }

    /// Side a card enters from when it becomes visible in this slot
    pub fn entry_side(&self) -> Side {
        match self {
            SlotKind::StackedBelow => Side::Below,
            SlotKind::Expanded
            | SlotKind::StackedAbove1
            | SlotKind::StackedAbove2
            | SlotKind::Hidden => Side::Above,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SlotKind::Expanded => "expanded",
            SlotKind::StackedAbove1 => "stacked_above1",
            SlotKind::StackedAbove2 => "stacked_above2",
            SlotKind::StackedBelow => "stacked_below",
            SlotKind::Hidden => "hidden",
        }
    }
}

/// Classify a relative position in `[0, len)`
pub fn classify(relative: usize, len: usize) -> SlotKind {
    let relative = checked_index(relative, len);

    if relative == 0 {
        SlotKind::Expanded
    } else if relative == len - 1 {
        SlotKind::StackedAbove1
    } else if relative == 1 {
        SlotKind::StackedBelow
    } else if relative == len - 2 {
        SlotKind::StackedAbove2
    } else {
        SlotKind::Hidden
    }
}

/// Slot of the item at `item` when `current` is active
pub fn slot_for(item: usize, current: usize, len: usize) -> SlotKind {
    classify(relative_position(item, current, len), len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(len: usize, current: usize, kind: SlotKind) -> usize {
        (0..len)
            .filter(|&item| slot_for(item, current, len) == kind)
            .count()
    }

    #[test]
    fn test_exactly_one_expanded() {
        for len in 1..=12 {
            for current in 0..len {
                assert_eq!(count(len, current, SlotKind::Expanded), 1);
                assert_eq!(slot_for(current, current, len), SlotKind::Expanded);
            }
        }
    }

    #[test]
    fn test_visible_slots_never_shared() {
        let visible = [
            SlotKind::StackedAbove1,
            SlotKind::StackedAbove2,
            SlotKind::StackedBelow,
        ];
        for len in 1..=12 {
            for current in 0..len {
                for kind in visible {
                    assert!(
                        count(len, current, kind) <= 1,
                        "{:?} in deck of {}",
                        kind,
                        len
                    );
                }
            }
        }
    }

    #[test]
    fn test_table_for_large_deck() {
        assert_eq!(classify(0, 6), SlotKind::Expanded);
        assert_eq!(classify(5, 6), SlotKind::StackedAbove1);
        assert_eq!(classify(4, 6), SlotKind::StackedAbove2);
        assert_eq!(classify(1, 6), SlotKind::StackedBelow);
        assert_eq!(classify(2, 6), SlotKind::Hidden);
        assert_eq!(classify(3, 6), SlotKind::Hidden);
    }

    #[test]
    fn test_small_deck_ties() {
        assert_eq!(classify(0, 1), SlotKind::Expanded);

        assert_eq!(classify(1, 2), SlotKind::StackedAbove1);

        assert_eq!(classify(1, 3), SlotKind::StackedBelow);
        assert_eq!(classify(2, 3), SlotKind::StackedAbove1);

        assert_eq!(classify(1, 4), SlotKind::StackedBelow);
        assert_eq!(classify(2, 4), SlotKind::StackedAbove2);
        assert_eq!(classify(3, 4), SlotKind::StackedAbove1);
    }

    #[test]
    fn test_previous_expanded_moves_above_after_advance() {
        assert_eq!(slot_for(0, 1, 6), SlotKind::StackedAbove1);
        assert_eq!(slot_for(2, 1, 6), SlotKind::StackedBelow);
    }

    #[test]
    fn test_names_match_serialized_form() {
        for kind in [
            SlotKind::Expanded,
            SlotKind::StackedAbove1,
            SlotKind::StackedAbove2,
            SlotKind::StackedBelow,
            SlotKind::Hidden,
        ] {
            assert_eq!(serde_json::to_value(kind).unwrap(), kind.as_str());
        }
    }
}
