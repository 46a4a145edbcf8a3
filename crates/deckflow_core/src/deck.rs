//! Deck model
//!
//! A [`Deck`] is a fixed, circular, ordered list of [`Item`]s. Order never
//! changes for the deck's lifetime; the carousel only rotates which item is
//! considered active.

use std::fmt;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Stable identity of an item, used to address its rendering handle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A card in the deck
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    /// Display label, not interpreted by the carousel
    pub label: String,
}

impl Item {
    pub fn new(id: u64, label: impl Into<String>) -> Self {
        Self {
            id: ItemId(id),
            label: label.into(),
        }
    }
}

/// Fixed-length circular sequence of items (N >= 1)
#[derive(Clone, Debug, PartialEq)]
pub struct Deck {
    items: Vec<Item>,
}

impl Deck {
    /// Build a deck, rejecting empty input and duplicate ids
    pub fn new(items: Vec<Item>) -> Result<Self> {
        if items.is_empty() {
            return Err(ConfigError::EmptyDeck(0));
        }

        let mut seen = FxHashSet::default();
        for item in &items {
            if !seen.insert(item.id) {
                return Err(ConfigError::DuplicateItem(item.id.0));
            }
        }

        Ok(Self { items })
    }

    /// Build a deck from labels, numbering ids from 1
    pub fn with_labels<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = labels
            .into_iter()
            .enumerate()
            .map(|(i, label)| Item::new(i as u64 + 1, label))
            .collect();
        Self::new(items)
    }

    /// Build a deck of `count` items labelled "Card 1", "Card 2", ...
    pub fn numbered(count: usize) -> Result<Self> {
        if count == 0 {
            return Err(ConfigError::EmptyDeck(count));
        }
        Self::with_labels((1..=count).map(|i| format!("Card {}", i)))
    }

    /// Number of items (always >= 1)
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false; present for API symmetry with slices
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Index of the item with the given id
    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.iter().map(|item| item.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_deck_rejected() {
        assert_eq!(Deck::new(Vec::new()), Err(ConfigError::EmptyDeck(0)));
        assert_eq!(Deck::numbered(0), Err(ConfigError::EmptyDeck(0)));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let items = vec![Item::new(1, "a"), Item::new(2, "b"), Item::new(1, "c")];
        assert_eq!(Deck::new(items), Err(ConfigError::DuplicateItem(1)));
    }

    #[test]
    fn test_large_deck_duplicate_at_end() {
        let mut items: Vec<Item> = (0..10_000).map(|i| Item::new(i, "card")).collect();
        assert_eq!(Deck::new(items.clone()).unwrap().len(), 10_000);

        items.push(Item::new(4_321, "again"));
        assert_eq!(Deck::new(items), Err(ConfigError::DuplicateItem(4_321)));
    }

    #[test]
    fn test_with_labels_numbers_from_one() {
        let deck = Deck::with_labels(["Mountain Scene", "Ocean Waves"]).unwrap();
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.get(0).unwrap().id, ItemId(1));
        assert_eq!(deck.get(1).unwrap().label, "Ocean Waves");
        assert_eq!(deck.position(ItemId(2)), Some(1));
        assert_eq!(deck.position(ItemId(9)), None);
    }
}
