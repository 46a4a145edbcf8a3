//! Deckflow configuration file handling
//!
//! `deckflow.toml` holds the carousel settings plus the deck and viewport
//! used by the CLI:
//!
//! ```toml
//! [deck]
//! labels = ["Mountain Scene", "Ocean Waves", "Forest Path"]
//!
//! [viewport]
//! width = 1280.0
//! height = 800.0
//!
//! [carousel]
//! gap = 3.0
//! transition_duration_ms = 500.0
//! ```

use anyhow::{Context, Result};
use deckflow_carousel::{CarouselConfig, Deck, ViewportMetrics};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default file name looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "deckflow.toml";

/// Contents of `deckflow.toml`
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DeckflowConfig {
    pub deck: DeckConfig,
    pub viewport: ViewportMetrics,
    pub carousel: CarouselConfig,
}

/// Deck contents
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Card labels; when empty, `carousel.item_count` numbered cards are used
    pub labels: Vec<String>,
}

impl DeckflowConfig {
    /// Load from an explicit path
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Load from `path` if given, else from `deckflow.toml` when present,
    /// else fall back to defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            return Self::load(default_path);
        }

        tracing::info!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
        Ok(Self::default())
    }

    /// Parse and validate TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: DeckflowConfig = toml::from_str(content)?;
        config.carousel.validate()?;
        Ok(config)
    }

    /// Build the deck described by this config
    pub fn deck(&self) -> Result<Deck> {
        let deck = if self.deck.labels.is_empty() {
            Deck::numbered(self.carousel.item_count)?
        } else {
            Deck::with_labels(self.deck.labels.iter().cloned())?
        };
        Ok(deck)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize deckflow config")
    }
}
