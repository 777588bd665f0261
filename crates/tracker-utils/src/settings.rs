//! Application settings for watchlist front ends

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use stock_tracker::{Thresholds, TrackerConfig};

/// One watchlist entry; missing thresholds fall back to the defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchEntry {
    pub symbol: String,
    #[serde(default)]
    pub buy: Option<f64>,
    #[serde(default)]
    pub sell: Option<f64>,
}

impl WatchEntry {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            buy: None,
            sell: None,
        }
    }
}

/// Everything a front end needs to start tracking
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchSettings {
    /// Engine configuration
    pub tracker: TrackerConfig,
    /// Thresholds for entries that do not set their own
    pub thresholds: Thresholds,
    /// Symbols to register on startup
    pub watchlist: Vec<WatchEntry>,
}

impl WatchSettings {
    /// Load settings from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        let settings: Self = serde_json::from_str(&raw)
            .with_context(|| format!("invalid settings file {}", path.display()))?;
        settings.tracker.validate()?;
        Ok(settings)
    }

    /// Apply `TRACKER_*` environment overrides.
    ///
    /// `TRACKER_WATCHLIST` (comma separated) is appended to the watchlist.
    pub fn with_env(mut self) -> anyhow::Result<Self> {
        self.tracker = self.tracker.with_env()?;
        if let Ok(raw) = std::env::var("TRACKER_WATCHLIST") {
            self.extend_symbols(parse_symbol_list(&raw));
        }
        Ok(self)
    }

    /// Add symbols with default thresholds, skipping ones already listed
    pub fn extend_symbols(&mut self, symbols: impl IntoIterator<Item = String>) {
        for symbol in symbols {
            let exists = self
                .watchlist
                .iter()
                .any(|entry| entry.symbol.eq_ignore_ascii_case(&symbol));
            if !exists {
                self.watchlist.push(WatchEntry::new(symbol));
            }
        }
    }

    /// Watchlist entries paired with their effective thresholds
    pub fn entries(&self) -> Vec<(String, Thresholds)> {
        self.watchlist
            .iter()
            .map(|entry| {
                let thresholds = Thresholds::new(
                    entry.buy.unwrap_or(self.thresholds.buy),
                    entry.sell.unwrap_or(self.thresholds.sell),
                );
                (entry.symbol.clone(), thresholds)
            })
            .collect()
    }
}

/// Split a comma or whitespace separated symbol list
pub fn parse_symbol_list(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
