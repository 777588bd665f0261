//! Watchlist store and per-symbol refresh

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::alert::Alert;
use crate::api::PriceSource;
use crate::config::TrackerConfig;
use crate::error::{Result, TrackerError};
use crate::history::PricePoint;
use crate::record::{Thresholds, TrackedStock, normalize_symbol};
use crate::signal::{Recommendation, classify};
use crate::snapshot::StockSnapshot;

/// Tracks a watchlist of symbols against a price source
///
/// All record mutations go through a single store lock. Network calls are
/// made with the lock released, and a fetched sample is applied to its
/// record in one critical section, so readers never see a price without
/// its timestamp.
pub struct StockTracker {
    source: Arc<dyn PriceSource>,
    config: TrackerConfig,
    pub(crate) stocks: Mutex<HashMap<String, TrackedStock>>,
    pub(crate) batch_gate: Mutex<()>,
}

impl StockTracker {
    /// Create a tracker with default configuration
    pub fn new(source: Arc<dyn PriceSource>) -> Self {
        Self::with_config(source, TrackerConfig::default())
    }

    /// Create a tracker with explicit configuration
    pub fn with_config(source: Arc<dyn PriceSource>, config: TrackerConfig) -> Self {
        Self {
            source,
            config,
            stocks: Mutex::new(HashMap::new()),
            batch_gate: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Start tracking a symbol.
    ///
    /// The symbol is normalised, checked against the watchlist and probed at
    /// the price source. On any failure the store is left unchanged.
    pub async fn register(&self, symbol: &str, thresholds: Thresholds) -> Result<String> {
        let symbol = normalize_symbol(symbol, self.config.max_symbol_len)?;

        if self.stocks.lock().await.contains_key(&symbol) {
            return Err(TrackerError::DuplicateSymbol(symbol));
        }

        match self.source.symbol_exists(&symbol).await {
            Ok(true) => {}
            Ok(false) => return Err(TrackerError::InvalidSymbol(symbol)),
            Err(e) => {
                warn!("Existence probe for {} failed: {}", symbol, e);
                return Err(TrackerError::InvalidSymbol(symbol));
            }
        }

        for warning in thresholds.warnings() {
            warn!("{}: {}", symbol, warning);
        }

        let mut stocks = self.stocks.lock().await;
        if stocks.contains_key(&symbol) {
            return Err(TrackerError::DuplicateSymbol(symbol));
        }
        stocks.insert(
            symbol.clone(),
            TrackedStock::new(symbol.clone(), thresholds, self.config.history_capacity),
        );

        info!(
            "Tracking {} (buy at ${:+.2}, sell at ${:+.2})",
            symbol, thresholds.buy, thresholds.sell
        );
        Ok(symbol)
    }

    /// Register a symbol and fetch its first price straight away.
    ///
    /// If that first refresh fails the symbol is dropped again and the
    /// refresh error is returned.
    pub async fn track(&self, symbol: &str, thresholds: Thresholds) -> Result<String> {
        let symbol = self.register(symbol, thresholds).await?;

        if let Err(e) = self.try_refresh(&symbol).await {
            self.remove(&symbol).await;
            return Err(e);
        }

        Ok(symbol)
    }

    /// Stop tracking a symbol, returning whether it was tracked
    pub async fn remove(&self, symbol: &str) -> bool {
        let key = lookup_key(symbol);
        let removed = self.stocks.lock().await.remove(&key).is_some();
        if removed {
            info!("Stopped tracking {}", key);
        }
        removed
    }

    /// Drop every tracked symbol
    pub async fn clear_all(&self) {
        let mut stocks = self.stocks.lock().await;
        let count = stocks.len();
        stocks.clear();
        info!("Cleared {} tracked symbols", count);
    }

    /// Copy of the record for `symbol`
    pub async fn get(&self, symbol: &str) -> Option<TrackedStock> {
        self.stocks.lock().await.get(&lookup_key(symbol)).cloned()
    }

    /// Copies of every record, in no particular order
    pub async fn list_all(&self) -> Vec<TrackedStock> {
        self.stocks.lock().await.values().cloned().collect()
    }

    /// Tracked symbols, sorted
    pub async fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.stocks.lock().await.keys().cloned().collect();
        symbols.sort();
        symbols
    }

    pub async fn len(&self) -> usize {
        self.stocks.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.stocks.lock().await.is_empty()
    }

    /// Fetch the latest price for `symbol`, reporting only success.
    ///
    /// Every failure is logged and swallowed here.
    pub async fn refresh(&self, symbol: &str) -> bool {
        match self.try_refresh(symbol).await {
            Ok(sample) => {
                debug!("{} @ {}: ${:.2}", symbol, sample.timestamp, sample.price);
                true
            }
            Err(e) => {
                warn!("Error updating {}: {}", symbol, e);
                false
            }
        }
    }

    /// Fetch and apply the most recent sample, returning it
    pub async fn try_refresh(&self, symbol: &str) -> Result<PricePoint> {
        let key = lookup_key(symbol);
        if !self.stocks.lock().await.contains_key(&key) {
            return Err(TrackerError::NotTracked(key));
        }

        let samples = self.source.intraday_samples(&key).await?;
        let sample = *samples
            .last()
            .ok_or_else(|| TrackerError::NoPriceData(key.clone()))?;

        let mut stocks = self.stocks.lock().await;
        let record = stocks
            .get_mut(&key)
            .ok_or_else(|| TrackerError::NotTracked(key.clone()))?;
        record.apply_sample(sample)?;

        Ok(sample)
    }

    /// Current recommendation for `symbol`
    pub async fn classify(&self, symbol: &str) -> Recommendation {
        classify(self.stocks.lock().await.get(&lookup_key(symbol)))
    }

    /// Alert for `symbol` if it currently classifies as BUY or SELL
    pub async fn check_alert(&self, symbol: &str) -> Option<Alert> {
        let stocks = self.stocks.lock().await;
        stocks.get(&lookup_key(symbol)).and_then(Alert::derive)
    }

    /// Alerts for every tracked symbol, sorted by symbol
    pub async fn check_alerts(&self) -> Vec<Alert> {
        let stocks = self.stocks.lock().await;
        let mut alerts: Vec<Alert> = stocks.values().filter_map(Alert::derive).collect();
        alerts.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        alerts
    }

    /// Display view of `symbol`, absent until it has price data
    pub async fn get_snapshot(&self, symbol: &str) -> Option<StockSnapshot> {
        let stocks = self.stocks.lock().await;
        stocks
            .get(&lookup_key(symbol))
            .and_then(StockSnapshot::from_record)
    }

    /// Display views of every symbol with price data, sorted by symbol
    pub async fn list_snapshots(&self) -> Vec<StockSnapshot> {
        let stocks = self.stocks.lock().await;
        let mut snapshots: Vec<StockSnapshot> = stocks
            .values()
            .filter_map(StockSnapshot::from_record)
            .collect();
        snapshots.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        snapshots
    }
}

fn lookup_key(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use std::collections::{HashSet, VecDeque};
    use std::sync::atomic::{AtomicI64, Ordering};

    /// Price source that replays scripted prices
    ///
    /// Each fetch pops the next price for the symbol and stamps it one
    /// minute after the previous fetch. An exhausted script is an empty
    /// result.
    #[derive(Default)]
    pub(crate) struct ScriptedSource {
        known: HashSet<String>,
        prices: std::sync::Mutex<HashMap<String, VecDeque<f64>>>,
        clock: AtomicI64,
    }

    impl ScriptedSource {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn with_symbol(mut self, symbol: &str, prices: &[f64]) -> Self {
            self.known.insert(symbol.to_string());
            self.prices
                .get_mut()
                .unwrap()
                .insert(symbol.to_string(), prices.iter().copied().collect());
            self
        }

        pub(crate) fn start() -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2024, 3, 1, 14, 30, 0).unwrap()
        }
    }

    #[async_trait]
    impl PriceSource for ScriptedSource {
        async fn symbol_exists(&self, symbol: &str) -> Result<bool> {
            Ok(self.known.contains(symbol))
        }

        async fn intraday_samples(&self, symbol: &str) -> Result<Vec<PricePoint>> {
            let next = self
                .prices
                .lock()
                .unwrap()
                .get_mut(symbol)
                .and_then(VecDeque::pop_front);
            let minute = self.clock.fetch_add(1, Ordering::SeqCst);

            Ok(next
                .map(|price| {
                    vec![PricePoint::new(
                        Self::start() + Duration::minutes(minute),
                        price,
                    )]
                })
                .unwrap_or_default())
        }
    }
}
