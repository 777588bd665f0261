//! Per-symbol tracking record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};
use crate::history::{PriceHistory, PricePoint};

/// Dollar-denominated trigger levels, measured from the base price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Change at or below which the symbol is a BUY (normally negative)
    pub buy: f64,
    /// Change at or above which the symbol is a SELL (normally positive)
    pub sell: f64,
}

impl Thresholds {
    pub fn new(buy: f64, sell: f64) -> Self {
        Self { buy, sell }
    }

    /// Advisories for thresholds that break the usual sign convention.
    ///
    /// These are informational only; any pair of values is accepted.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.buy >= 0.0 {
            warnings.push(format!(
                "buy threshold ${:.2} is not negative; BUY fires without a price drop",
                self.buy
            ));
        }
        if self.sell <= 0.0 {
            warnings.push(format!(
                "sell threshold ${:.2} is not positive; SELL fires without a price rise",
                self.sell
            ));
        }
        if self.buy >= self.sell {
            warnings.push(format!(
                "buy threshold ${:.2} overlaps sell threshold ${:.2}; BUY takes precedence",
                self.buy, self.sell
            ));
        }
        warnings
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            buy: -2.0,
            sell: 5.0,
        }
    }
}

/// Normalise a raw ticker: trim, uppercase, and check its shape
pub fn normalize_symbol(raw: &str, max_len: usize) -> Result<String> {
    let symbol = raw.trim().to_uppercase();

    if symbol.is_empty() || symbol.chars().count() > max_len {
        return Err(TrackerError::InvalidSymbol(format!(
            "{symbol:?} (expected 1-{max_len} characters)"
        )));
    }

    if !symbol
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(TrackerError::InvalidSymbol(symbol));
    }

    Ok(symbol)
}

/// Everything tracked for a single symbol
///
/// `latest` carries the current price together with its timestamp, so the
/// two are always present or absent as a pair.
#[derive(Debug, Clone, Serialize)]
pub struct TrackedStock {
    symbol: String,
    thresholds: Thresholds,
    base_price: Option<f64>,
    latest: Option<PricePoint>,
    history: PriceHistory,
}

impl TrackedStock {
    /// Create a record with no observations yet
    pub fn new(symbol: impl Into<String>, thresholds: Thresholds, history_capacity: usize) -> Self {
        Self {
            symbol: symbol.into(),
            thresholds,
            base_price: None,
            latest: None,
            history: PriceHistory::with_capacity(history_capacity),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Anchor price captured by the first successful refresh
    pub fn base_price(&self) -> Option<f64> {
        self.base_price
    }

    pub fn current_price(&self) -> Option<f64> {
        self.latest.map(|p| p.price)
    }

    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.latest.map(|p| p.timestamp)
    }

    pub fn history(&self) -> &PriceHistory {
        &self.history
    }

    /// Record a newly observed sample.
    ///
    /// The first accepted sample becomes the base price and is never
    /// replaced. Samples older than the last update are rejected without
    /// touching the record.
    pub fn apply_sample(&mut self, sample: PricePoint) -> Result<()> {
        if let Some(last_update) = self.last_update() {
            if sample.timestamp < last_update {
                return Err(TrackerError::StaleSample {
                    symbol: self.symbol.clone(),
                    sample: sample.timestamp,
                    last_update,
                });
            }
        }

        if self.base_price.is_none() {
            self.base_price = Some(sample.price);
        }
        self.latest = Some(sample);
        self.history.push(sample);
        Ok(())
    }

    /// Signed dollar change from the base price
    pub fn change_amount(&self) -> Option<f64> {
        match (self.current_price(), self.base_price) {
            (Some(current), Some(base)) => Some(current - base),
            _ => None,
        }
    }

    /// Percentage change from the base price, for display only
    pub fn change_pct(&self) -> Option<f64> {
        match (self.change_amount(), self.base_price) {
            (Some(change), Some(base)) if base != 0.0 => Some(change / base * 100.0),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(minute: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 14, 30, 0).unwrap() + Duration::minutes(minute)
    }

    #[test]
    fn test_normalize_symbol() {
        assert_eq!(normalize_symbol("  aapl ", 5).unwrap(), "AAPL");
        assert_eq!(normalize_symbol("brk.b", 5).unwrap(), "BRK.B");
        assert!(matches!(
            normalize_symbol("   ", 5),
            Err(TrackerError::InvalidSymbol(_))
        ));
        assert!(normalize_symbol("TOOLONG", 5).is_err());
        assert!(normalize_symbol("A$B", 5).is_err());
    }

    #[test]
    fn test_new_record_is_empty() {
        let stock = TrackedStock::new("AAPL", Thresholds::default(), 50);
        assert_eq!(stock.symbol(), "AAPL");
        assert!(stock.base_price().is_none());
        assert!(stock.current_price().is_none());
        assert!(stock.last_update().is_none());
        assert!(stock.history().is_empty());
        assert!(stock.change_amount().is_none());
    }

    #[test]
    fn test_base_price_frozen_after_first_sample() {
        let mut stock = TrackedStock::new("AAPL", Thresholds::default(), 50);
        stock.apply_sample(PricePoint::new(at(0), 100.0)).unwrap();
        stock.apply_sample(PricePoint::new(at(1), 103.0)).unwrap();
        stock.apply_sample(PricePoint::new(at(2), 95.5)).unwrap();
        stock.apply_sample(PricePoint::new(at(3), 120.0)).unwrap();

        assert_eq!(stock.base_price(), Some(100.0));
        assert_eq!(stock.current_price(), Some(120.0));
        assert_eq!(stock.last_update(), Some(at(3)));
        assert_eq!(stock.history().len(), 4);
    }

    #[test]
    fn test_stale_sample_leaves_record_untouched() {
        let mut stock = TrackedStock::new("AAPL", Thresholds::default(), 50);
        stock.apply_sample(PricePoint::new(at(5), 100.0)).unwrap();

        let result = stock.apply_sample(PricePoint::new(at(4), 90.0));
        assert!(matches!(result, Err(TrackerError::StaleSample { .. })));
        assert_eq!(stock.current_price(), Some(100.0));
        assert_eq!(stock.history().len(), 1);
    }

    #[test]
    fn test_repeated_timestamp_is_accepted() {
        let mut stock = TrackedStock::new("AAPL", Thresholds::default(), 50);
        stock.apply_sample(PricePoint::new(at(0), 100.0)).unwrap();
        stock.apply_sample(PricePoint::new(at(0), 100.5)).unwrap();

        assert_eq!(stock.current_price(), Some(100.5));
        assert_eq!(stock.history().len(), 2);
    }

    #[test]
    fn test_change_amount_and_pct() {
        let mut stock = TrackedStock::new("AAPL", Thresholds::default(), 50);
        stock.apply_sample(PricePoint::new(at(0), 100.0)).unwrap();
        stock.apply_sample(PricePoint::new(at(1), 97.5)).unwrap();

        assert_eq!(stock.change_amount(), Some(-2.5));
        assert_eq!(stock.change_pct(), Some(-2.5));
    }

    #[test]
    fn test_threshold_warnings() {
        assert!(Thresholds::default().warnings().is_empty());

        let odd = Thresholds::new(1.0, -1.0);
        assert_eq!(odd.warnings().len(), 3);
    }
}
