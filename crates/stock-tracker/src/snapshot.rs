//! Display-ready view of a tracked symbol

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::history::PricePoint;
use crate::record::{Thresholds, TrackedStock};
use crate::signal::{Recommendation, classify};

/// Point-in-time copy of a record plus its derived figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSnapshot {
    pub symbol: String,
    pub current_price: f64,
    pub base_price: f64,
    pub change_amount: f64,
    pub change_pct: Option<f64>,
    pub recommendation: Recommendation,
    pub thresholds: Thresholds,
    pub last_update: DateTime<Utc>,
    pub history: Vec<PricePoint>,
}

impl StockSnapshot {
    /// Build a snapshot, or `None` while the record has no price data
    pub fn from_record(record: &TrackedStock) -> Option<Self> {
        let current_price = record.current_price()?;
        let base_price = record.base_price()?;
        let last_update = record.last_update()?;

        Some(Self {
            symbol: record.symbol().to_string(),
            current_price,
            base_price,
            change_amount: current_price - base_price,
            change_pct: record.change_pct(),
            recommendation: classify(Some(record)),
            thresholds: record.thresholds(),
            last_update,
            history: record.history().to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_snapshot_requires_price_data() {
        let stock = TrackedStock::new("AAPL", Thresholds::default(), 50);
        assert!(StockSnapshot::from_record(&stock).is_none());
    }

    #[test]
    fn test_snapshot_fields() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 14, 30, 0).unwrap();
        let mut stock = TrackedStock::new("AAPL", Thresholds::new(-2.0, 5.0), 50);
        stock.apply_sample(PricePoint::new(ts, 200.0)).unwrap();

        let snapshot = StockSnapshot::from_record(&stock).unwrap();
        assert_eq!(snapshot.symbol, "AAPL");
        assert_eq!(snapshot.current_price, 200.0);
        assert_eq!(snapshot.base_price, 200.0);
        assert_eq!(snapshot.change_amount, 0.0);
        assert_eq!(snapshot.change_pct, Some(0.0));
        assert_eq!(snapshot.recommendation, Recommendation::Hold);
        assert_eq!(snapshot.last_update, ts);
        assert_eq!(snapshot.history.len(), 1);
    }
}
