//! Alert derivation for actionable recommendations

use serde::{Deserialize, Serialize};

use crate::record::TrackedStock;
use crate::signal::{Recommendation, classify};

/// A BUY or SELL notification for one symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub symbol: String,
    pub action: Recommendation,
    pub price: f64,
    pub change_amount: f64,
    pub change_pct: Option<f64>,
    pub message: String,
}

impl Alert {
    /// Build an alert from the record's current state.
    ///
    /// Returns `None` unless the record classifies as BUY or SELL. Nothing
    /// is remembered between calls, so the same alert comes back for as
    /// long as the condition holds.
    pub fn derive(record: &TrackedStock) -> Option<Self> {
        let action = classify(Some(record));
        if !action.is_actionable() {
            return None;
        }

        let price = record.current_price()?;
        let change_amount = record.change_amount()?;
        let message = format!(
            "{}: {} at ${:.2} (Change: ${:+.2})",
            record.symbol(),
            action,
            price,
            change_amount
        );

        Some(Self {
            symbol: record.symbol().to_string(),
            action,
            price,
            change_amount,
            change_pct: record.change_pct(),
            message,
        })
    }

    /// Whether the move is large enough to interrupt the user
    pub fn is_significant(&self, min_move: f64) -> bool {
        self.change_amount.abs() > min_move
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::PricePoint;
    use crate::record::Thresholds;
    use chrono::{Duration, TimeZone, Utc};

    fn stock_at(base: f64, current: f64) -> TrackedStock {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 14, 30, 0).unwrap();
        let mut stock = TrackedStock::new("TEST", Thresholds::new(-2.0, 5.0), 50);
        stock.apply_sample(PricePoint::new(start, base)).unwrap();
        stock
            .apply_sample(PricePoint::new(start + Duration::minutes(1), current))
            .unwrap();
        stock
    }

    #[test]
    fn test_buy_alert_payload() {
        let alert = Alert::derive(&stock_at(100.0, 97.5)).unwrap();
        assert_eq!(alert.symbol, "TEST");
        assert_eq!(alert.action, Recommendation::Buy);
        assert_eq!(alert.price, 97.5);
        assert_eq!(alert.change_amount, -2.5);
        assert_eq!(alert.change_pct, Some(-2.5));
        assert_eq!(alert.message, "TEST: BUY at $97.50 (Change: $-2.50)");
    }

    #[test]
    fn test_sell_alert_payload() {
        let alert = Alert::derive(&stock_at(100.0, 106.0)).unwrap();
        assert_eq!(alert.action, Recommendation::Sell);
        assert_eq!(alert.message, "TEST: SELL at $106.00 (Change: $+6.00)");
    }

    #[test]
    fn test_no_alert_on_hold() {
        assert!(Alert::derive(&stock_at(100.0, 101.0)).is_none());

        let fresh = TrackedStock::new("TEST", Thresholds::default(), 50);
        assert!(Alert::derive(&fresh).is_none());
    }

    #[test]
    fn test_alert_is_repeatable() {
        let stock = stock_at(100.0, 106.0);
        assert_eq!(Alert::derive(&stock), Alert::derive(&stock));
    }

    #[test]
    fn test_significance() {
        let buy = Alert::derive(&stock_at(100.0, 97.5)).unwrap();
        assert!(!buy.is_significant(3.0));

        let sell = Alert::derive(&stock_at(100.0, 106.0)).unwrap();
        assert!(sell.is_significant(3.0));
    }
}
