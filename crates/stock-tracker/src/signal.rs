//! Threshold classification

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::record::TrackedStock;

/// Trading recommendation for a tracked symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Recommendation {
    Buy,
    Sell,
    Hold,
    /// Symbol is not tracked
    #[serde(rename = "N/A")]
    NotAvailable,
}

impl Recommendation {
    /// Whether this recommendation should produce an alert
    pub fn is_actionable(self) -> bool {
        matches!(self, Self::Buy | Self::Sell)
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
            Self::Hold => "HOLD",
            Self::NotAvailable => "N/A",
        };
        f.write_str(label)
    }
}

/// Classify a record by its dollar change from the base price.
///
/// The buy check runs before the sell check, so overlapping thresholds
/// resolve to BUY.
pub fn classify(record: Option<&TrackedStock>) -> Recommendation {
    let Some(record) = record else {
        return Recommendation::NotAvailable;
    };

    let Some(delta) = record.change_amount() else {
        return Recommendation::Hold;
    };

    let thresholds = record.thresholds();
    if delta <= thresholds.buy {
        Recommendation::Buy
    } else if delta >= thresholds.sell {
        Recommendation::Sell
    } else {
        Recommendation::Hold
    }
}
