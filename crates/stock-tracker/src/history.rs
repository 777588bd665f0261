//! Fixed-capacity price history

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::config::HISTORY_CAPACITY;

/// A single observed price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self { timestamp, price }
    }
}

/// Chronological ring of the most recent price points
///
/// Pushing past capacity evicts from the front, so the buffer always holds
/// the newest `capacity` points in the order they were observed.
#[derive(Debug, Clone, Serialize)]
pub struct PriceHistory {
    points: VecDeque<PricePoint>,
    capacity: usize,
}

impl PriceHistory {
    /// Create an empty history holding at most `capacity` points
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a point, evicting the oldest when full
    pub fn push(&mut self, point: PricePoint) {
        while self.points.len() >= self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PricePoint> {
        self.points.iter()
    }

    pub fn to_vec(&self) -> Vec<PricePoint> {
        self.points.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Default for PriceHistory {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn point(minute: i64, price: f64) -> PricePoint {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 14, 30, 0).unwrap();
        PricePoint::new(start + Duration::minutes(minute), price)
    }

    #[test]
    fn test_push_within_capacity() {
        let mut history = PriceHistory::with_capacity(3);
        history.push(point(0, 10.0));
        history.push(point(1, 11.0));

        assert_eq!(history.len(), 2);
        assert_eq!(history.latest().map(|p| p.price), Some(11.0));
    }

    #[test]
    fn test_overflow_keeps_most_recent_in_order() {
        let mut history = PriceHistory::default();
        for i in 0..120 {
            history.push(point(i, i as f64));
        }

        assert_eq!(history.len(), HISTORY_CAPACITY);
        let prices: Vec<f64> = history.iter().map(|p| p.price).collect();
        let expected: Vec<f64> = (70..120).map(|i| i as f64).collect();
        assert_eq!(prices, expected);

        let points = history.to_vec();
        assert!(points.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut history = PriceHistory::with_capacity(0);
        history.push(point(0, 1.0));
        history.push(point(1, 2.0));

        assert_eq!(history.len(), 1);
        assert_eq!(history.to_vec(), vec![point(1, 2.0)]);
    }
}
