//! Watchlist price tracking with dollar-threshold trading signals
//!
//! This crate polls near-real-time equity prices for a watchlist and turns
//! each symbol's move away from its first observed price into a
//! recommendation:
//!
//! - A tracking store keyed by normalised ticker
//! - Per-symbol refresh from an external [`PriceSource`]
//! - A bounded, chronological price history per symbol
//! - Fixed dollar thresholds classified into BUY / SELL / HOLD
//! - Alert payloads for actionable recommendations
//! - A paced, sequential batch refresh across the watchlist
//!
//! The tracker does not schedule itself. Whatever drives it (a timer task,
//! a UI loop) calls [`StockTracker::refresh_all`] on its own cadence and
//! must not overlap calls from multiple writers.
//!
//! # Example
//!
//! ```rust,ignore
//! use stock_tracker::{StockTracker, Thresholds, TrackerConfig, YahooFinanceClient};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> stock_tracker::Result<()> {
//!     let config = TrackerConfig::default();
//!     let source = Arc::new(YahooFinanceClient::new(&config)?);
//!     let tracker = StockTracker::with_config(source, config);
//!
//!     tracker.register("AAPL", Thresholds::new(-2.0, 5.0)).await?;
//!     tracker.refresh_all().await;
//!
//!     if let Some(alert) = tracker.check_alert("AAPL").await {
//!         println!("{}", alert.message);
//!     }
//!     Ok(())
//! }
//! ```

pub mod alert;
pub mod api;
mod batch;
pub mod cache;
pub mod config;
pub mod error;
pub mod history;
pub mod record;
pub mod signal;
pub mod snapshot;
pub mod tracker;

// Re-export main types for convenience
pub use alert::Alert;
pub use api::{PriceSource, YahooFinanceClient};
pub use config::{HISTORY_CAPACITY, TrackerConfig};
pub use error::{Result, TrackerError};
pub use history::{PriceHistory, PricePoint};
pub use record::{Thresholds, TrackedStock, normalize_symbol};
pub use signal::{Recommendation, classify};
pub use snapshot::StockSnapshot;
pub use tracker::StockTracker;
