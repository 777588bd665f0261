//! Shared utilities for the stock tracker
//!
//! Logging setup and the application-level settings front ends load before
//! building a [`stock_tracker::StockTracker`].

pub mod logging;
pub mod settings;

pub use logging::{DEFAULT_FILTER, init_tracing};
pub use settings::WatchSettings;
