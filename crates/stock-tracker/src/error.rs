//! Error types for tracking operations

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Stock tracking specific errors
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Symbol is already on the watchlist
    #[error("{0} is already being tracked")]
    DuplicateSymbol(String),

    /// Symbol failed normalisation or the price source could not resolve it
    #[error("Invalid stock symbol: {0}")]
    InvalidSymbol(String),

    /// Symbol is not on the watchlist
    #[error("{0} is not being tracked")]
    NotTracked(String),

    /// The price source returned no intraday samples
    #[error("No price data available for {0}")]
    NoPriceData(String),

    /// The newest sample is older than what the record already holds
    #[error("Stale sample for {symbol}: {sample} is older than {last_update}")]
    StaleSample {
        symbol: String,
        sample: DateTime<Utc>,
        last_update: DateTime<Utc>,
    },

    /// Provider or network failure
    #[error("Price source error: {0}")]
    PriceSource(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for tracking operations
pub type Result<T> = std::result::Result<T, TrackerError>;

impl From<yahoo_finance_api::YahooError> for TrackerError {
    fn from(err: yahoo_finance_api::YahooError) -> Self {
        TrackerError::PriceSource(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TrackerError::DuplicateSymbol("AAPL".to_string());
        assert_eq!(err.to_string(), "AAPL is already being tracked");

        let err = TrackerError::InvalidSymbol("ZZZZZ".to_string());
        assert_eq!(err.to_string(), "Invalid stock symbol: ZZZZZ");

        let err = TrackerError::NoPriceData("MSFT".to_string());
        assert_eq!(err.to_string(), "No price data available for MSFT");
    }
}
