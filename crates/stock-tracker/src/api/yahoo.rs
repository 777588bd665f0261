//! Yahoo Finance price source

use async_trait::async_trait;
use chrono::DateTime;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use yahoo_finance_api as yahoo;

use super::PriceSource;
use crate::cache::ProbeCache;
use crate::config::TrackerConfig;
use crate::error::{Result, TrackerError};
use crate::history::PricePoint;

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Yahoo Finance API client
#[derive(Clone)]
pub struct YahooFinanceClient {
    connector: Arc<yahoo::YahooConnector>,
    rate_limiter: SharedRateLimiter,
    probe_cache: ProbeCache,
    interval: String,
    range: String,
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client
    pub fn new(config: &TrackerConfig) -> Result<Self> {
        let connector = yahoo::YahooConnector::new()?;

        let quota = Quota::per_minute(
            NonZeroU32::new(config.requests_per_minute).unwrap_or(NonZeroU32::MIN),
        );

        Ok(Self {
            connector: Arc::new(connector),
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
            probe_cache: ProbeCache::new(config.probe_cache_ttl),
            interval: config.intraday_interval.clone(),
            range: config.intraday_range.clone(),
        })
    }

    /// Search the provider for an exact ticker match
    async fn search_exact(&self, symbol: &str) -> Result<bool> {
        self.rate_limiter.until_ready().await;

        let result = self.connector.search_ticker(symbol).await?;
        let found = result
            .quotes
            .iter()
            .any(|item| item.symbol.eq_ignore_ascii_case(symbol));

        tracing::debug!(
            "Search for {} returned {} candidates, exact match: {}",
            symbol,
            result.quotes.len(),
            found
        );
        Ok(found)
    }
}

#[async_trait]
impl PriceSource for YahooFinanceClient {
    async fn symbol_exists(&self, symbol: &str) -> Result<bool> {
        self.probe_cache
            .get_or_probe(symbol, || self.search_exact(symbol))
            .await
    }

    async fn intraday_samples(&self, symbol: &str) -> Result<Vec<PricePoint>> {
        self.rate_limiter.until_ready().await;

        let response = self
            .connector
            .get_quote_range(symbol, &self.interval, &self.range)
            .await?;

        let quotes = response.quotes()?;

        let samples: Vec<PricePoint> = quotes
            .iter()
            .filter(|q| q.close.is_finite() && q.close > 0.0)
            .filter_map(|q| {
                DateTime::from_timestamp(q.timestamp as i64, 0)
                    .map(|timestamp| PricePoint::new(timestamp, q.close))
            })
            .collect();

        if samples.is_empty() {
            return Err(TrackerError::NoPriceData(symbol.to_string()));
        }

        Ok(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_intraday_samples() {
        let client = YahooFinanceClient::new(&TrackerConfig::default()).unwrap();
        let samples = client.intraday_samples("AAPL").await.unwrap();

        assert!(!samples.is_empty());
        assert!(samples.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_symbol_exists() {
        let client = YahooFinanceClient::new(&TrackerConfig::default()).unwrap();

        assert!(client.symbol_exists("AAPL").await.unwrap());
        assert!(!client.symbol_exists("QZXWV").await.unwrap());
    }
}
