//! Price source abstraction and the Yahoo Finance implementation

pub mod yahoo;

use async_trait::async_trait;

use crate::error::Result;
use crate::history::PricePoint;

pub use yahoo::YahooFinanceClient;

/// External provider of symbol metadata and intraday prices
///
/// The existence probe and the price fetch are separate calls with separate
/// failure meanings: a failed probe blocks registration, a failed fetch only
/// fails that one refresh.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Whether the provider recognises `symbol`
    async fn symbol_exists(&self, symbol: &str) -> Result<bool>;

    /// Intraday samples for the current session, oldest first
    async fn intraday_samples(&self, symbol: &str) -> Result<Vec<PricePoint>>;
}
