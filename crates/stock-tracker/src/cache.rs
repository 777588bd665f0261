//! Caching of symbol existence probes to reduce API calls

use cached::{Cached, TimedCache};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Thread-safe cache of symbols the provider has confirmed
///
/// Only positive answers are stored; a negative probe may be a transient
/// provider hiccup and is asked again next time.
pub struct ProbeCache {
    cache: Arc<RwLock<TimedCache<String, bool>>>,
}

impl ProbeCache {
    /// Create a new cache with specified TTL
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Arc::new(RwLock::new(TimedCache::with_lifespan(ttl))),
        }
    }

    /// Whether `symbol` was confirmed within the TTL
    pub async fn is_known(&self, symbol: &str) -> bool {
        let mut cache = self.cache.write().await;
        cache.cache_get(&symbol.to_string()).copied().unwrap_or(false)
    }

    /// Remember that `symbol` exists
    pub async fn remember(&self, symbol: &str) {
        let mut cache = self.cache.write().await;
        let _ = cache.cache_set(symbol.to_string(), true);
    }

    /// Get the cached answer or run the probe, caching a positive result
    pub async fn get_or_probe<F, Fut, E>(&self, symbol: &str, probe: F) -> Result<bool, E>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<bool, E>>,
    {
        if self.is_known(symbol).await {
            tracing::debug!("Probe cache hit for {}", symbol);
            return Ok(true);
        }

        tracing::debug!("Probe cache miss for {}", symbol);
        let exists = probe().await?;
        if exists {
            self.remember(symbol).await;
        }

        Ok(exists)
    }
}

impl Clone for ProbeCache {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}
