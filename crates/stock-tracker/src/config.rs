//! Configuration for the tracking engine

use crate::error::{Result, TrackerError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Number of samples retained per symbol
pub const HISTORY_CAPACITY: usize = 50;

/// Configuration for tracking and refresh behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Ring capacity of each symbol's price history
    pub history_capacity: usize,

    /// Delay inserted between symbols during a batch refresh
    #[serde(rename = "pacing_ms", with = "millis")]
    pub pacing_delay: Duration,

    /// Cadence at which the scheduler should call `refresh_all`
    #[serde(rename = "refresh_interval_secs", with = "secs")]
    pub refresh_interval: Duration,

    /// Sample granularity requested from the price source
    pub intraday_interval: String,

    /// Sample window requested from the price source
    pub intraday_range: String,

    /// Maximum length of a normalised ticker
    pub max_symbol_len: usize,

    /// Dollar move an alert has to exceed before front ends surface it
    pub alert_min_move: f64,

    /// Provider-side request budget
    pub requests_per_minute: u32,

    /// How long a successful existence probe is remembered
    #[serde(rename = "probe_cache_ttl_secs", with = "secs")]
    pub probe_cache_ttl: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            history_capacity: HISTORY_CAPACITY,
            pacing_delay: Duration::from_millis(500),
            refresh_interval: Duration::from_secs(10),
            intraday_interval: "1m".to_string(),
            intraday_range: "1d".to_string(),
            max_symbol_len: 5,
            alert_min_move: 3.0,
            requests_per_minute: 60,
            probe_cache_ttl: Duration::from_secs(3600),
        }
    }
}

impl TrackerConfig {
    /// Create a new configuration builder
    pub fn builder() -> TrackerConfigBuilder {
        TrackerConfigBuilder::default()
    }

    /// Apply overrides from `TRACKER_*` environment variables
    pub fn with_env(mut self) -> Result<Self> {
        if let Some(secs) = env_number::<u64>("TRACKER_REFRESH_INTERVAL_SECS")? {
            self.refresh_interval = Duration::from_secs(secs);
        }
        if let Some(ms) = env_number::<u64>("TRACKER_PACING_MS")? {
            self.pacing_delay = Duration::from_millis(ms);
        }
        if let Some(amount) = env_number::<f64>("TRACKER_ALERT_MIN_MOVE")? {
            self.alert_min_move = amount;
        }
        self.validate()?;
        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.history_capacity == 0 {
            return Err(TrackerError::ConfigError(
                "history_capacity must be greater than 0".to_string(),
            ));
        }

        if self.refresh_interval.is_zero() {
            return Err(TrackerError::ConfigError(
                "refresh_interval must be greater than 0".to_string(),
            ));
        }

        if self.requests_per_minute == 0 {
            return Err(TrackerError::ConfigError(
                "requests_per_minute must be greater than 0".to_string(),
            ));
        }

        if self.max_symbol_len == 0 {
            return Err(TrackerError::ConfigError(
                "max_symbol_len must be greater than 0".to_string(),
            ));
        }

        if self.intraday_interval.trim().is_empty() || self.intraday_range.trim().is_empty() {
            return Err(TrackerError::ConfigError(
                "intraday interval and range must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// `Duration` as whole milliseconds in settings files
mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// `Duration` as whole seconds in settings files
mod secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

fn env_number<T: std::str::FromStr>(key: &str) -> Result<Option<T>> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| TrackerError::ConfigError(format!("{key} is not a valid number: {raw}"))),
        Err(_) => Ok(None),
    }
}

/// Builder for TrackerConfig
#[derive(Debug, Default)]
pub struct TrackerConfigBuilder {
    history_capacity: Option<usize>,
    pacing_delay: Option<Duration>,
    refresh_interval: Option<Duration>,
    intraday_interval: Option<String>,
    intraday_range: Option<String>,
    max_symbol_len: Option<usize>,
    alert_min_move: Option<f64>,
    requests_per_minute: Option<u32>,
    probe_cache_ttl: Option<Duration>,
}

impl TrackerConfigBuilder {
    /// Set the history ring capacity
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = Some(capacity);
        self
    }

    /// Set the delay between symbols in a batch refresh
    pub fn pacing_delay(mut self, delay: Duration) -> Self {
        self.pacing_delay = Some(delay);
        self
    }

    /// Set the scheduler cadence
    pub fn refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = Some(interval);
        self
    }

    /// Set the intraday sample granularity, e.g. `"1m"`
    pub fn intraday_interval(mut self, interval: impl Into<String>) -> Self {
        self.intraday_interval = Some(interval.into());
        self
    }

    /// Set the intraday sample window, e.g. `"1d"`
    pub fn intraday_range(mut self, range: impl Into<String>) -> Self {
        self.intraday_range = Some(range.into());
        self
    }

    /// Set the maximum ticker length
    pub fn max_symbol_len(mut self, len: usize) -> Self {
        self.max_symbol_len = Some(len);
        self
    }

    /// Set the minimum dollar move for surfaced alerts
    pub fn alert_min_move(mut self, amount: f64) -> Self {
        self.alert_min_move = Some(amount);
        self
    }

    /// Set the provider request budget
    pub fn requests_per_minute(mut self, limit: u32) -> Self {
        self.requests_per_minute = Some(limit);
        self
    }

    /// Set the existence probe cache TTL
    pub fn probe_cache_ttl(mut self, ttl: Duration) -> Self {
        self.probe_cache_ttl = Some(ttl);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<TrackerConfig> {
        let defaults = TrackerConfig::default();

        let config = TrackerConfig {
            history_capacity: self.history_capacity.unwrap_or(defaults.history_capacity),
            pacing_delay: self.pacing_delay.unwrap_or(defaults.pacing_delay),
            refresh_interval: self.refresh_interval.unwrap_or(defaults.refresh_interval),
            intraday_interval: self.intraday_interval.unwrap_or(defaults.intraday_interval),
            intraday_range: self.intraday_range.unwrap_or(defaults.intraday_range),
            max_symbol_len: self.max_symbol_len.unwrap_or(defaults.max_symbol_len),
            alert_min_move: self.alert_min_move.unwrap_or(defaults.alert_min_move),
            requests_per_minute: self.requests_per_minute.unwrap_or(defaults.requests_per_minute),
            probe_cache_ttl: self.probe_cache_ttl.unwrap_or(defaults.probe_cache_ttl),
        };

        config.validate()?;
        Ok(config)
    }
}
