//! Periodic background refresh of the watchlist

use std::sync::Arc;
use std::time::Duration;
use stock_tracker::{Alert, StockTracker};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Spawn a task that refreshes every `interval` until aborted.
///
/// Each round runs to completion before the next tick is awaited, and
/// ticks missed during a slow round are skipped, so batches never overlap.
/// Alerts whose move exceeds `alert_min_move` are printed after each round.
pub fn spawn_periodic_refresh(
    tracker: Arc<StockTracker>,
    interval: Duration,
    alert_min_move: f64,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately; startup already fetched prices
        ticker.tick().await;

        loop {
            ticker.tick().await;

            if tracker.is_empty().await {
                debug!("No stocks to update");
                continue;
            }

            let results = tracker
                .refresh_all_with_progress(|done, total| {
                    debug!("Updating... {}/{} stocks", done, total);
                })
                .await;

            let failed: Vec<&String> = results
                .iter()
                .filter(|(_, ok)| !**ok)
                .map(|(symbol, _)| symbol)
                .collect();
            if !failed.is_empty() {
                info!("Failed to update: {:?}", failed);
            }

            for alert in significant_alerts(&tracker, alert_min_move).await {
                println!("ALERT: {}", alert.message);
            }
        }
    })
}

/// Current alerts large enough to interrupt the user
pub async fn significant_alerts(tracker: &StockTracker, min_move: f64) -> Vec<Alert> {
    tracker
        .check_alerts()
        .await
        .into_iter()
        .filter(|alert| alert.is_significant(min_move))
        .collect()
}
