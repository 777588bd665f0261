//! Sequential, paced refresh of the whole watchlist

use std::collections::HashMap;
use tracing::{debug, info};

use crate::tracker::StockTracker;

impl StockTracker {
    /// Refresh every tracked symbol, see [`StockTracker::refresh_all_with_progress`]
    pub async fn refresh_all(&self) -> HashMap<String, bool> {
        self.refresh_all_with_progress(|_, _| {}).await
    }

    /// Refresh every tracked symbol one at a time.
    ///
    /// The symbol set is captured up front; symbols added or removed while
    /// the batch runs do not change what is processed. `on_progress`
    /// receives `(done, total)` after each symbol. A pacing delay separates
    /// consecutive fetches. Per-symbol failures only show up as `false`
    /// in the returned map.
    ///
    /// Overlapping calls are serialised: a second batch waits for the
    /// first to finish.
    pub async fn refresh_all_with_progress<F>(&self, mut on_progress: F) -> HashMap<String, bool>
    where
        F: FnMut(usize, usize) + Send,
    {
        let _batch = self.batch_gate.lock().await;

        let symbols = self.symbols().await;
        let total = symbols.len();
        let pacing = self.config().pacing_delay;
        let mut results = HashMap::with_capacity(total);

        info!("Refreshing {} tracked symbols", total);

        for (index, symbol) in symbols.into_iter().enumerate() {
            let success = self.refresh(&symbol).await;
            results.insert(symbol, success);

            on_progress(index + 1, total);

            if index + 1 < total && !pacing.is_zero() {
                debug!("Pacing {:?} before next symbol", pacing);
                tokio::time::sleep(pacing).await;
            }
        }

        let succeeded = results.values().filter(|ok| **ok).count();
        info!("Refresh complete: {}/{} symbols updated", succeeded, total);

        results
    }
}
