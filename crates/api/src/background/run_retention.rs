//! Periodic eviction of finished import runs.
//!
//! Completed and aborted runs stay readable from the status endpoint for
//! the configured retention period, then are dropped from the
//! [`ImportTracker`]. Runs on a fixed interval using `tokio::time::interval`.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use super::import_runs::ImportTracker;

/// How often the sweep runs in production.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Run the retention loop until `cancel` is triggered.
///
/// Every `sweep_every`, runs that finished more than `retention` ago are
/// removed from `tracker`.
pub async fn run(
    tracker: Arc<ImportTracker>,
    retention: Duration,
    sweep_every: Duration,
    cancel: CancellationToken,
) {
    tracing::info!(
        retention_secs = retention.as_secs(),
        interval_secs = sweep_every.as_secs(),
        "Import run retention job started"
    );

    let retention = chrono::Duration::from_std(retention).unwrap_or(chrono::Duration::MAX);
    let mut interval = tokio::time::interval(sweep_every);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Import run retention job stopping");
                break;
            }
            _ = interval.tick() => {
                let cutoff = Utc::now()
                    .checked_sub_signed(retention)
                    .unwrap_or(chrono::DateTime::<Utc>::MIN_UTC);
                let purged = tracker.purge_finished_before(cutoff);
                if purged > 0 {
                    tracing::info!(purged, "Import run retention: evicted finished runs");
                } else {
                    tracing::debug!("Import run retention: nothing to evict");
                }
            }
        }
    }
}
