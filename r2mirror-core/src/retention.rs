//! Destination purge when the retention window shrinks.
//!
//! A shrink wipes every destination object under the configured prefixes.
//! The sync pass that follows copies back whatever is still inside the new,
//! smaller window. Nothing is deleted when the window grows or stays put.

use crate::store::ObjectStore;
use crate::types::PurgeReport;
use crate::window::has_shrunk;
use tracing::{error, info};

/// Purges the destination if the window shrank from `previous_days`.
///
/// Returns `None` when no purge was needed.
pub async fn enforce(
    destination: &dyn ObjectStore,
    prefixes: &[String],
    previous_days: u32,
    current_days: u32,
) -> Option<PurgeReport> {
    if !has_shrunk(previous_days, current_days) {
        return None;
    }

    info!(
        "retention window shrank ({previous_days} -> {current_days} days), purging bucket {}",
        destination.bucket()
    );
    let report = purge_prefixes(destination, prefixes).await;
    info!(
        "purge finished: {} deleted, {} failed",
        report.deleted, report.failed
    );
    Some(report)
}

/// Deletes every object under each prefix. Failures are logged and counted.
pub async fn purge_prefixes(destination: &dyn ObjectStore, prefixes: &[String]) -> PurgeReport {
    let mut report = PurgeReport::default();

    for prefix in prefixes {
        let keys = match destination.list_keys(prefix).await {
            Ok(keys) => keys,
            Err(e) => {
                error!("[ERROR] could not list {prefix} for purge: {e}");
                report.failed_prefixes.push(prefix.clone());
                continue;
            }
        };

        for key in keys {
            match destination.delete(&key).await {
                Ok(()) => {
                    info!("[DELETE] {key} deleted");
                    report.deleted += 1;
                }
                Err(e) => {
                    error!("[ERROR] could not delete {key}: {e}");
                    report.failed += 1;
                }
            }
        }
    }

    report
}
