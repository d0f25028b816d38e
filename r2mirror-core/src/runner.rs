//! One complete mirror run.
//!
//! Order matters:
//! 1. Load the previous retention state (missing file = first run).
//! 2. Purge the destination if the window shrank.
//! 3. Copy in-window objects for every prefix.
//! 4. Record the current window for the next run.
//!
//! Only configuration and state failures abort a run. A run that aborts
//! leaves the state file untouched, so the next run still compares against
//! the last completed one.

use crate::config::MirrorConfig;
use crate::error::{MirrorError, MirrorResult};
use crate::retention;
use crate::state::RetentionState;
use crate::store::ObjectStore;
use crate::sync_engine::SyncEngine;
use crate::types::RunReport;
use crate::window;
use chrono::{DateTime, Utc};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Runs purge-then-sync and persists the retention state.
pub async fn run(
    config: &MirrorConfig,
    source: Arc<dyn ObjectStore>,
    destination: Arc<dyn ObjectStore>,
    state_path: &Path,
    now: DateTime<Utc>,
) -> MirrorResult<RunReport> {
    let state = RetentionState::load(state_path)?;
    let current_days = config.retention_days;
    let previous_days = state.baseline(current_days);

    // Fail before anything destructive happens.
    let cutoff = window::cutoff(now, current_days)?;
    let scratch_dir = config.scratch_dir();
    tokio::fs::create_dir_all(&scratch_dir)
        .await
        .map_err(|e| MirrorError::io(&scratch_dir, e))?;

    let purge =
        retention::enforce(destination.as_ref(), &config.paths, previous_days, current_days).await;

    info!(
        "syncing objects from the last {current_days} days ({cutoff} to {now}) from bucket {} to bucket {}",
        source.bucket(),
        destination.bucket()
    );

    let engine = SyncEngine::new(source, destination, scratch_dir);
    let sync = engine.sync_prefixes(&config.paths, cutoff).await;

    RetentionState::new(current_days).save(state_path)?;

    info!(
        "sync complete: {} listed, {} copied, {} skipped, {} failed",
        sync.listed, sync.copied, sync.skipped, sync.failed
    );

    Ok(RunReport {
        previous_days: state.retention_days,
        current_days,
        cutoff,
        purge,
        sync,
    })
}
