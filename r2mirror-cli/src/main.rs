//! `r2mirror`: copies recently modified objects from R2 to MinIO.
//!
//! Reads `config.json` and `last_config.json` from the working directory
//! (overridable with `R2MIRROR_CONFIG` / `R2MIRROR_STATE`). Exits non-zero
//! only when the run cannot start or its state cannot be recorded;
//! per-object failures are logged and the run still succeeds.

use anyhow::Context;
use chrono::Utc;
use r2mirror_cli::{CONFIG_PATH_ENV, STATE_PATH_ENV, init_tracing, path_from_env};
use r2mirror_core::config::{DEFAULT_CONFIG_FILE, DEFAULT_STATE_FILE};
use r2mirror_core::s3_transport::S3Transport;
use r2mirror_core::{MirrorConfig, ObjectStore, runner};
use std::sync::Arc;
use tracing::warn;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config_path = path_from_env(CONFIG_PATH_ENV, DEFAULT_CONFIG_FILE);
    let state_path = path_from_env(STATE_PATH_ENV, DEFAULT_STATE_FILE);

    let config = MirrorConfig::load(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;

    let source: Arc<dyn ObjectStore> = Arc::new(S3Transport::new(&config.source));
    let destination: Arc<dyn ObjectStore> = Arc::new(S3Transport::new(&config.destination));

    let report = runner::run(&config, source, destination, &state_path, Utc::now())
        .await
        .context("mirror run failed")?;

    if report.sync.failed > 0 || !report.sync.failed_prefixes.is_empty() {
        warn!(
            "{} object(s) and {} prefix(es) failed; see [ERROR] lines above",
            report.sync.failed,
            report.sync.failed_prefixes.len()
        );
    }
    Ok(())
}
