//! `r2mirror-diff`: lists both buckets and reports keys unique to each side.
//!
//! Connection parameters come from `R2_*` and `MINIO_*` environment
//! variables, optionally loaded from a `.env` file in the working directory.

use anyhow::Context;
use r2mirror_cli::init_tracing;
use r2mirror_core::EndpointConfig;
use r2mirror_core::config::{DESTINATION_ENV_PREFIX, SOURCE_ENV_PREFIX};
use r2mirror_core::diff::diff_buckets;
use r2mirror_core::s3_transport::S3Transport;
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    if let Ok(path) = dotenvy::dotenv() {
        debug!("loaded environment from {}", path.display());
    }

    let source = EndpointConfig::from_env(SOURCE_ENV_PREFIX).context("source bucket settings")?;
    let destination = EndpointConfig::from_env(DESTINATION_ENV_PREFIX)
        .context("destination bucket settings")?;

    let diff = diff_buckets(&S3Transport::new(&source), &S3Transport::new(&destination))
        .await
        .context("failed to list buckets")?;

    print!("{diff}");
    Ok(())
}
