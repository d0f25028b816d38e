//! Windowed one-way copy from the source bucket to the destination bucket.
//!
//! For each prefix the engine lists the source, skips objects older than the
//! cutoff, and copies the rest through a local scratch file. Every object
//! gets exactly one attempt; a failure is logged and the loop moves on.
//! Existing destination objects are overwritten unconditionally.

use crate::content_type::upload_metadata_for;
use crate::error::MirrorResult;
use crate::scratch::ScratchFile;
use crate::store::ObjectStore;
use crate::types::{ObjectSummary, SyncReport, UploadMetadata};
use crate::window::is_within_window;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// Copies in-window objects from `source` to `destination`.
pub struct SyncEngine {
    source: Arc<dyn ObjectStore>,
    destination: Arc<dyn ObjectStore>,
    scratch_dir: PathBuf,
}

impl SyncEngine {
    pub fn new(
        source: Arc<dyn ObjectStore>,
        destination: Arc<dyn ObjectStore>,
        scratch_dir: PathBuf,
    ) -> Self {
        Self {
            source,
            destination,
            scratch_dir,
        }
    }

    /// Syncs every prefix in order.
    pub async fn sync_prefixes(&self, prefixes: &[String], cutoff: DateTime<Utc>) -> SyncReport {
        let mut report = SyncReport::default();
        for prefix in prefixes {
            self.sync_prefix(prefix, cutoff, &mut report).await;
        }
        report
    }

    /// Syncs one prefix, accumulating into `report`.
    ///
    /// A listing failure abandons this prefix only.
    pub async fn sync_prefix(
        &self,
        prefix: &str,
        cutoff: DateTime<Utc>,
        report: &mut SyncReport,
    ) {
        let objects = match self.source.list_objects(prefix).await {
            Ok(objects) => objects,
            Err(e) => {
                error!("[ERROR] could not list {prefix}: {e}");
                report.failed_prefixes.push(prefix.to_string());
                return;
            }
        };

        if objects.is_empty() {
            info!("no objects found under prefix {prefix}");
            return;
        }

        report.listed += objects.len();
        for object in &objects {
            if !is_within_window(object.last_modified, cutoff) {
                info!(
                    "[SKIP] {} last modified {} is before cutoff {cutoff}",
                    object.key, object.last_modified
                );
                report.skipped += 1;
                continue;
            }

            info!("[FOUND] {} last modified {}", object.key, object.last_modified);
            match self.transfer(object).await {
                Ok(metadata) => {
                    info!(
                        "[OK] synced {} with content type {}",
                        object.key, metadata.content_type
                    );
                    report.copied += 1;
                }
                Err(e) => {
                    error!("[ERROR] could not sync {}: {e}", object.key);
                    report.failed += 1;
                    report.failed_keys.push(object.key.clone());
                }
            }
        }
    }

    /// Downloads one object to scratch and uploads it to the destination.
    /// The scratch file is removed when this returns, on every path.
    async fn transfer(&self, object: &ObjectSummary) -> MirrorResult<UploadMetadata> {
        let key = object.key.as_str();
        let scratch = ScratchFile::for_key(&self.scratch_dir, key);

        info!("[DOWNLOAD] {key} -> {}", scratch.path().display());
        self.source.download_to(key, scratch.path()).await?;

        let metadata = upload_metadata_for(key);
        info!("[UPLOAD] {key} -> bucket {}", self.destination.bucket());
        self.destination
            .upload_from(scratch.path(), key, &metadata)
            .await?;

        Ok(metadata)
    }
}
