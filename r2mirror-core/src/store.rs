//! Object store abstraction.
//!
//! The sync engine, retention purge and diff report only talk to buckets
//! through [`ObjectStore`], so they run the same against S3 or a test double.

use crate::error::MirrorResult;
use crate::types::{ObjectSummary, UploadMetadata};
use async_trait::async_trait;
use std::path::Path;

/// Minimal bucket operations needed for mirroring.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Bucket name, for log lines.
    fn bucket(&self) -> &str;

    /// Lists every object under `prefix`, following pagination to the end.
    async fn list_objects(&self, prefix: &str) -> MirrorResult<Vec<ObjectSummary>>;

    /// Downloads `key` into the file at `dest`, returning the bytes written.
    async fn download_to(&self, key: &str, dest: &Path) -> MirrorResult<u64>;

    /// Uploads the file at `src` to `key`, replacing any existing object.
    async fn upload_from(
        &self,
        src: &Path,
        key: &str,
        metadata: &UploadMetadata,
    ) -> MirrorResult<()>;

    /// Deletes `key`.
    async fn delete(&self, key: &str) -> MirrorResult<()>;

    /// Lists every key under `prefix`.
    async fn list_keys(&self, prefix: &str) -> MirrorResult<Vec<String>> {
        let objects = self.list_objects(prefix).await?;
        Ok(objects.into_iter().map(|o| o.key).collect())
    }
}
