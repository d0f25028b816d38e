//! Shared test helpers: an in-memory bucket and config builders.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use r2mirror_core::config::{EndpointConfig, MirrorConfig};
use r2mirror_core::{MirrorError, MirrorResult, ObjectSummary, ObjectStore, UploadMetadata};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub last_modified: DateTime<Utc>,
    pub metadata: Option<UploadMetadata>,
}

/// Bucket held in memory. Keys list in lexicographic order, like S3.
pub struct MemoryStore {
    bucket: String,
    objects: Mutex<BTreeMap<String, StoredObject>>,
    fail_downloads: HashSet<String>,
    fail_uploads: HashSet<String>,
    fail_deletes: HashSet<String>,
    fail_lists: HashSet<String>,
    /// Operations in call order, e.g. "put:logs/a.txt", "delete:logs/a.txt".
    operations: Mutex<Vec<String>>,
    /// Local paths passed to `upload_from`, for scratch cleanup checks.
    upload_sources: Mutex<Vec<PathBuf>>,
}

impl MemoryStore {
    pub fn new(bucket: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            objects: Mutex::new(BTreeMap::new()),
            fail_downloads: HashSet::new(),
            fail_uploads: HashSet::new(),
            fail_deletes: HashSet::new(),
            fail_lists: HashSet::new(),
            operations: Mutex::new(Vec::new()),
            upload_sources: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_download(mut self, key: &str) -> Self {
        self.fail_downloads.insert(key.to_string());
        self
    }

    pub fn failing_upload(mut self, key: &str) -> Self {
        self.fail_uploads.insert(key.to_string());
        self
    }

    pub fn failing_delete(mut self, key: &str) -> Self {
        self.fail_deletes.insert(key.to_string());
        self
    }

    pub fn failing_list(mut self, prefix: &str) -> Self {
        self.fail_lists.insert(prefix.to_string());
        self
    }

    pub async fn insert(&self, key: &str, body: &[u8], last_modified: DateTime<Utc>) {
        self.objects.lock().await.insert(
            key.to_string(),
            StoredObject {
                body: body.to_vec(),
                last_modified,
                metadata: None,
            },
        );
    }

    pub async fn insert_aged(&self, key: &str, body: &[u8], now: DateTime<Utc>, age: Duration) {
        self.insert(key, body, now - age).await;
    }

    pub async fn keys(&self) -> Vec<String> {
        self.objects.lock().await.keys().cloned().collect()
    }

    pub async fn object(&self, key: &str) -> Option<StoredObject> {
        self.objects.lock().await.get(key).cloned()
    }

    pub async fn operations(&self) -> Vec<String> {
        self.operations.lock().await.clone()
    }

    pub async fn upload_sources(&self) -> Vec<PathBuf> {
        self.upload_sources.lock().await.clone()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn list_objects(&self, prefix: &str) -> MirrorResult<Vec<ObjectSummary>> {
        self.operations.lock().await.push(format!("list:{prefix}"));
        if self.fail_lists.contains(prefix) {
            return Err(MirrorError::S3(format!("list failed for {prefix}")));
        }
        Ok(self
            .objects
            .lock()
            .await
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, obj)| ObjectSummary {
                key: key.clone(),
                last_modified: obj.last_modified,
            })
            .collect())
    }

    async fn download_to(&self, key: &str, dest: &Path) -> MirrorResult<u64> {
        self.operations.lock().await.push(format!("get:{key}"));
        if self.fail_downloads.contains(key) {
            return Err(MirrorError::S3(format!("download failed for {key}")));
        }
        let body = self
            .objects
            .lock()
            .await
            .get(key)
            .map(|o| o.body.clone())
            .ok_or_else(|| MirrorError::S3(format!("no such key: {key}")))?;
        tokio::fs::write(dest, &body)
            .await
            .map_err(|e| MirrorError::io(dest, e))?;
        Ok(body.len() as u64)
    }

    async fn upload_from(
        &self,
        src: &Path,
        key: &str,
        metadata: &UploadMetadata,
    ) -> MirrorResult<()> {
        self.operations.lock().await.push(format!("put:{key}"));
        self.upload_sources.lock().await.push(src.to_path_buf());
        if self.fail_uploads.contains(key) {
            return Err(MirrorError::S3(format!("upload failed for {key}")));
        }
        let body = tokio::fs::read(src)
            .await
            .map_err(|e| MirrorError::io(src, e))?;
        self.objects.lock().await.insert(
            key.to_string(),
            StoredObject {
                body,
                last_modified: Utc::now(),
                metadata: Some(metadata.clone()),
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> MirrorResult<()> {
        self.operations.lock().await.push(format!("delete:{key}"));
        if self.fail_deletes.contains(key) {
            return Err(MirrorError::S3(format!("delete failed for {key}")));
        }
        self.objects.lock().await.remove(key);
        Ok(())
    }
}

pub fn endpoint(bucket: &str) -> EndpointConfig {
    EndpointConfig {
        endpoint_url: "http://localhost:9000".into(),
        access_key: "r2mirror-test".into(),
        secret_key: "r2mirror-test-secret".into(),
        bucket: bucket.into(),
        region: "us-east-1".into(),
    }
}

pub fn mirror_config(paths: &[&str], retention_days: u32, scratch_dir: &Path) -> MirrorConfig {
    MirrorConfig {
        source: endpoint("r2-source"),
        destination: endpoint("minio-dest"),
        paths: paths.iter().map(|p| p.to_string()).collect(),
        retention_days,
        scratch_dir: Some(scratch_dir.to_path_buf()),
    }
}

/// Number of entries currently in `dir`.
pub fn entries_in(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
}
