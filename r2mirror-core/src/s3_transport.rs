//! S3 list/download/upload/delete against any S3-compatible endpoint.
//!
//! Used for both sides of the mirror: R2 as the source and MinIO as the
//! destination. Each side gets its own client built from static
//! credentials and a custom endpoint URL.

use crate::config::EndpointConfig;
use crate::error::{MirrorError, MirrorResult};
use crate::store::ObjectStore;
use crate::types::{ObjectSummary, UploadMetadata};
use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::config::retry::RetryConfig;
use aws_sdk_s3::config::{RequestChecksumCalculation, ResponseChecksumValidation};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use chrono::{DateTime, Utc};
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// S3 transport bound to one bucket.
pub struct S3Transport {
    client: S3Client,
    bucket: String,
}

impl S3Transport {
    pub fn new(endpoint: &EndpointConfig) -> Self {
        Self {
            client: build_client(endpoint),
            bucket: endpoint.bucket.clone(),
        }
    }
}

/// Builds an S3 client for a non-AWS endpoint with static credentials.
///
/// Path-style addressing is forced since MinIO and R2 do not rely on
/// virtual-hosted buckets. Retries are disabled: every call is attempted
/// exactly once. Checksums are only computed when an operation requires them,
/// since not every S3-compatible provider accepts checksum trailers.
pub fn build_client(endpoint: &EndpointConfig) -> S3Client {
    let credentials = aws_credential_types::Credentials::new(
        &endpoint.access_key,
        &endpoint.secret_key,
        None,
        None,
        "r2mirror-static",
    );

    let config = aws_sdk_s3::Config::builder()
        .region(aws_types::region::Region::new(endpoint.region.clone()))
        .credentials_provider(credentials)
        .endpoint_url(&endpoint.endpoint_url)
        .force_path_style(true)
        .retry_config(RetryConfig::disabled())
        .request_checksum_calculation(RequestChecksumCalculation::WhenRequired)
        .response_checksum_validation(ResponseChecksumValidation::WhenRequired)
        .behavior_version_latest()
        .build();

    S3Client::from_conf(config)
}

fn to_utc(timestamp: &aws_sdk_s3::primitives::DateTime) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(timestamp.secs(), timestamp.subsec_nanos())
}

#[async_trait]
impl ObjectStore for S3Transport {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn list_objects(&self, prefix: &str) -> MirrorResult<Vec<ObjectSummary>> {
        let mut objects = Vec::new();
        let mut continuation_token: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let mut request = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(prefix);

            if let Some(token) = &continuation_token {
                request = request.continuation_token(token);
            }

            let output = request.send().await.map_err(|e| {
                MirrorError::S3(format!(
                    "list failed for s3://{}/{prefix}: {}",
                    self.bucket,
                    DisplayErrorContext(&e)
                ))
            })?;
            pages += 1;

            for obj in output.contents() {
                let Some(key) = obj.key() else {
                    continue;
                };
                // Objects without a timestamp fall outside any window.
                let last_modified = obj
                    .last_modified()
                    .and_then(to_utc)
                    .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
                objects.push(ObjectSummary {
                    key: key.to_string(),
                    last_modified,
                });
            }

            match output.next_continuation_token() {
                Some(token) if output.is_truncated() == Some(true) => {
                    continuation_token = Some(token.to_string());
                }
                _ => break,
            }
        }

        debug!(
            "listed {} objects under s3://{}/{prefix} in {pages} page(s)",
            objects.len(),
            self.bucket
        );
        Ok(objects)
    }

    async fn download_to(&self, key: &str, dest: &Path) -> MirrorResult<u64> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                MirrorError::S3(format!("download failed for {key}: {}", DisplayErrorContext(&e)))
            })?;

        let mut file = tokio::fs::File::create(dest)
            .await
            .map_err(|e| MirrorError::io(dest, e))?;

        let mut body = resp.body;
        let mut written = 0u64;
        while let Some(chunk) = body
            .try_next()
            .await
            .map_err(|e| MirrorError::S3(format!("failed to read body for {key}: {e}")))?
        {
            file.write_all(&chunk)
                .await
                .map_err(|e| MirrorError::io(dest, e))?;
            written += chunk.len() as u64;
        }
        file.flush().await.map_err(|e| MirrorError::io(dest, e))?;

        debug!("downloaded {written} bytes from s3://{}/{key}", self.bucket);
        Ok(written)
    }

    async fn upload_from(
        &self,
        src: &Path,
        key: &str,
        metadata: &UploadMetadata,
    ) -> MirrorResult<()> {
        let body = ByteStream::from_path(src).await.map_err(|e| {
            MirrorError::S3(format!("failed to open {} for upload: {e}", src.display()))
        })?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body)
            .content_type(&metadata.content_type)
            .content_disposition(&metadata.content_disposition)
            .send()
            .await
            .map_err(|e| {
                MirrorError::S3(format!("upload failed for {key}: {}", DisplayErrorContext(&e)))
            })?;

        debug!("uploaded {} to s3://{}/{key}", src.display(), self.bucket);
        Ok(())
    }

    async fn delete(&self, key: &str) -> MirrorResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                MirrorError::S3(format!("delete failed for {key}: {}", DisplayErrorContext(&e)))
            })?;

        debug!("deleted s3://{}/{key}", self.bucket);
        Ok(())
    }
}
