//! Shared types for mirror operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One object as returned by a bucket listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectSummary {
    pub key: String,
    pub last_modified: DateTime<Utc>,
}

/// Metadata set on every uploaded object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadMetadata {
    pub content_type: String,
    pub content_disposition: String,
}

/// Outcome counters for one sync pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Objects returned by source listings.
    pub listed: usize,
    /// Objects uploaded to the destination.
    pub copied: usize,
    /// Objects outside the retention window.
    pub skipped: usize,
    /// Objects whose download or upload failed.
    pub failed: usize,
    /// Keys of the failed objects, in processing order.
    pub failed_keys: Vec<String>,
    /// Prefixes whose source listing failed.
    pub failed_prefixes: Vec<String>,
}

/// Outcome counters for a destination purge.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeReport {
    pub deleted: usize,
    pub failed: usize,
    /// Prefixes whose destination listing failed.
    pub failed_prefixes: Vec<String>,
}

/// Everything one mirror run did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Window recorded by the previous completed run, if any.
    pub previous_days: Option<u32>,
    pub current_days: u32,
    pub cutoff: DateTime<Utc>,
    /// Present only when the window shrank and the destination was purged.
    pub purge: Option<PurgeReport>,
    pub sync: SyncReport,
}
