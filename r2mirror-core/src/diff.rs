//! Read-only comparison of the keys in two buckets.

use crate::error::MirrorResult;
use crate::store::ObjectStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Keys present on only one side of a source/destination pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketDiff {
    pub source_bucket: String,
    pub destination_bucket: String,
    pub source_count: usize,
    pub destination_count: usize,
    /// Sorted keys found in the source but not the destination.
    pub only_in_source: Vec<String>,
    /// Sorted keys found in the destination but not the source.
    pub only_in_destination: Vec<String>,
}

impl BucketDiff {
    /// Computes the two-way set difference. Duplicate keys count once.
    pub fn compute(
        source_bucket: impl Into<String>,
        source_keys: impl IntoIterator<Item = String>,
        destination_bucket: impl Into<String>,
        destination_keys: impl IntoIterator<Item = String>,
    ) -> Self {
        let source: BTreeSet<String> = source_keys.into_iter().collect();
        let destination: BTreeSet<String> = destination_keys.into_iter().collect();

        Self {
            source_bucket: source_bucket.into(),
            destination_bucket: destination_bucket.into(),
            source_count: source.len(),
            destination_count: destination.len(),
            only_in_source: source.difference(&destination).cloned().collect(),
            only_in_destination: destination.difference(&source).cloned().collect(),
        }
    }

    pub fn is_in_sync(&self) -> bool {
        self.only_in_source.is_empty() && self.only_in_destination.is_empty()
    }
}

impl fmt::Display for BucketDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Objects in {}: {}", self.source_bucket, self.source_count)?;
        writeln!(
            f,
            "Objects in {}: {}",
            self.destination_bucket, self.destination_count
        )?;

        writeln!(
            f,
            "\nOnly in {} ({}):",
            self.source_bucket,
            self.only_in_source.len()
        )?;
        for key in &self.only_in_source {
            writeln!(f, "  {key}")?;
        }

        writeln!(
            f,
            "\nOnly in {} ({}):",
            self.destination_bucket,
            self.only_in_destination.len()
        )?;
        for key in &self.only_in_destination {
            writeln!(f, "  {key}")?;
        }

        if self.is_in_sync() {
            writeln!(f, "\nBuckets are in sync.")?;
        }
        Ok(())
    }
}

/// Lists every key in both buckets and diffs them.
pub async fn diff_buckets(
    source: &dyn ObjectStore,
    destination: &dyn ObjectStore,
) -> MirrorResult<BucketDiff> {
    let source_keys = source.list_keys("").await?;
    let destination_keys = destination.list_keys("").await?;

    Ok(BucketDiff::compute(
        source.bucket(),
        source_keys,
        destination.bucket(),
        destination_keys,
    ))
}
