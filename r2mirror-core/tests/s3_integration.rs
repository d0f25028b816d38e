//! Integration tests for S3Transport against a real MinIO.
//!
//! Requires a MinIO on localhost:9000 with a `r2mirror-test` bucket and the
//! credentials from `support::endpoint`. Run with `--ignored`.

mod support;

use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use r2mirror_core::content_type::upload_metadata_for;
use r2mirror_core::s3_transport::S3Transport;
use r2mirror_core::ObjectStore;
use serial_test::serial;

fn minio() -> S3Transport {
    S3Transport::new(&support::endpoint("r2mirror-test"))
}

fn unique_prefix() -> String {
    format!("test-runs/{}/", Utc::now().timestamp_nanos_opt().unwrap_or_default())
}

#[tokio::test]
#[serial]
#[ignore = "requires local MinIO"]
async fn upload_list_download_delete() {
    let store = minio();
    let prefix = unique_prefix();
    let key = format!("{prefix}report.pdf");
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src.pdf");
    std::fs::write(&src, b"%PDF-1.7").unwrap();

    store
        .upload_from(&src, &key, &upload_metadata_for(&key))
        .await
        .unwrap();

    let objects = store.list_objects(&prefix).await.unwrap();
    assert_eq!(objects.len(), 1);
    assert_eq!(objects[0].key, key);
    assert!(objects[0].last_modified > Utc::now() - Duration::minutes(5));

    let dest = dir.path().join("dest.pdf");
    store.download_to(&key, &dest).await.unwrap();
    assert_eq!(std::fs::read(&dest).unwrap(), b"%PDF-1.7");

    store.delete(&key).await.unwrap();
    assert!(store.list_keys(&prefix).await.unwrap().is_empty());
}

#[tokio::test]
#[serial]
#[ignore = "requires local MinIO"]
async fn listing_spans_multiple_pages() {
    let store = minio();
    let prefix = unique_prefix();
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("one.txt");
    std::fs::write(&src, b"1").unwrap();

    // More than the 1000-key page size.
    for i in 0..1005 {
        let key = format!("{prefix}{i:04}.txt");
        store
            .upload_from(&src, &key, &upload_metadata_for(&key))
            .await
            .unwrap();
    }

    let keys = store.list_keys(&prefix).await.unwrap();
    assert_eq!(keys.len(), 1005);

    for key in keys {
        store.delete(&key).await.unwrap();
    }
}
