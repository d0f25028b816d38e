//! One-way object mirroring from an R2 bucket to a MinIO bucket.
//!
//! Provides:
//! - Retention-window filtering (only recently modified objects are copied)
//! - Destination purge when the retention window shrinks between runs
//! - Per-object download/upload through local scratch files, with MIME
//!   content type inference and inline content disposition
//! - A read-only listing/diff report of both buckets

pub mod config;
pub mod content_type;
pub mod diff;
pub mod error;
pub mod retention;
pub mod runner;
pub mod s3_transport;
pub mod scratch;
pub mod state;
pub mod store;
pub mod sync_engine;
pub mod types;
pub mod window;

pub use config::{EndpointConfig, MirrorConfig};
pub use error::{MirrorError, MirrorResult};
pub use store::ObjectStore;
pub use types::*;
