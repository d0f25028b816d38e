//! Mirror configuration.
//!
//! The sync run reads a JSON file shaped like:
//!
//! ```json
//! {
//!   "r2":    { "endpoint_url": "...", "access_key": "...", "secret_key": "...", "bucket": "..." },
//!   "minio": { "endpoint_url": "...", "access_key": "...", "secret_key": "...", "bucket": "..." },
//!   "paths": ["logs/"],
//!   "dias_ultimos": 7
//! }
//! ```
//!
//! The diff report builds the same endpoint descriptors from environment
//! variables instead (see [`EndpointConfig::from_env`]).

use crate::error::{MirrorError, MirrorResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Retention window used when the config file does not set one.
pub const DEFAULT_RETENTION_DAYS: u32 = 7;

/// Signing region used when an endpoint does not set one.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Config file read by the sync run, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// State file recording the window of the last completed run.
pub const DEFAULT_STATE_FILE: &str = "last_config.json";

/// Environment variable prefix for the source side of the diff report.
pub const SOURCE_ENV_PREFIX: &str = "R2";

/// Environment variable prefix for the destination side of the diff report.
pub const DESTINATION_ENV_PREFIX: &str = "MINIO";

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_retention_days() -> u32 {
    DEFAULT_RETENTION_DAYS
}

/// Connection parameters for one S3-compatible bucket.
#[derive(Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Endpoint URL (e.g., "https://<account>.r2.cloudflarestorage.com").
    pub endpoint_url: String,

    /// Access key ID.
    pub access_key: String,

    /// Secret access key. Redacted from `Debug` output.
    pub secret_key: String,

    /// Bucket name.
    pub bucket: String,

    /// Signing region. R2 accepts "auto"; MinIO defaults to "us-east-1".
    #[serde(default = "default_region")]
    pub region: String,
}

impl fmt::Debug for EndpointConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointConfig")
            .field("endpoint_url", &self.endpoint_url)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .finish()
    }
}

impl EndpointConfig {
    /// Builds an endpoint from `{PREFIX}_ENDPOINT_URL`, `{PREFIX}_ACCESS_KEY_ID`,
    /// `{PREFIX}_SECRET_ACCESS_KEY`, `{PREFIX}_BUCKET` and the optional
    /// `{PREFIX}_REGION` process environment variables.
    pub fn from_env(prefix: &str) -> MirrorResult<Self> {
        Self::from_lookup(prefix, |name| std::env::var(name).ok())
    }

    /// Same as [`EndpointConfig::from_env`], reading variables through `lookup`.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(prefix: &str, lookup: F) -> MirrorResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |suffix: &str| -> Option<String> {
            lookup(&format!("{prefix}_{suffix}")).filter(|v| !v.trim().is_empty())
        };
        let require = |suffix: &str| -> MirrorResult<String> {
            get(suffix).ok_or_else(|| MirrorError::MissingEnv(format!("{prefix}_{suffix}")))
        };

        Ok(Self {
            endpoint_url: require("ENDPOINT_URL")?,
            access_key: require("ACCESS_KEY_ID")?,
            secret_key: require("SECRET_ACCESS_KEY")?,
            bucket: require("BUCKET")?,
            region: get("REGION").unwrap_or_else(default_region),
        })
    }

    fn validate(&self, side: &str) -> MirrorResult<()> {
        let fields = [
            ("endpoint_url", &self.endpoint_url),
            ("access_key", &self.access_key),
            ("secret_key", &self.secret_key),
            ("bucket", &self.bucket),
            ("region", &self.region),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(MirrorError::Config(format!("{side}.{name} must not be empty")));
            }
        }
        Ok(())
    }
}

/// Configuration for one mirror run. Loaded once, immutable for the run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MirrorConfig {
    /// Source bucket (Cloudflare R2).
    #[serde(rename = "r2")]
    pub source: EndpointConfig,

    /// Destination bucket (MinIO).
    #[serde(rename = "minio")]
    pub destination: EndpointConfig,

    /// Key prefixes to mirror, processed in this order.
    pub paths: Vec<String>,

    /// Only objects modified within this many days are copied.
    #[serde(rename = "dias_ultimos", default = "default_retention_days")]
    pub retention_days: u32,

    /// Directory for scratch files. Defaults to the OS temp directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scratch_dir: Option<PathBuf>,
}

impl MirrorConfig {
    /// Reads and validates the config file. A missing file is an error.
    pub fn load(path: impl AsRef<Path>) -> MirrorResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| MirrorError::io(path, e))?;
        Self::from_json(&raw)
    }

    /// Parses and validates a config document.
    pub fn from_json(raw: &str) -> MirrorResult<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> MirrorResult<()> {
        self.source.validate("r2")?;
        self.destination.validate("minio")?;

        if self.paths.is_empty() {
            return Err(MirrorError::Config("paths must list at least one prefix".into()));
        }
        Ok(())
    }

    /// Directory where scratch files are written during transfers.
    pub fn scratch_dir(&self) -> PathBuf {
        self.scratch_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}
