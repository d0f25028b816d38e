//! Shared setup for the r2mirror binaries.

use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Overrides the config file path for `r2mirror`.
pub const CONFIG_PATH_ENV: &str = "R2MIRROR_CONFIG";

/// Overrides the state file path for `r2mirror`.
pub const STATE_PATH_ENV: &str = "R2MIRROR_STATE";

/// Installs the stderr log subscriber. `RUST_LOG` wins over the `info` default.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Path from `var` if set and non-empty, else `default`.
pub fn path_from_env(var: &str, default: &str) -> PathBuf {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}
