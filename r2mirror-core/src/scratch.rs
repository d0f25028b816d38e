//! Local scratch files for object transfers.
//!
//! Each transfer downloads into a [`ScratchFile`] and uploads from it. The
//! file is removed when the guard drops, whether the transfer succeeded or
//! not. Paths are derived from a digest of the full key, so two keys that
//! share a file name under different prefixes never share a scratch file.

use crate::content_type::file_name;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Hex characters of the key digest kept in the file name.
const DIGEST_PREFIX_LEN: usize = 16;

/// Longest tail of the object's file name kept after the digest. Keeps the
/// scratch name well under the usual 255-byte file name limit.
const MAX_NAME_TAIL_BYTES: usize = 128;

/// Scratch file owned by one object transfer.
#[derive(Debug)]
pub struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    /// Reserves the scratch path for `key` inside `dir`. Nothing is created
    /// on disk until the download writes to it.
    pub fn for_key(dir: &Path, key: &str) -> Self {
        Self {
            path: dir.join(scratch_name(key)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("failed to remove scratch file {}: {e}", self.path.display()),
        }
    }
}

/// File name used for the scratch copy of `key`: `<digest>-<file name>`.
///
/// Long file names keep only their last bytes, so the extension survives.
pub fn scratch_name(key: &str) -> String {
    let digest = hex::encode(Sha256::digest(key.as_bytes()));
    let name = match file_name(key) {
        "" => "object",
        name => tail(name, MAX_NAME_TAIL_BYTES),
    };
    format!("{}-{name}", &digest[..DIGEST_PREFIX_LEN])
}

fn tail(name: &str, max_bytes: usize) -> &str {
    if name.len() <= max_bytes {
        return name;
    }
    let mut start = name.len() - max_bytes;
    while !name.is_char_boundary(start) {
        start += 1;
    }
    &name[start..]
}
