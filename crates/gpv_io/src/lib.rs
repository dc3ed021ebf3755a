//! crates/gpv_io/src/lib.rs
//! I/O layer for region documents.
//!
//! - `loader`: bounded read → schema check → typed `ScheduleDocument`
//! - `schema`: embedded JSON Schema for `data/<region>.json`
//! - `canonical_json`: sorted-key compact JSON + atomic file writes
//! - `hasher`: SHA-256 over the raw document bytes
//!
//! Every error surfaced here aborts a render pass; callers report it and stop.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for gpv_io.
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors (open, read_dir, rename, fsync).
    #[error("io/path error: {0}")]
    Path(String),

    /// JSON parse or shape errors with a JSON Pointer to the offending node.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// JSON Schema validation failures.
    #[error("schema error at {pointer}: {msg}")]
    Schema { pointer: String, msg: String },

    /// Input exceeded a size limit.
    #[error("limit exceeded: {0}")]
    Limit(String),

    #[error("hash error: {0}")]
    Hash(String),

    /// Generic document invariants.
    #[error("invalid: {0}")]
    Invalid(String),
}

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json reports line/column, not a pointer; default to root.
        IoError::Json {
            pointer: "/".to_string(),
            msg: e.to_string(),
        }
    }
}

pub mod canonical_json;
#[cfg(feature = "hash")]
pub mod hasher;
pub mod loader;
pub mod schema;

/// Compute SHA-256 hex of `bytes` or fail when hashing is compiled out.
pub fn try_sha256_hex(bytes: &[u8]) -> Result<String, IoError> {
    #[cfg(feature = "hash")]
    {
        Ok(crate::hasher::sha256_hex(bytes))
    }
    #[cfg(not(feature = "hash"))]
    {
        let _ = bytes;
        Err(IoError::Hash("hash feature disabled".into()))
    }
}
