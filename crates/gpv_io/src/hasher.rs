//! crates/gpv_io/src/hasher.rs
//!
//! SHA-256 of region documents as read; the digest lands in render records.
//! Hex digests are lowercase.

#![forbid(unsafe_code)]

use sha2::{Digest, Sha256};

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
