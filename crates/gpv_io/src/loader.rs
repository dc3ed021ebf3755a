//! Loader: read one region document (`data/<region>.json`) with a size limit,
//! validate it against the embedded schema, and deserialize into the typed
//! `ScheduleDocument`. No network I/O.

#![forbid(unsafe_code)]

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use gpv_core::ScheduleDocument;
use serde_json::Value;

use crate::{schema, try_sha256_hex, IoError};

/// Region documents above this size are rejected before parsing.
pub const MAX_DOCUMENT_BYTES: u64 = 8 * 1024 * 1024;

/// A validated document plus what the host needs to name and record outputs.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub path: PathBuf,
    /// `regionId` if non-blank, else the file stem.
    pub region_id: String,
    /// SHA-256 of the raw bytes as read.
    pub source_sha256: String,
    pub document: ScheduleDocument,
}

/// Load, validate and type one region document.
pub fn load_document(path: &Path) -> Result<LoadedDocument, IoError> {
    let bytes = read_bytes_with_limit(path, MAX_DOCUMENT_BYTES)?;
    let source_sha256 = try_sha256_hex(&bytes)?;
    let document = parse_document(&bytes)?;
    let region_id = region_id_for(&document, path);
    tracing::debug!(path = %path.display(), region = %region_id, "loaded region document");
    Ok(LoadedDocument {
        path: path.to_path_buf(),
        region_id,
        source_sha256,
        document,
    })
}

/// Parse + validate + deserialize an in-memory document.
pub fn parse_document(bytes: &[u8]) -> Result<ScheduleDocument, IoError> {
    let v: Value = serde_json::from_slice(bytes)?;
    schema::validate_region_document(&v)?;
    serde_json::from_value(v).map_err(|e| IoError::Json {
        pointer: "/".into(),
        msg: e.to_string(),
    })
}

/// Read at most `limit` bytes; one byte more means the file is too large.
pub fn read_bytes_with_limit(path: &Path, limit: u64) -> Result<Vec<u8>, IoError> {
    let f = File::open(path).map_err(|e| IoError::Path(format!("{}: {e}", path.display())))?;
    let mut buf = Vec::new();
    f.take(limit + 1)
        .read_to_end(&mut buf)
        .map_err(|e| IoError::Path(format!("{}: {e}", path.display())))?;
    if buf.len() as u64 > limit {
        return Err(IoError::Limit(format!(
            "{} exceeds {limit} bytes",
            path.display()
        )));
    }
    Ok(buf)
}

/// `regionId` when present and non-blank, otherwise the file stem.
pub fn region_id_for(doc: &ScheduleDocument, path: &Path) -> String {
    if let Some(id) = doc.region_id.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        return id.to_string();
    }
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "region".to_string())
}

/// Every `*.json` file directly inside `dir`, sorted by file name.
pub fn list_region_files(dir: &Path) -> Result<Vec<PathBuf>, IoError> {
    let rd = fs::read_dir(dir).map_err(|e| IoError::Path(format!("{}: {e}", dir.display())))?;
    let mut out = Vec::new();
    for entry in rd {
        let p = entry?.path();
        let is_json = p
            .extension()
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if is_json && p.is_file() {
            out.push(p);
        }
    }
    out.sort();
    Ok(out)
}
