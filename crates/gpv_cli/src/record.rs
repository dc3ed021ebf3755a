// crates/gpv_cli/src/record.rs
//
// render_record.json: provenance for one run over one region document.
// Written as canonical JSON (sorted keys, compact) so identical runs give
// identical bytes.

use std::path::Path;

use gpv_core::DayEpoch;
use gpv_io::canonical_json::write_canonical_file;
use gpv_io::loader::LoadedDocument;
use gpv_io::IoError;
use gpv_pipeline::{Mode, RenderedView};
use serde::Serialize;

pub const RECORD_FILE: &str = "render_record.json";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRecord {
    pub engine: EngineMeta,
    pub region: String,
    pub input: InputRef,
    pub renders: Vec<RecordEntry>,
}

#[derive(Debug, Serialize)]
pub struct EngineMeta {
    pub name: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct InputRef {
    pub path: String,
    pub sha256: String,
}

/// One render pass: mode, the host-facing metadata, and the files written.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordEntry {
    pub mode: Mode,
    pub active_key: String,
    pub active_day_epoch: Option<DayEpoch>,
    pub last_updated_label: String,
    pub outputs: Vec<String>,
}

impl RecordEntry {
    pub fn new(mode: Mode, view: &RenderedView, outputs: Vec<String>) -> Self {
        RecordEntry {
            mode,
            active_key: view.metadata.active_key.clone(),
            active_day_epoch: view.metadata.active_day_epoch,
            last_updated_label: view.metadata.last_updated_label.clone(),
            outputs,
        }
    }
}

impl RenderRecord {
    pub fn new(loaded: &LoadedDocument) -> Self {
        RenderRecord {
            engine: EngineMeta {
                name: env!("CARGO_PKG_NAME"),
                version: env!("CARGO_PKG_VERSION"),
            },
            region: loaded.region_id.clone(),
            input: InputRef {
                path: loaded.path.display().to_string(),
                sha256: loaded.source_sha256.clone(),
            },
            renders: Vec::new(),
        }
    }

    /// Write `<dir>/render_record.json`.
    pub fn write(&self, dir: &Path) -> Result<(), IoError> {
        write_canonical_file(&dir.join(RECORD_FILE), self)
    }
}
