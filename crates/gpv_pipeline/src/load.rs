//! LOAD: read a region document through `gpv_io` and render it in one go.

use std::path::Path;

use gpv_io::loader::{load_document, LoadedDocument};

use crate::context::{Mode, RenderContext};
use crate::model::RenderedView;
use crate::{render_document, PipelineError};

/// Loaded document together with its rendered view.
#[derive(Debug, Clone)]
pub struct LoadedView {
    pub loaded: LoadedDocument,
    pub view: RenderedView,
}

/// Any I/O or validation failure aborts the pass before anything is built.
pub fn load_and_render(path: &Path, mode: Mode, ctx: &RenderContext) -> Result<LoadedView, PipelineError> {
    let loaded = load_document(path)?;
    let view = render_document(&loaded.document, mode, ctx);
    Ok(LoadedView { loaded, view })
}
