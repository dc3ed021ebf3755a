//! gpv_report/src/lib.rs: offline renderers for a `RenderedView`.
//!
//! No I/O here: callers pass a view already built by `gpv_pipeline` and write
//! the returned text wherever they like.
//!
//! - `render_json` (feature `render_json`): fixed key order, metadata first
//! - `render_html` (feature `render_html`): one self-contained page via minijinja
//! - `render_text`: fixed-width table for terminals

#![deny(unsafe_code)]

use core::fmt;

pub use gpv_pipeline::RenderedView;

#[cfg(feature = "render_html")]
pub mod render_html;
#[cfg(feature = "render_json")]
pub mod render_json;
pub mod render_text;

#[cfg(feature = "render_html")]
pub use render_html::render_html;
#[cfg(feature = "render_json")]
pub use render_json::{render_json, render_json_string};
pub use render_text::render_text;

#[derive(Debug)]
pub enum ReportError {
    Template(&'static str),
    Serialize(String),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Template(stage) => write!(f, "template error ({stage})"),
            ReportError::Serialize(msg) => write!(f, "serialize error: {msg}"),
        }
    }
}

impl std::error::Error for ReportError {}

/// Output formats the CLI can ask for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    Html,
    Text,
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Html => "html",
            Format::Text => "txt",
        }
    }
}

/// Render `view` in `format`; formats compiled out report a template error.
pub fn render(view: &RenderedView, format: Format) -> Result<String, ReportError> {
    match format {
        #[cfg(feature = "render_json")]
        Format::Json => render_json_string(view),
        #[cfg(not(feature = "render_json"))]
        Format::Json => Err(ReportError::Template("render_json feature disabled")),
        #[cfg(feature = "render_html")]
        Format::Html => render_html(view),
        #[cfg(not(feature = "render_html"))]
        Format::Html => Err(ReportError::Template("render_html feature disabled")),
        Format::Text => Ok(render_text(view)),
    }
}
