// crates/gpv_cli/src/main.rs
//
// Exit codes, error mapping, tracing setup, and the three run paths:
// validate-only, single render, batch render (one document or a directory).

mod args;
mod record;

mod exitcodes {
    pub const OK: i32 = 0;
    /// Batch finished but at least one output failed.
    pub const BATCH_FAILED: i32 = 1;
    pub const VALIDATION: i32 = 2;
    pub const IO: i32 = 4;
    pub const RENDER: i32 = 5;
}

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use gpv_algo::batch_keys;
use gpv_core::ids::parse_canonical_numbers;
use gpv_core::GroupKey;
use gpv_io::loader::{self, LoadedDocument};
use gpv_io::IoError;
use gpv_pipeline::{render_document, Mode, RenderContext, RenderedView, ViewTargets};
use gpv_report::{Format, ReportError};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use args::{parse_and_validate as parse_cli, Args};
use record::{RecordEntry, RenderRecord};

/// Modes written per group in batch runs.
const BATCH_MODES: [Mode; 3] = [Mode::Full, Mode::Emergency, Mode::Week];

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// Schema / JSON shape failures.
    Validation(String),
    /// Read/write/path/limit errors.
    Io(String),
    /// Renderer errors.
    Render(String),
    /// Batch run with failed outputs.
    Batch { failed: usize, total: usize },
}

impl std::fmt::Display for MainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MainError::Validation(m) => write!(f, "validation: {m}"),
            MainError::Io(m) => write!(f, "io: {m}"),
            MainError::Render(m) => write!(f, "render: {m}"),
            MainError::Batch { failed, total } => write!(f, "{failed} of {total} outputs failed"),
        }
    }
}

fn main() -> ExitCode {
    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("gpv: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION as u8);
        }
    };
    init_tracing(args.verbose);

    let result = if args.validate_only { validate_only(&args) } else { run(&args) };
    let rc = match result {
        Ok(()) => exitcodes::OK,
        Err(e) => {
            eprintln!("gpv: error: {e}");
            map_error(&e)
        }
    };
    ExitCode::from(rc as u8)
}

fn init_tracing(verbose: bool) {
    let default = if verbose { LevelFilter::INFO } else { LevelFilter::WARN };
    let env_filter = EnvFilter::builder()
        .with_default_directive(default.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn map_error(e: &MainError) -> i32 {
    use exitcodes::*;
    match e {
        MainError::Validation(_) => VALIDATION,
        MainError::Io(_) => IO,
        MainError::Render(_) => RENDER,
        MainError::Batch { .. } => BATCH_FAILED,
    }
}

fn map_io_err(e: IoError) -> MainError {
    match e {
        IoError::Schema { pointer, msg } => MainError::Validation(format!("schema {pointer}: {msg}")),
        IoError::Json { pointer, msg } => MainError::Validation(format!("json {pointer}: {msg}")),
        IoError::Invalid(m) => MainError::Validation(m),
        IoError::Path(m) => MainError::Io(format!("path: {m}")),
        IoError::Limit(m) => MainError::Io(format!("limit: {m}")),
        IoError::Hash(m) => MainError::Io(format!("hash: {m}")),
    }
}

fn map_report_err(e: ReportError) -> MainError {
    MainError::Render(e.to_string())
}

/// Load + schema check only.
fn validate_only(args: &Args) -> Result<(), MainError> {
    for path in input_files(args)? {
        let loaded = loader::load_document(&path).map_err(map_io_err)?;
        if !args.quiet {
            eprintln!("validate-only: {} OK", loaded.region_id);
        }
    }
    Ok(())
}

fn input_files(args: &Args) -> Result<Vec<PathBuf>, MainError> {
    match (&args.data, &args.data_dir) {
        (Some(file), _) => Ok(vec![file.clone()]),
        (None, Some(dir)) => loader::list_region_files(dir).map_err(map_io_err),
        (None, None) => Err(MainError::Validation("missing --data or --data-dir".into())),
    }
}

fn base_context(args: &Args) -> RenderContext {
    let mut ctx = RenderContext {
        requested_theme: args.theme,
        requested_day: args.day,
        lang: args.lang,
        time_zone: args.tz,
        targets: ViewTargets::FULL_PAGE,
        ..RenderContext::default()
    };
    if let Some(now) = args.now {
        ctx = ctx.with_now(now);
    }
    ctx
}

fn run(args: &Args) -> Result<(), MainError> {
    if !args.is_batch() {
        let path = args.data.as_ref().ok_or_else(|| MainError::Validation("missing --data".into()))?;
        let loaded = loader::load_document(path).map_err(map_io_err)?;
        return render_single(args, &loaded);
    }

    let mut stats = BatchStats::default();
    for path in input_files(args)? {
        let loaded = match loader::load_document(&path) {
            Ok(l) => l,
            Err(e) if args.data_dir.is_some() => {
                tracing::warn!(path = %path.display(), error = %e, "skipping region document");
                continue;
            }
            Err(e) => return Err(map_io_err(e)),
        };
        if let Some(region) = &args.region {
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
            if loaded.region_id != *region && stem != region {
                continue;
            }
        }
        render_batch(args, &loaded, &mut stats)?;
    }

    if !args.quiet {
        println!(
            "Rendered: {}/{} succeeded, {} failed",
            stats.ok,
            stats.total(),
            stats.failed
        );
    }
    if stats.failed > 0 {
        return Err(MainError::Batch { failed: stats.failed, total: stats.total() });
    }
    Ok(())
}

fn render_single(args: &Args, loaded: &LoadedDocument) -> Result<(), MainError> {
    let mut ctx = base_context(args);
    ctx.requested_key = args.gpv.clone();
    let view = render_document(&loaded.document, args.mode, &ctx);
    let key: GroupKey = view
        .metadata
        .active_key
        .parse()
        .unwrap_or_else(|_| GroupKey::fallback());

    fs::create_dir_all(&args.out).map_err(|e| MainError::Io(format!("mkdir {}: {e}", args.out.display())))?;
    let mut outputs = Vec::new();
    for &format in &args.render {
        let name = output_name(&key, args.mode, format);
        write_view(&view, format, &args.out.join(&name))?;
        if !args.quiet {
            eprintln!("wrote {}", args.out.join(&name).display());
        }
        outputs.push(name);
    }

    if args.record {
        let mut rec = RenderRecord::new(loaded);
        rec.renders.push(RecordEntry::new(args.mode, &view, outputs));
        rec.write(&args.out).map_err(map_io_err)?;
    }
    Ok(())
}

#[derive(Default)]
struct BatchStats {
    ok: usize,
    failed: usize,
}

impl BatchStats {
    fn total(&self) -> usize {
        self.ok + self.failed
    }
}

/// Every canonical group × `BATCH_MODES` × requested formats, under `<out>/<regionId>/`.
fn render_batch(args: &Args, loaded: &LoadedDocument, stats: &mut BatchStats) -> Result<(), MainError> {
    let keys = batch_keys(&loaded.document.preset);
    let out_dir = args.out.join(&loaded.region_id);
    fs::create_dir_all(&out_dir).map_err(|e| MainError::Io(format!("mkdir {}: {e}", out_dir.display())))?;
    tracing::info!(region = %loaded.region_id, groups = keys.len(), "batch render");

    #[cfg(feature = "progress")]
    let bar = indicatif::ProgressBar::new((keys.len() * BATCH_MODES.len() * args.render.len()) as u64);

    let mut record = RenderRecord::new(loaded);
    for key in &keys {
        let ctx = base_context(args).with_key(key.clone());
        for mode in BATCH_MODES {
            let view = render_document(&loaded.document, mode, &ctx);
            let mut outputs = Vec::new();
            for &format in &args.render {
                let name = output_name(key, mode, format);
                match write_view(&view, format, &out_dir.join(&name)) {
                    Ok(()) => {
                        tracing::info!(file = %name, "rendered");
                        stats.ok += 1;
                        outputs.push(name);
                    }
                    Err(e) => {
                        tracing::warn!(file = %name, error = %e, "render failed");
                        stats.failed += 1;
                    }
                }
                #[cfg(feature = "progress")]
                bar.inc(1);
            }
            record.renders.push(RecordEntry::new(mode, &view, outputs));
        }
    }
    #[cfg(feature = "progress")]
    bar.finish_and_clear();

    if args.record {
        record.write(&out_dir).map_err(map_io_err)?;
    }
    Ok(())
}

fn write_view(view: &RenderedView, format: Format, path: &Path) -> Result<(), MainError> {
    let text = gpv_report::render(view, format).map_err(map_report_err)?;
    gpv_io::canonical_json::write_atomic(path, text.as_bytes())
        .map_err(|e| MainError::Io(format!("write {}: {e}", path.display())))
}

/// `gpv-<major>-<minor>` for canonical keys (any prefix case); otherwise the
/// key lowercased with every non-alphanumeric character replaced by `-`.
fn file_stem(key: &GroupKey) -> String {
    match parse_canonical_numbers(key.as_str(), true) {
        Some((major, minor)) => format!("gpv-{major}-{minor}"),
        None => {
            let slug: String = key
                .as_str()
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
                .collect();
            format!("gpv-{slug}")
        }
    }
}

fn output_name(key: &GroupKey, mode: Mode, format: Format) -> String {
    let suffix = match mode {
        Mode::Full => String::new(),
        other => format!("-{}", other.as_str()),
    };
    format!("{}{suffix}.{}", file_stem(key), format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> GroupKey {
        s.parse().unwrap()
    }

    #[test]
    fn output_names() {
        assert_eq!(output_name(&key("GPV1.2"), Mode::Full, Format::Html), "gpv-1-2.html");
        assert_eq!(output_name(&key("gpv3.1"), Mode::Emergency, Format::Json), "gpv-3-1-emergency.json");
        assert_eq!(output_name(&key("GPV12.10"), Mode::Week, Format::Text), "gpv-12-10-week.txt");
        assert_eq!(output_name(&key("Queue 7"), Mode::Summary, Format::Html), "gpv-queue-7-summary.html");
        assert_eq!(file_stem(&key("Queue A.1")), "gpv-queue-a-1");
    }

    #[test]
    fn io_errors_map_to_exit_codes() {
        let schema = map_io_err(IoError::Schema { pointer: "/fact".into(), msg: "bad".into() });
        assert_eq!(map_error(&schema), exitcodes::VALIDATION);
        assert_eq!(map_error(&map_io_err(IoError::Path("x".into()))), exitcodes::IO);
        assert_eq!(map_error(&map_report_err(ReportError::Template("t"))), exitcodes::RENDER);
        assert_eq!(map_error(&MainError::Batch { failed: 1, total: 2 }), exitcodes::BATCH_FAILED);
    }
}
