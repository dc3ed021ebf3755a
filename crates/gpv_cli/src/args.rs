// crates/gpv_cli/src/args.rs
//
// Offline CLI argument surface: types, parsers, and validation.
//
// Rules:
// - Exactly one input: --data <file>  XOR  --data-dir <dir>
// - No networked paths (reject any scheme:// like http/https/file)
// - --data-dir always renders every group of every region (batch)
// - --region filters --data-dir by regionId or file stem
// - Every flag can also come from a GPV_* environment variable

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use clap::Parser;
use gpv_algo::{parse_time_zone, DaySelector, DEFAULT_TIME_ZONE};
use gpv_core::{DayEpoch, GroupKey};
use gpv_pipeline::{Lang, Mode, Theme};
use gpv_report::Format;

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "gpv",
    disable_help_subcommand = true,
    about = "Offline renderer for GPV rolling-blackout schedules"
)]
pub struct Args {
    // --- Input ---
    /// One region document (`data/<region>.json`).
    #[arg(long, env = "GPV_DATA", conflicts_with = "data_dir")]
    pub data: Option<PathBuf>,
    /// Directory of region documents; renders every group of every region.
    #[arg(long, env = "GPV_DATA_DIR")]
    pub data_dir: Option<PathBuf>,
    /// Only this region (regionId or file stem) from --data-dir.
    #[arg(long, env = "GPV_REGION", requires = "data_dir")]
    pub region: Option<String>,

    // --- View ---
    /// Group key, e.g. GPV1.2. Unknown keys fall back to the first group.
    #[arg(long, env = "GPV_GPV", value_parser = parse_group_key, conflicts_with = "all_groups")]
    pub gpv: Option<GroupKey>,
    /// today | tomorrow | <day epoch>.
    #[arg(long, env = "GPV_DAY", default_value = "today", value_parser = parse_day)]
    pub day: DaySelector,
    /// Only `dark` selects the dark theme.
    #[arg(long, env = "GPV_THEME", default_value = "light", value_parser = parse_theme)]
    pub theme: Theme,
    /// full | emergency | week | summary | auto (ignored in batch runs).
    #[arg(long, env = "GPV_MODE", default_value = "full", value_parser = parse_mode)]
    pub mode: Mode,
    /// Phrasebook language: uk | en.
    #[arg(long, env = "GPV_LANG", default_value = "uk", value_parser = parse_lang)]
    pub lang: Lang,
    /// IANA time zone for weekdays, dates and the current year.
    #[arg(long, env = "GPV_TZ", default_value = DEFAULT_TIME_ZONE, value_parser = parse_tz)]
    pub tz: Tz,
    /// "Now" as epoch seconds (defaults to the system clock).
    #[arg(long, env = "GPV_NOW")]
    pub now: Option<DayEpoch>,

    // --- Output ---
    /// Output directory.
    #[arg(long, env = "GPV_OUT", default_value = "out")]
    pub out: PathBuf,
    /// Renderer(s) to emit: json, html, text.
    #[arg(long, value_parser = parse_format, num_args = 1..=3, default_value = "html")]
    pub render: Vec<Format>,
    /// Render every GPV<major>.<minor> group in modes full, emergency and week.
    #[arg(long)]
    pub all_groups: bool,
    /// Write render_record.json next to the outputs.
    #[arg(long)]
    pub record: bool,

    // --- Control ---
    /// Load and validate only; render nothing.
    #[arg(long)]
    pub validate_only: bool,
    /// Suppress non-essential output.
    #[arg(long, short)]
    pub quiet: bool,
    /// Log at info level (RUST_LOG overrides).
    #[arg(long, short)]
    pub verbose: bool,
}

impl Args {
    /// Batch over all groups (explicitly, or implied by --data-dir).
    pub fn is_batch(&self) -> bool {
        self.all_groups || self.data_dir.is_some()
    }
}

/// Errors surfaced by argument validation.
/// Messages are short and stable.
#[derive(Debug)]
pub enum CliError {
    Missing(&'static str),
    NonLocalPath(String),
    NotFound(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use CliError::*;
        match self {
            Missing(s) => write!(f, "missing required flag: {s}"),
            NonLocalPath(p) => write!(f, "path must be local (no scheme): {p}"),
            NotFound(p) => write!(f, "not found: {p}"),
        }
    }
}
impl std::error::Error for CliError {}

pub fn parse_group_key(s: &str) -> Result<GroupKey, String> {
    s.parse().map_err(|e| format!("{e}"))
}

pub fn parse_day(s: &str) -> Result<DaySelector, String> {
    s.parse().map_err(|e| format!("{e}"))
}

pub fn parse_theme(s: &str) -> Result<Theme, String> {
    Ok(s.parse::<Theme>().unwrap_or_default())
}

pub fn parse_mode(s: &str) -> Result<Mode, String> {
    s.parse().map_err(|e| format!("{e}"))
}

pub fn parse_lang(s: &str) -> Result<Lang, String> {
    s.parse().map_err(|e| format!("{e}"))
}

pub fn parse_tz(s: &str) -> Result<Tz, String> {
    parse_time_zone(s).map_err(|e| format!("{e}: {s}"))
}

pub fn parse_format(s: &str) -> Result<Format, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "json" => Ok(Format::Json),
        "html" => Ok(Format::Html),
        "text" | "txt" => Ok(Format::Text),
        other => Err(format!("unknown renderer `{other}` (expected json, html or text)")),
    }
}

/// Entry point used by main.rs
pub fn parse_and_validate() -> Result<Args, CliError> {
    let mut args = Args::parse();
    validate(&args)?;
    args.data = args.data.take().map(|p| normalize_path(&p));
    args.data_dir = args.data_dir.take().map(|p| normalize_path(&p));
    args.out = normalize_path(&args.out);
    args.render = unique_formats(&args.render);
    Ok(args)
}

/// First occurrence of each format, in request order.
fn unique_formats(requested: &[Format]) -> Vec<Format> {
    let mut out: Vec<Format> = Vec::with_capacity(requested.len());
    for &f in requested {
        if !out.contains(&f) {
            out.push(f);
        }
    }
    out
}

fn validate(a: &Args) -> Result<(), CliError> {
    for p in [a.data.as_deref(), a.data_dir.as_deref(), Some(a.out.as_path())]
        .into_iter()
        .flatten()
    {
        ensure_local_path(p)?;
    }
    match (&a.data, &a.data_dir) {
        (Some(file), None) => ensure_exists(file, "--data", false),
        (None, Some(dir)) => ensure_exists(dir, "--data-dir", true),
        _ => Err(CliError::Missing("--data or --data-dir")),
    }
}

#[inline]
fn has_scheme(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    lower.contains("://") || lower.starts_with("http:") || lower.starts_with("https:") || lower.starts_with("file:")
}

fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    match p.to_str() {
        Some(s) if has_scheme(s) => Err(CliError::NonLocalPath(s.to_string())),
        _ => Ok(()),
    }
}

fn ensure_exists(p: &Path, label: &'static str, dir: bool) -> Result<(), CliError> {
    let meta = fs::metadata(p).map_err(|_| CliError::NotFound(format!("{label} {}", p.display())))?;
    if meta.is_dir() != dir {
        return Err(CliError::NotFound(format!("{label} {}", p.display())));
    }
    Ok(())
}

/// Absolute form of `p`, relative to the CWD when it does not exist yet.
fn normalize_path(p: &Path) -> PathBuf {
    fs::canonicalize(p).unwrap_or_else(|_| {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join(p)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_parsers() {
        assert_eq!(parse_format("HTML"), Ok(Format::Html));
        assert_eq!(parse_format("txt"), Ok(Format::Text));
        assert!(parse_format("png").is_err());
        assert_eq!(parse_theme("dark"), Ok(Theme::Dark));
        assert_eq!(parse_theme("neon"), Ok(Theme::Light));
        assert_eq!(parse_day("tomorrow"), Ok(DaySelector::Tomorrow));
        assert_eq!(parse_day("1761775200"), Ok(DaySelector::Epoch(1_761_775_200)));
        assert!(parse_mode("png").is_err());
        assert!(parse_tz("Mars/Base").is_err());
        assert!(parse_group_key("  ").is_err());
    }

    #[test]
    fn repeated_formats_render_once() {
        let req = [Format::Html, Format::Json, Format::Html, Format::Json];
        assert_eq!(unique_formats(&req), vec![Format::Html, Format::Json]);
    }

    #[test]
    fn rejects_schemes() {
        assert!(ensure_local_path(Path::new("https://x/kyiv.json")).is_err());
        assert!(ensure_local_path(Path::new("file://tmp/kyiv.json")).is_err());
        assert!(ensure_local_path(Path::new("/tmp/kyiv.json")).is_ok());
    }

    #[test]
    fn normalize_path_returns_absolute() {
        assert!(normalize_path(Path::new("does/not/exist")).is_absolute());
    }

    #[test]
    fn clap_definition_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
