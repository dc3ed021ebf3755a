//! "Last updated" timestamps: parsing, column mapping, and fact/preset reconciliation.
//!
//! Upstream writes `D.M[.YYYY] H:MM` (e.g. `30.10.2025 21:51`). Two readings exist:
//! - column highlighting only needs the time of day and accepts the shape
//!   anywhere in the string;
//! - the displayed label compares full stamps and requires the whole trimmed
//!   string to match. A missing year is the current year in the render time zone;
//!   two-digit years are 20YY.

use std::cmp::Ordering;
use std::sync::OnceLock;

use regex::Regex;

use crate::time_grid::TimeGrid;
use crate::{cached_regex, capture_u32};

static RE_STAMP_ANY: OnceLock<Option<Regex>> = OnceLock::new();
static RE_STAMP_FULL: OnceLock<Option<Regex>> = OnceLock::new();

const STAMP: &str = r"(\d{1,2})\.(\d{1,2})(?:\.(\d{2,4}))?\s+(\d{1,2}):(\d{2})";
const STAMP_FULL: &str = r"^(\d{1,2})\.(\d{1,2})(?:\.(\d{2,4}))?\s+(\d{1,2}):(\d{2})$";

/// Parsed stamp; field order gives the comparison priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UpdateStamp {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

impl UpdateStamp {
    /// Strict parse of a whole (trimmed) string. Day clamps to 1..=31, month to
    /// 1..=12, hour to 0..=23, minute to 0..=59.
    pub fn parse(text: &str, default_year: i32) -> Option<Self> {
        let re = cached_regex(&RE_STAMP_FULL, STAMP_FULL)?;
        let c = re.captures(text.trim())?;
        let year = match c.get(3) {
            Some(y) => {
                let y: i32 = y.as_str().parse().ok()?;
                // Upstream compares a short year as written (25 < 2025), so a
                // "30.10.25" stamp would always lose there. Here it is 2025.
                if y < 100 { 2000 + y } else { y }
            }
            None => default_year,
        };
        Some(UpdateStamp {
            year,
            month: capture_u32(&c, 2)?.clamp(1, 12),
            day: capture_u32(&c, 1)?.clamp(1, 31),
            hour: capture_u32(&c, 4)?.min(23),
            minute: capture_u32(&c, 5)?.min(59),
        })
    }

    #[inline]
    pub fn minutes_of_day(&self) -> u32 {
        self.hour * 60 + self.minute
    }
}

/// Time of day of the first stamp found anywhere in `text` (hour clamped to 0..=24).
pub fn update_minutes(text: &str) -> Option<u32> {
    let re = cached_regex(&RE_STAMP_ANY, STAMP)?;
    let c = re.captures(text)?;
    Some(capture_u32(&c, 4)?.min(24) * 60 + capture_u32(&c, 5)?.min(59))
}

/// Column in effect at `minutes`: the highest column whose resolved start is
/// `<= minutes`, column 0 when none is. `None` only for an empty grid.
pub fn map_minutes_to_index(grid: &TimeGrid, minutes: u32) -> Option<usize> {
    if grid.is_empty() {
        return None;
    }
    let idx = grid
        .starts()
        .enumerate()
        .filter_map(|(i, s)| s.filter(|&s| s <= minutes).map(|_| i))
        .last()
        .unwrap_or(0);
    Some(idx)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Fact,
    Preset,
}

/// Outcome of choosing the displayed "last updated" text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LastUpdated {
    /// Neither side has text; nothing is displayed.
    Neither,
    /// Only the fact side has text.
    Fact(String),
    /// Only the preset side has text.
    Preset(String),
    /// Both sides have text; `winner` is the later parseable stamp (fact on
    /// ties), the only parseable one, or the fact side when neither parses.
    Both { fact: String, preset: String, winner: Side },
}

impl LastUpdated {
    pub fn label(&self) -> &str {
        match self {
            LastUpdated::Neither => "",
            LastUpdated::Fact(t) | LastUpdated::Preset(t) => t,
            LastUpdated::Both { fact, winner: Side::Fact, .. } => fact,
            LastUpdated::Both { preset, winner: Side::Preset, .. } => preset,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.label().is_empty()
    }
}

/// Reconcile the fact-side and preset-side texts (callers pass already-chosen
/// field fallbacks; blank means absent).
pub fn reconcile_last_updated(fact_text: &str, preset_text: &str, default_year: i32) -> LastUpdated {
    let fact = fact_text.trim();
    let preset = preset_text.trim();
    match (fact.is_empty(), preset.is_empty()) {
        (true, true) => LastUpdated::Neither,
        (false, true) => LastUpdated::Fact(fact.to_string()),
        (true, false) => LastUpdated::Preset(preset.to_string()),
        (false, false) => {
            let a = UpdateStamp::parse(fact, default_year);
            let b = UpdateStamp::parse(preset, default_year);
            let winner = match (a, b) {
                (Some(a), Some(b)) => match a.cmp(&b) {
                    Ordering::Less => Side::Preset,
                    Ordering::Equal | Ordering::Greater => Side::Fact,
                },
                (None, Some(_)) => Side::Preset,
                (Some(_), None) | (None, None) => Side::Fact,
            };
            LastUpdated::Both {
                fact: fact.to_string(),
                preset: preset.to_string(),
                winner,
            }
        }
    }
}
