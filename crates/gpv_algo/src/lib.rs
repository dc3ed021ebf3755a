// crates/gpv_algo/src/lib.rs
#![forbid(unsafe_code)]

//! Schedule interpretation: everything between the typed documents and the
//! view model. Pure functions over `gpv_core` types; the only clock input is an
//! explicit `now` epoch.

use std::sync::OnceLock;

use regex::Regex;

pub mod calendar;
pub mod intervals;
pub mod key_select;
pub mod time_grid;
pub mod updates;

pub use calendar::{
    current_year, day_month, parse_time_zone, tomorrow_after, weekday_index, DaySelector,
    DEFAULT_TIME_ZONE,
};
pub use intervals::{format_hhmm, reduce_day, DayStatus, DaySummary, Interval};
pub use key_select::{batch_keys, select_key, KeyChoice, KeySource};
pub use time_grid::{parse_time_label, SlotStart, TimeGrid};
pub use updates::{
    map_minutes_to_index, reconcile_last_updated, update_minutes, LastUpdated, Side, UpdateStamp,
};

/// Compile a literal pattern once; `None` (never expected) disables the matcher.
pub fn cached_regex(cell: &'static OnceLock<Option<Regex>>, pattern: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| Regex::new(pattern).ok()).as_ref()
}

/// Parse a 1..=4 digit capture as a number; out-of-range values were excluded by the pattern.
pub(crate) fn capture_u32(caps: &regex::Captures<'_>, i: usize) -> Option<u32> {
    caps.get(i)?.as_str().parse().ok()
}
