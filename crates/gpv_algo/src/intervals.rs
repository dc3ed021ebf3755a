//! Interval reducer: one day's slot states → day status + merged outage windows.
//!
//! Contract:
//! - Column span is `[start, next column start)`, `[start, 24:00)` for the last
//!   column; columns with an unresolvable or empty span are skipped entirely.
//! - `no` → whole span; `first`/`mfirst` → `[s, min(s+30, e))`;
//!   `second`/`msecond` → `[min(s+30, e), e)`. The half split is a fixed 30
//!   minutes whatever the span length.
//! - `maybe` and unknown codes add nothing but clear the all-yes flag; `yes`
//!   keeps it.
//! - Chunks are sorted by start and coalesced when they touch or overlap.
//!
//! Status: no chunks + all-yes → `On`; no chunks otherwise → `Unknown`
//! (includes a missing schedule); any chunk → `Off`.

use gpv_core::{DaySchedule, StateKind};

use crate::time_grid::TimeGrid;

const HALF_SLOT_MINUTES: u32 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DayStatus {
    On,
    Off,
    Unknown,
}

impl DayStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DayStatus::On => "ON",
            DayStatus::Off => "OFF",
            DayStatus::Unknown => "UNKNOWN",
        }
    }
}

/// Half-open outage window in minutes of day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Interval {
    pub start: u32,
    pub end: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DaySummary {
    pub status: DayStatus,
    pub intervals: Vec<Interval>,
}

pub fn reduce_day(grid: &TimeGrid, day: Option<&DaySchedule>) -> DaySummary {
    let Some(day) = day else {
        return DaySummary { status: DayStatus::Unknown, intervals: Vec::new() };
    };

    let mut chunks: Vec<Interval> = Vec::new();
    let mut yes_only = true;

    for (i, col) in grid.slots().iter().enumerate() {
        let Some((s, e)) = grid.span(i) else { continue };
        let kind = day.get(&col.slot).map(|c| c.kind()).unwrap_or(StateKind::Unknown);
        let mid = (s + HALF_SLOT_MINUTES).min(e);
        match kind {
            StateKind::On => continue,
            StateKind::Off => chunks.push(Interval { start: s, end: e }),
            StateKind::FirstHalfOff if mid > s => chunks.push(Interval { start: s, end: mid }),
            StateKind::SecondHalfOff if e > mid => chunks.push(Interval { start: mid, end: e }),
            StateKind::FirstHalfOff
            | StateKind::SecondHalfOff
            | StateKind::Uncertain
            | StateKind::Unknown => {}
        }
        yes_only = false;
    }

    let intervals = merge(chunks);
    let status = match (intervals.is_empty(), yes_only) {
        (true, true) => DayStatus::On,
        (true, false) => DayStatus::Unknown,
        (false, _) => DayStatus::Off,
    };
    DaySummary { status, intervals }
}

/// Sort by start and coalesce touching/overlapping chunks.
fn merge(mut chunks: Vec<Interval>) -> Vec<Interval> {
    chunks.sort_by_key(|c| c.start);
    let mut out: Vec<Interval> = Vec::with_capacity(chunks.len());
    for c in chunks {
        match out.last_mut() {
            Some(cur) if c.start <= cur.end => cur.end = cur.end.max(c.end),
            _ => out.push(c),
        }
    }
    out
}

/// `HH:MM` with zero padding; 1440 renders as `24:00`.
pub fn format_hhmm(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
