//! Time grid: slot labels → minute-of-day starts.
//!
//! Label shapes, tried in order on the trimmed label:
//! - `HH:MM`  → `hh*60 + mm` (hour clamped to 0..=24, minute to 0..=59)
//! - `H-H`    → start hour only, clamped to 0..=24
//! - `H`      → bare hour, clamped to 0..=24
//!
//! Anything else is unresolvable: the slot keeps its column but is left out
//! of interval reduction and highlighting.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use gpv_core::{SlotIndex, MINUTES_PER_DAY};
use regex::Regex;

use crate::{cached_regex, capture_u32};

static RE_CLOCK: OnceLock<Option<Regex>> = OnceLock::new();
static RE_RANGE: OnceLock<Option<Regex>> = OnceLock::new();
static RE_HOUR: OnceLock<Option<Regex>> = OnceLock::new();

/// Minute-of-day start of a label, `None` when the label has no known shape.
pub fn parse_time_label(label: &str) -> Option<u32> {
    let s = label.trim();
    if s.is_empty() {
        return None;
    }
    if let Some(c) = cached_regex(&RE_CLOCK, r"^([0-9]{1,2}):([0-9]{2})$").and_then(|re| re.captures(s)) {
        let hh = capture_u32(&c, 1)?.min(24);
        let mm = capture_u32(&c, 2)?.min(59);
        return Some(hh * 60 + mm);
    }
    if let Some(c) = cached_regex(&RE_RANGE, r"^([0-9]{1,2})\s*-\s*([0-9]{1,2})$").and_then(|re| re.captures(s)) {
        return Some(capture_u32(&c, 1)?.min(24) * 60);
    }
    if let Some(c) = cached_regex(&RE_HOUR, r"^([0-9]{1,2})$").and_then(|re| re.captures(s)) {
        return Some(capture_u32(&c, 1)?.min(24) * 60);
    }
    None
}

/// One grid column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotStart {
    pub slot: SlotIndex,
    /// Display label (`time_zone[slot][0]`, empty when absent).
    pub label: String,
    /// Resolved minute-of-day start, `None` when unresolvable.
    pub start: Option<u32>,
}

/// Ordered grid columns (ascending slot index).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TimeGrid {
    slots: Vec<SlotStart>,
}

impl TimeGrid {
    pub fn resolve(time_zone: &BTreeMap<SlotIndex, Vec<String>>) -> Self {
        let slots = time_zone
            .iter()
            .map(|(&slot, labels)| {
                let label = labels.first().cloned().unwrap_or_default();
                let start = parse_time_label(&label);
                if start.is_none() {
                    tracing::debug!(slot, label = %label, "unresolvable time label");
                }
                SlotStart { slot, label, start }
            })
            .collect();
        TimeGrid { slots }
    }

    #[inline]
    pub fn slots(&self) -> &[SlotStart] {
        &self.slots
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn starts(&self) -> impl Iterator<Item = Option<u32>> + '_ {
        self.slots.iter().map(|s| s.start)
    }

    /// `[start, end)` of column `i`: end is the next column's start, or 24:00
    /// for the last column. `None` if either bound is unresolvable or the span is empty.
    pub fn span(&self, i: usize) -> Option<(u32, u32)> {
        let s = self.slots.get(i)?.start?;
        let e = match self.slots.get(i + 1) {
            Some(next) => next.start?,
            None => MINUTES_PER_DAY,
        };
        (e > s).then_some((s, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grid(labels: &[&str]) -> TimeGrid {
        let tz = labels
            .iter()
            .enumerate()
            .map(|(i, l)| (i as u32 + 1, vec![l.to_string()]))
            .collect();
        TimeGrid::resolve(&tz)
    }

    #[test]
    fn label_shapes() {
        assert_eq!(parse_time_label("08:30"), Some(510));
        assert_eq!(parse_time_label(" 7:05 "), Some(425));
        assert_eq!(parse_time_label("00-01"), Some(0));
        assert_eq!(parse_time_label("13 - 14"), Some(780));
        assert_eq!(parse_time_label("9"), Some(540));
        assert_eq!(parse_time_label("25"), Some(1440));
        assert_eq!(parse_time_label("10:75"), Some(659));
        assert_eq!(parse_time_label("ніч"), None);
        assert_eq!(parse_time_label(""), None);
        assert_eq!(parse_time_label("08:30-09:00"), None);
    }

    #[test]
    fn spans_use_next_column() {
        let g = grid(&["00-01", "01-02", "x", "03-04", "23-24"]);
        assert_eq!(g.span(0), Some((0, 60)));
        assert_eq!(g.span(1), None, "next start unresolvable");
        assert_eq!(g.span(2), None);
        assert_eq!(g.span(3), Some((180, 1380)));
        assert_eq!(g.span(4), Some((1380, 1440)));
        assert_eq!(g.span(5), None);
    }

    #[test]
    fn orders_by_numeric_slot_index() {
        let mut tz = BTreeMap::new();
        tz.insert(10, vec!["09-10".to_string()]);
        tz.insert(2, vec!["01-02".to_string()]);
        tz.insert(1, vec![]);
        let g = TimeGrid::resolve(&tz);
        let slots: Vec<u32> = g.slots().iter().map(|s| s.slot).collect();
        assert_eq!(slots, [1, 2, 10]);
        assert_eq!(g.slots()[0].label, "");
        assert_eq!(g.slots()[0].start, None);
    }

    proptest! {
        #[test]
        fn hourly_grids_are_non_decreasing(n in 1usize..=24) {
            let labels: Vec<String> = (0..n).map(|h| format!("{:02}-{:02}", h, h + 1)).collect();
            let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
            let g = grid(&refs);
            let starts: Vec<u32> = g.starts().map(|s| s.unwrap()).collect();
            prop_assert!(starts.windows(2).all(|w| w[0] <= w[1]));
        }

        #[test]
        fn clock_labels_stay_within_a_day(h in 0u32..100, m in 0u32..100) {
            let label = format!("{h}:{m:02}");
            if let Some(v) = parse_time_label(&label) {
                prop_assert!(v <= 24 * 60 + 59);
            }
        }
    }
}
