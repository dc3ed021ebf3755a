//! HIGHLIGHT: mark the columns in effect at the fact and preset update times.
//!
//! Runs after the tables are built. Each side maps its update time of day to a
//! column; both marks may land on the same column.

use gpv_algo::{map_minutes_to_index, update_minutes, TimeGrid};
use gpv_core::{Fact, Preset};

use crate::model::RenderedView;

/// Column indices to mark: fact side (`update`, then `updateFact`) and
/// preset side (`updateFact`, then `update`). Unparseable text marks nothing.
pub fn update_columns(grid: &TimeGrid, fact: &Fact, preset: &Preset) -> Vec<usize> {
    let mut out: Vec<usize> = [fact.update_marker_text(), preset.update_text()]
        .into_iter()
        .filter(|text| !text.is_empty())
        .filter_map(|text| {
            let mins = update_minutes(text);
            if mins.is_none() {
                tracing::debug!(text, "update text has no time of day; no column marked");
            }
            mins
        })
        .filter_map(|mins| map_minutes_to_index(grid, mins))
        .collect();
    out.dedup();
    out
}

pub fn apply_highlights(view: &mut RenderedView, columns: &[usize]) {
    for table in view.tables_mut() {
        for &idx in columns {
            table.mark_update(idx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> TimeGrid {
        let tz: std::collections::BTreeMap<_, _> = (0..24u32)
            .map(|h| (h + 1, vec![format!("{:02}-{:02}", h, h + 1)]))
            .collect();
        TimeGrid::resolve(&tz)
    }

    #[test]
    fn marks_fact_and_preset_columns() {
        let fact = Fact { update: Some("30.10.2025 21:51".into()), ..Fact::default() };
        let preset = Preset { update: Some("30.10.2025 08:05".into()), ..Preset::default() };
        assert_eq!(update_columns(&grid(), &fact, &preset), vec![21, 8]);
    }

    #[test]
    fn same_column_once() {
        let fact = Fact { update_fact: Some("30.10 13:10".into()), ..Fact::default() };
        let preset = Preset { update_fact: Some("31.10.2025 13:59".into()), ..Preset::default() };
        assert_eq!(update_columns(&grid(), &fact, &preset), vec![13]);
    }

    #[test]
    fn nothing_for_unparseable_or_empty() {
        let fact = Fact { update: Some("вчора".into()), ..Fact::default() };
        assert!(update_columns(&grid(), &fact, &Preset::default()).is_empty());
        assert!(update_columns(&TimeGrid::default(), &Fact::default(), &Preset::default()).is_empty());
    }
}
