//! Shared pieces of the two table builders: header columns and state cells.

use gpv_algo::TimeGrid;
use gpv_core::{IconSet, Preset, StateCode};

use crate::context::Lang;
use crate::i18n::t;
use crate::model::{Cell, Column, Table, TableKind};

pub(crate) fn empty_table(kind: TableKind, caption: &str, grid: &TimeGrid, lang: Lang) -> Table {
    Table {
        kind,
        caption: caption.to_string(),
        corner: t(lang, "corner").to_string(),
        columns: grid
            .slots()
            .iter()
            .map(|s| Column {
                slot: s.slot,
                label: s.label.clone(),
                start_minute: s.start,
                update: false,
            })
            .collect(),
        rows: Vec::new(),
    }
}

/// Cell for one state; absent or blank codes give an empty cell.
///
/// Tooltip: `"<row label> <slot label> — <description>"`, where the
/// description is `time_type[state]` or the raw code.
pub(crate) fn state_cell(
    preset: &Preset,
    state: Option<&StateCode>,
    row_label: &str,
    slot_label: &str,
    icons: IconSet,
) -> Cell {
    let Some(state) = state.filter(|s| !s.is_blank()) else {
        return Cell::default();
    };
    Cell {
        state: Some(state.as_str().to_string()),
        class: Some(state.css_class()),
        icon: state.icon(icons).map(|i| i.path()),
        title: Some(format!("{row_label} {slot_label} — {}", preset.describe(state))),
        update: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_missing_states_are_empty() {
        let p = Preset::default();
        assert_eq!(state_cell(&p, None, "Пн", "00-01", IconSet::Week), Cell::default());
        let blank = StateCode::parse("");
        assert_eq!(state_cell(&p, Some(&blank), "Пн", "00-01", IconSet::Week), Cell::default());
    }

    #[test]
    fn tooltip_uses_description_or_code() {
        let mut p = Preset::default();
        p.time_type.insert("no".into(), "Світла немає".into());
        let c = state_cell(&p, Some(&StateCode::No), "Понеділок", "00-01", IconSet::Week);
        assert_eq!(c.title.as_deref(), Some("Понеділок 00-01 — Світла немає"));
        assert_eq!(c.class.as_deref(), Some("state-no"));
        assert_eq!(c.icon, Some("icons/no.svg"));

        let odd = StateCode::parse("storm");
        let c = state_cell(&p, Some(&odd), "Сьогодні", "13-14", IconSet::Today);
        assert_eq!(c.title.as_deref(), Some("Сьогодні 13-14 — storm"));
        assert_eq!(c.class.as_deref(), Some("state-storm"));
        assert_eq!(c.icon, None);
    }
}
