//! BUILD_WEEK: the weekday × slot matrix from `preset.data[key]`.

use gpv_algo::TimeGrid;
use gpv_core::{DayIndex, GroupKey, IconSet, Preset};

use crate::context::Lang;
use crate::i18n::t;
use crate::model::{DataRow, ErrorRow, Row, RowDay, Table, TableKind};
use crate::table::{empty_table, state_cell};

/// One row per `preset.days` entry (ascending). Days the key's schedule
/// does not cover get empty cells. The row for `today_weekday` is emphasized.
///
/// A key without a weekly schedule yields a single error row spanning the
/// corner column plus every slot column.
pub fn build_week(
    preset: &Preset,
    grid: &TimeGrid,
    key: &GroupKey,
    today_weekday: Option<DayIndex>,
    lang: Lang,
) -> Table {
    let mut table = empty_table(TableKind::Matrix, t(lang, "section_week"), grid, lang);

    let Some(week) = preset.week_for(key) else {
        tracing::warn!(key = %key, "no weekly schedule for key");
        table.rows.push(Row::Error(ErrorRow {
            message: format!("{} {key}", t(lang, "missing_schedule")),
            col_span: 1 + table.columns.len(),
        }));
        return table;
    };

    for (&day, label) in &preset.days {
        let schedule = week.get(&day);
        let cells = grid
            .slots()
            .iter()
            .map(|col| {
                let state = schedule.and_then(|s| s.get(&col.slot));
                state_cell(preset, state, label, &col.label, IconSet::Week)
            })
            .collect();
        table.rows.push(Row::Data(DataRow {
            label: label.clone(),
            day: RowDay::Weekday(day),
            is_today: today_weekday == Some(day),
            cells,
        }));
    }
    table
}
