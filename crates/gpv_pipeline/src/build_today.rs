//! BUILD_TODAY: the Today/Tomorrow table from `fact.data`.
//!
//! Rows: the active day (default `fact.today`), then the following day. When
//! the active day is `fact.today` the following day uses the tomorrow rule
//! (smallest later epoch, else any other epoch); for any other active day
//! only a strictly later epoch qualifies. Without an active day (no
//! `fact.today`, or a tomorrow that does not resolve) the table has no rows.
//! Every row uses the Today icon pair.

use chrono_tz::Tz;
use gpv_algo::{tomorrow_after, TimeGrid};
use gpv_core::{DayEpoch, Fact, GroupKey, IconSet, Preset};

use crate::context::Lang;
use crate::i18n::t;
use crate::label::day_label;
use crate::model::{DataRow, Row, RowDay, Table, TableKind};
use crate::table::{empty_table, state_cell};

pub fn build_today(
    preset: &Preset,
    fact: &Fact,
    grid: &TimeGrid,
    key: &GroupKey,
    active_day: Option<DayEpoch>,
    tz: Tz,
    lang: Lang,
) -> Table {
    let mut table = empty_table(TableKind::Today, t(lang, "section_today"), grid, lang);

    let Some(active) = active_day else {
        tracing::debug!(key = %key, "no active day; today table left empty");
        return table;
    };
    table.rows.push(day_row(preset, fact, grid, key, active, tz, lang));

    let epochs = fact.data.keys().copied();
    let next = if fact.today == Some(active) {
        tomorrow_after(Some(active), epochs)
    } else {
        epochs.filter(|&d| d > active).min()
    };
    if let Some(day) = next.filter(|&d| d != active) {
        table.rows.push(day_row(preset, fact, grid, key, day, tz, lang));
    }

    table
}

fn day_row(
    preset: &Preset,
    fact: &Fact,
    grid: &TimeGrid,
    key: &GroupKey,
    day: DayEpoch,
    tz: Tz,
    lang: Lang,
) -> Row {
    let label = day_label(fact, day, tz, lang);
    let schedule = fact.day_for(day, key);
    if schedule.is_none() {
        tracing::debug!(day, key = %key, "no fact schedule for day; row left empty");
    }
    let cells = grid
        .slots()
        .iter()
        .map(|col| {
            let state = schedule.and_then(|s| s.get(&col.slot));
            state_cell(preset, state, &label, &col.label, IconSet::Today)
        })
        .collect();
    Row::Data(DataRow {
        label,
        day: RowDay::Epoch(day),
        is_today: fact.today == Some(day),
        cells,
    })
}
