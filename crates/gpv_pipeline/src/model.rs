//! crates/gpv_pipeline/src/model.rs
//! Serializable view model. Renderers in `gpv_report` map it onto JSON, HTML
//! or text; nothing here knows about any output surface.

use gpv_core::{DayEpoch, DayIndex, SlotIndex};
use serde::Serialize;

use crate::context::{Lang, Mode, Theme};

/// Host-facing facts about the pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewMetadata {
    pub active_key: String,
    pub active_day_epoch: Option<DayEpoch>,
    /// Reconciled "last updated" text; empty when neither side has one.
    pub last_updated_label: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderedView {
    pub metadata: ViewMetadata,
    pub mode: Mode,
    pub theme: Theme,
    pub lang: Lang,
    pub title: String,
    /// "Черга: 1.2" style badge (every mode but summary).
    pub group_badge: Option<String>,
    /// Full-mode line with the last-updated label.
    pub last_updated_line: Option<String>,
    /// `contentHash: …` or `Оновлено: …`.
    pub meta_line: Option<String>,
    pub today: Option<Table>,
    pub week: Option<Table>,
    pub summary: Option<SummaryView>,
}

impl RenderedView {
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.today.iter().chain(self.week.iter())
    }

    pub fn tables_mut(&mut self) -> impl Iterator<Item = &mut Table> {
        self.today.iter_mut().chain(self.week.iter_mut())
    }

    pub fn is_empty(&self) -> bool {
        self.today.is_none() && self.week.is_none() && self.summary.is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    Today,
    Matrix,
}

impl TableKind {
    pub fn id(self) -> &'static str {
        match self {
            TableKind::Today => "today",
            TableKind::Matrix => "matrix",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Table {
    pub kind: TableKind,
    pub caption: String,
    /// Header corner label.
    pub corner: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl Table {
    /// Flag column `idx` (header and every data cell) as holding an update.
    pub fn mark_update(&mut self, idx: usize) {
        if let Some(col) = self.columns.get_mut(idx) {
            col.update = true;
        }
        for row in &mut self.rows {
            if let Row::Data(r) = row {
                if let Some(cell) = r.cells.get_mut(idx) {
                    cell.update = true;
                }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub slot: SlotIndex,
    pub label: String,
    pub start_minute: Option<u32>,
    pub update: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Row {
    Data(DataRow),
    Error(ErrorRow),
}

/// What a data row stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum RowDay {
    Weekday(DayIndex),
    Epoch(DayEpoch),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataRow {
    pub label: String,
    pub day: RowDay,
    /// Emphasized row (weekday of `fact.today` in the week matrix).
    pub is_today: bool,
    pub cells: Vec<Cell>,
}

/// Single row spanning the whole table in place of a missing schedule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRow {
    pub message: String,
    pub col_span: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Cell {
    /// Raw state code; `None` renders an empty cell.
    pub state: Option<String>,
    pub class: Option<String>,
    pub icon: Option<&'static str>,
    pub title: Option<String>,
    pub update: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryView {
    pub day_epoch: Option<DayEpoch>,
    /// "Сьогодні (30.10)," style line.
    pub date_line: Option<String>,
    /// `ON`, `OFF` or `UNKNOWN`.
    pub status: &'static str,
    /// Badge text: `ON`, otherwise `OFF`.
    pub status_badge: &'static str,
    pub note: String,
    pub intervals: Vec<IntervalView>,
    /// Shown instead of intervals when the status is unknown.
    pub placeholder: Option<String>,
    /// Compact group number, e.g. `1.2`.
    pub group_number: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IntervalView {
    pub start: u32,
    pub end: u32,
    pub text: String,
}
