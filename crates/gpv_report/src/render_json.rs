//! JSON renderer. Relies on `serde_json`'s `preserve_order` so objects keep
//! insertion order: metadata → mode/theme/lang → labels → tables → summary.

use gpv_pipeline::{Cell, Column, Row, SummaryView, Table};
use serde_json::{Map as JsonMap, Value};

use crate::{RenderedView, ReportError};

pub fn render_json(view: &RenderedView) -> Value {
    let mut root = obj();

    let mut meta = obj();
    meta.insert("activeKey".into(), view.metadata.active_key.clone().into());
    meta.insert("activeDayEpoch".into(), opt(view.metadata.active_day_epoch));
    meta.insert("lastUpdatedLabel".into(), view.metadata.last_updated_label.clone().into());
    root.insert("metadata".into(), Value::Object(meta));

    root.insert("mode".into(), view.mode.as_str().into());
    root.insert("theme".into(), view.theme.as_str().into());
    root.insert("lang".into(), view.lang.as_str().into());
    root.insert("title".into(), view.title.clone().into());
    root.insert("groupBadge".into(), opt(view.group_badge.clone()));
    root.insert("lastUpdatedLine".into(), opt(view.last_updated_line.clone()));
    root.insert("metaLine".into(), opt(view.meta_line.clone()));

    if let Some(t) = &view.today {
        root.insert("today".into(), table_json(t));
    }
    if let Some(t) = &view.week {
        root.insert("week".into(), table_json(t));
    }
    if let Some(s) = &view.summary {
        root.insert("summary".into(), summary_json(s));
    }
    Value::Object(root)
}

/// Pretty-printed `render_json` output with a trailing newline.
pub fn render_json_string(view: &RenderedView) -> Result<String, ReportError> {
    let mut s = serde_json::to_string_pretty(&render_json(view))
        .map_err(|e| ReportError::Serialize(e.to_string()))?;
    s.push('\n');
    Ok(s)
}

fn table_json(t: &Table) -> Value {
    let mut o = obj();
    o.insert("id".into(), t.kind.id().into());
    o.insert("caption".into(), t.caption.clone().into());
    o.insert("corner".into(), t.corner.clone().into());
    o.insert("columns".into(), Value::Array(t.columns.iter().map(column_json).collect()));
    o.insert("rows".into(), Value::Array(t.rows.iter().map(row_json).collect()));
    Value::Object(o)
}

fn column_json(c: &Column) -> Value {
    let mut o = obj();
    o.insert("slot".into(), c.slot.into());
    o.insert("label".into(), c.label.clone().into());
    o.insert("startMinute".into(), opt(c.start_minute));
    o.insert("update".into(), c.update.into());
    Value::Object(o)
}

fn row_json(r: &Row) -> Value {
    let mut o = obj();
    match r {
        Row::Data(d) => {
            o.insert("label".into(), d.label.clone().into());
            o.insert("isToday".into(), d.is_today.into());
            o.insert("cells".into(), Value::Array(d.cells.iter().map(cell_json).collect()));
        }
        Row::Error(e) => {
            o.insert("error".into(), e.message.clone().into());
            o.insert("colSpan".into(), e.col_span.into());
        }
    }
    Value::Object(o)
}

fn cell_json(c: &Cell) -> Value {
    let mut o = obj();
    o.insert("state".into(), opt(c.state.clone()));
    if let Some(icon) = c.icon {
        o.insert("icon".into(), icon.into());
    }
    if let Some(title) = &c.title {
        o.insert("title".into(), title.clone().into());
    }
    if c.update {
        o.insert("update".into(), true.into());
    }
    Value::Object(o)
}

fn summary_json(s: &SummaryView) -> Value {
    let mut o = obj();
    o.insert("dayEpoch".into(), opt(s.day_epoch));
    o.insert("dateLine".into(), opt(s.date_line.clone()));
    o.insert("status".into(), s.status.into());
    o.insert("statusBadge".into(), s.status_badge.into());
    o.insert("note".into(), s.note.clone().into());
    let intervals = s
        .intervals
        .iter()
        .map(|iv| {
            let mut w = obj();
            w.insert("start".into(), iv.start.into());
            w.insert("end".into(), iv.end.into());
            w.insert("text".into(), iv.text.clone().into());
            Value::Object(w)
        })
        .collect();
    o.insert("intervals".into(), Value::Array(intervals));
    if let Some(p) = &s.placeholder {
        o.insert("placeholder".into(), p.clone().into());
    }
    o.insert("groupNumber".into(), opt(s.group_number.clone()));
    Value::Object(o)
}

#[inline]
fn obj() -> JsonMap<String, Value> {
    JsonMap::new()
}

fn opt<T: Into<Value>>(v: Option<T>) -> Value {
    v.map(Into::into).unwrap_or(Value::Null)
}
