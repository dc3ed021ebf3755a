//! Plain-text renderer: fixed-width tables, one glyph per state.
//!
//! Glyphs: `.` light, `#` outage, `<` first half out, `>` second half out,
//! `?` uncertain, `~` unrecognized code, blank for no data. Columns holding an
//! update carry a `*` in the header; the emphasized row ends with `@`.

use std::fmt::Write as _;

use gpv_core::{StateCode, StateKind};
use gpv_pipeline::{Row, Table};

use crate::RenderedView;

const CELL_WIDTH: usize = 3;

pub fn glyph(state: Option<&str>) -> char {
    let Some(raw) = state else { return ' ' };
    match StateCode::parse(raw).kind() {
        StateKind::On => '.',
        StateKind::Off => '#',
        StateKind::FirstHalfOff => '<',
        StateKind::SecondHalfOff => '>',
        StateKind::Uncertain => '?',
        StateKind::Unknown => '~',
    }
}

pub fn render_text(view: &RenderedView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.title);
    if let Some(badge) = &view.group_badge {
        let _ = writeln!(out, "{badge}");
    }
    for table in view.tables() {
        out.push('\n');
        write_table(&mut out, table);
    }
    if let Some(s) = &view.summary {
        out.push('\n');
        let mut head = String::new();
        if let Some(d) = &s.date_line {
            head.push_str(d);
            head.push(' ');
        }
        head.push_str(s.status_badge);
        if let Some(n) = &s.group_number {
            let _ = write!(head, " [{n}]");
        }
        let _ = writeln!(out, "{head}");
        let _ = writeln!(out, "{}", s.note);
        for iv in &s.intervals {
            let _ = writeln!(out, "  {}", iv.text);
        }
        if let Some(p) = &s.placeholder {
            let _ = writeln!(out, "  {p}");
        }
    }
    if view.last_updated_line.is_some() || view.meta_line.is_some() {
        out.push('\n');
    }
    for line in [&view.last_updated_line, &view.meta_line].into_iter().flatten() {
        let _ = writeln!(out, "{line}");
    }
    out
}

fn write_table(out: &mut String, table: &Table) {
    let _ = writeln!(out, "{}", table.caption);
    let label_width = table
        .rows
        .iter()
        .filter_map(|r| match r {
            Row::Data(d) => Some(d.label.chars().count()),
            Row::Error(_) => None,
        })
        .chain(std::iter::once(table.corner.chars().count()))
        .max()
        .unwrap_or(0);

    let _ = write!(out, "{:<label_width$}", table.corner);
    for col in &table.columns {
        let short: String = col.label.chars().take(2).collect();
        let mark = if col.update { "*" } else { "" };
        let _ = write!(out, " {:<w$}", format!("{short}{mark}"), w = CELL_WIDTH);
    }
    out.push('\n');

    for row in &table.rows {
        match row {
            Row::Data(d) => {
                let _ = write!(out, "{:<label_width$}", d.label);
                for cell in &d.cells {
                    let _ = write!(out, " {:^w$}", glyph(cell.state.as_deref()), w = CELL_WIDTH);
                }
                if d.is_today {
                    out.push_str(" @");
                }
                out.push('\n');
            }
            Row::Error(e) => {
                let _ = writeln!(out, "{}", e.message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyphs_per_state() {
        assert_eq!(glyph(None), ' ');
        assert_eq!(glyph(Some("yes")), '.');
        assert_eq!(glyph(Some("no")), '#');
        assert_eq!(glyph(Some("mfirst")), '<');
        assert_eq!(glyph(Some("second")), '>');
        assert_eq!(glyph(Some("maybe")), '?');
        assert_eq!(glyph(Some("storm")), '~');
    }
}
