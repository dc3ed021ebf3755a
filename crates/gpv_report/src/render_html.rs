//! HTML renderer: one self-contained page (inline CSS, icon paths only).
//!
//! The template name ends in `.html`, so minijinja auto-escapes every
//! interpolated value. Icon paths are static and marked `safe`.

use minijinja::{context, Environment};

use crate::{RenderedView, ReportError};

static TEMPLATE: &str = r#"<!doctype html>
<html lang="{{ view.lang }}">
<head>
<meta charset="utf-8">
<title>{{ view.title }}{% if view.group_badge %} — {{ view.group_badge }}{% endif %}</title>
<style>
body { font-family: system-ui, sans-serif; margin: 16px; background: #fff; color: #1b1b1b; }
body.theme-dark { background: #16181d; color: #e8e8e8; }
.badge { display: inline-block; padding: 2px 8px; border-radius: 6px; background: #ffd54f; color: #1b1b1b; font-weight: 600; }
table { border-collapse: collapse; margin: 12px 0; font-size: 12px; }
th, td { border: 1px solid #c8c8c8; padding: 2px; text-align: center; min-width: 26px; height: 26px; }
th.corner, th.day { text-align: left; padding: 2px 6px; white-space: nowrap; }
td img { width: 20px; height: 20px; }
.col-update { outline: 2px solid #e53935; outline-offset: -2px; }
tr.is-today th, tr.is-today td { background: rgba(255, 213, 79, 0.25); }
th.error { color: #c62828; text-align: left; }
.summary .status { font-weight: 700; }
.summary .status.on { color: #2e7d32; }
.summary .status.off { color: #c62828; }
.meta, .last-updated { color: #777; font-size: 12px; }
</style>
</head>
<body class="gpv{% if theme_class %} {{ theme_class }}{% endif %}">
<h1>{{ view.title }}</h1>
{% if view.group_badge %}<p><span class="badge">{{ view.group_badge }}</span></p>{% endif %}
{% for table in tables %}
<section id="{{ table.id }}">
<h2>{{ table.caption }}</h2>
<table>
<thead><tr><th class="corner">{{ table.corner }}</th>{% for col in table.columns %}<th{% if col.update %} class="col-update"{% endif %}>{{ col.label }}</th>{% endfor %}</tr></thead>
<tbody>
{% for row in table.rows %}{% if row.error %}<tr><th class="error" colspan="{{ row.col_span }}">{{ row.error }}</th></tr>
{% else %}<tr{% if row.is_today %} class="is-today"{% endif %}><th class="day">{{ row.label }}</th>{% for cell in row.cells %}<td class="{{ cell.class }}{% if cell.update %} col-update{% endif %}"{% if cell.title %} title="{{ cell.title }}"{% endif %}>{% if cell.icon %}<img src="{{ cell.icon|safe }}" alt="{{ cell.state }}">{% endif %}</td>{% endfor %}</tr>
{% endif %}{% endfor %}
</tbody>
</table>
</section>
{% endfor %}
{% if summary %}
<section class="summary" id="summary">
<p>{% if summary.date_line %}{{ summary.date_line }} {% endif %}<span class="status {{ summary.badge_class }}">{{ summary.status_badge }}</span>{% if summary.group_number %} <span class="badge">{{ summary.group_number }}</span>{% endif %}</p>
<p>{{ summary.note }}</p>
<ul>
{% for iv in summary.intervals %}<li>{{ iv }}</li>
{% endfor %}{% if summary.placeholder %}<li>{{ summary.placeholder }}</li>
{% endif %}</ul>
</section>
{% endif %}
{% if view.last_updated_line %}<p class="last-updated">{{ view.last_updated_line }}</p>{% endif %}
{% if view.meta_line %}<p class="meta">{{ view.meta_line }}</p>{% endif %}
</body>
</html>
"#;

pub fn render_html(view: &RenderedView) -> Result<String, ReportError> {
    let mut env = Environment::new();
    env.add_template("view.html", TEMPLATE)
        .map_err(|_| ReportError::Template("add_template"))?;
    let tmpl = env
        .get_template("view.html")
        .map_err(|_| ReportError::Template("get_template"))?;

    let tables: Vec<serde_json::Value> = view.tables().map(table_ctx).collect();
    let summary = view.summary.as_ref().map(|s| {
        serde_json::json!({
            "date_line": s.date_line,
            "status_badge": s.status_badge,
            "badge_class": if s.status_badge == "ON" { "on" } else { "off" },
            "note": s.note,
            "intervals": s.intervals.iter().map(|iv| iv.text.as_str()).collect::<Vec<_>>(),
            "placeholder": s.placeholder,
            "group_number": s.group_number,
        })
    });

    let ctx = context! {
        view => context! {
            lang => view.lang.as_str(),
            title => &view.title,
            group_badge => &view.group_badge,
            last_updated_line => &view.last_updated_line,
            meta_line => &view.meta_line,
        },
        theme_class => view.theme.css_class(),
        tables => tables,
        summary => summary,
    };

    tmpl.render(ctx).map_err(|_| ReportError::Template("render_html"))
}

fn table_ctx(t: &gpv_pipeline::Table) -> serde_json::Value {
    use gpv_pipeline::Row;

    let rows: Vec<serde_json::Value> = t
        .rows
        .iter()
        .map(|r| match r {
            Row::Data(d) => serde_json::json!({
                "label": d.label,
                "is_today": d.is_today,
                "cells": d.cells.iter().map(|c| serde_json::json!({
                    "state": c.state,
                    "class": c.class.as_deref().unwrap_or("empty"),
                    "icon": c.icon,
                    "title": c.title,
                    "update": c.update,
                })).collect::<Vec<_>>(),
            }),
            Row::Error(e) => serde_json::json!({ "error": e.message, "col_span": e.col_span }),
        })
        .collect();
    serde_json::json!({
        "id": t.kind.id(),
        "caption": t.caption,
        "corner": t.corner,
        "columns": t.columns.iter().map(|c| serde_json::json!({ "label": c.label, "update": c.update })).collect::<Vec<_>>(),
        "rows": rows,
    })
}
