//! SUMMARIZE: the compact day card: status, outage windows, group number.

use chrono_tz::Tz;
use gpv_algo::{format_hhmm, reduce_day, DayStatus, TimeGrid};
use gpv_core::{DayEpoch, Fact, GroupKey, Preset};

use crate::context::Lang;
use crate::i18n::t;
use crate::label::{group_number, summary_date_line};
use crate::model::{IntervalView, SummaryView};

const PLACEHOLDER: &str = "—";

pub fn build_summary(
    preset: &Preset,
    fact: &Fact,
    grid: &TimeGrid,
    key: &GroupKey,
    active_day: Option<DayEpoch>,
    tz: Tz,
    lang: Lang,
) -> SummaryView {
    let schedule = active_day.and_then(|d| fact.day_for(d, key));
    if active_day.is_some() && schedule.is_none() {
        tracing::debug!(key = %key, day = ?active_day, "no fact schedule for summary day");
    }
    let summary = reduce_day(grid, schedule);

    let (note, placeholder) = match summary.status {
        DayStatus::On => (t(lang, "summary_on"), None),
        DayStatus::Unknown => (t(lang, "summary_unknown"), Some(PLACEHOLDER.to_string())),
        DayStatus::Off => (t(lang, "summary_off"), None),
    };
    let (from, to) = (t(lang, "from"), t(lang, "to"));
    let intervals = summary
        .intervals
        .iter()
        .map(|iv| IntervalView {
            start: iv.start,
            end: iv.end,
            text: format!("{from} {} {to} {}", format_hhmm(iv.start), format_hhmm(iv.end)),
        })
        .collect();

    SummaryView {
        day_epoch: active_day,
        date_line: active_day.map(|d| summary_date_line(fact, d, tz, lang)),
        status: summary.status.as_str(),
        status_badge: match summary.status {
            DayStatus::On => "ON",
            DayStatus::Off | DayStatus::Unknown => "OFF",
        },
        note: note.to_string(),
        intervals,
        placeholder,
        group_number: group_number(key, preset),
    }
}
