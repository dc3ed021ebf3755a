//! LABEL: short texts around the tables: group badge, compact group number,
//! day labels, the "last updated" line and the meta line.

use std::sync::OnceLock;

use chrono_tz::Tz;
use gpv_algo::{cached_regex, day_month, tomorrow_after};
use gpv_core::{DayEpoch, Fact, GroupKey, Preset};
use regex::Regex;

use crate::context::Lang;
use crate::i18n::t;

static RE_QUEUE_PREFIX: OnceLock<Option<Regex>> = OnceLock::new();
static RE_NUMBER: OnceLock<Option<Regex>> = OnceLock::new();

/// "Черга: 1.2" badge.
///
/// A `sch_names` label is used as is, with a leading "Черга" normalized to
/// "Черга: ". Without a label the badge is built from the key numbers.
pub fn group_badge(key: &GroupKey, preset: &Preset, lang: Lang) -> String {
    let queue = t(lang, "queue");
    if let Some(name) = preset.sch_names.get(key.as_str()).map(|s| s.trim()).filter(|s| !s.is_empty()) {
        if name.starts_with("Черга:") {
            return name.to_string();
        }
        return match cached_regex(&RE_QUEUE_PREFIX, r"^Черга\b\s*") {
            Some(re) if re.is_match(name) => re.replace(name, format!("{queue}: ")).into_owned(),
            _ => name.to_string(),
        };
    }
    match key.numbers() {
        Some((major, minor)) => format!("{queue}: {major}.{minor}"),
        None => format!("{queue}: {key}"),
    }
}

/// Compact `major.minor`: from the key when canonical, else the first
/// `N.N` in the `sch_names` label.
pub fn group_number(key: &GroupKey, preset: &Preset) -> Option<String> {
    if let Some((major, minor)) = key.numbers() {
        return Some(format!("{major}.{minor}"));
    }
    let name = preset.sch_names.get(key.as_str())?;
    let re = cached_regex(&RE_NUMBER, r"(\d+)\.(\d+)")?;
    let c = re.captures(name)?;
    Some(format!("{}.{}", &c[1], &c[2]))
}

/// Row label for a fact day: "Сьогодні" for `fact.today`, "Завтра (dd.mm)"
/// for the day after it, `dd.mm` otherwise.
pub fn day_label(fact: &Fact, day: DayEpoch, tz: Tz, lang: Lang) -> String {
    if fact.today == Some(day) {
        return t(lang, "today").to_string();
    }
    let dm = day_month(day, tz).unwrap_or_else(|| day.to_string());
    if tomorrow_after(fact.today, fact.data.keys().copied()) == Some(day) {
        format!("{} ({dm})", t(lang, "tomorrow"))
    } else {
        dm
    }
}

/// Summary date line: "Сьогодні (dd.mm)," / "Завтра (dd.mm)," / "dd.mm,".
pub fn summary_date_line(fact: &Fact, day: DayEpoch, tz: Tz, lang: Lang) -> String {
    let dm = day_month(day, tz).unwrap_or_else(|| day.to_string());
    if fact.today == Some(day) {
        format!("{} ({dm}),", t(lang, "today"))
    } else if tomorrow_after(fact.today, fact.data.keys().copied()) == Some(day) {
        format!("{} ({dm}),", t(lang, "tomorrow"))
    } else {
        format!("{dm},")
    }
}

pub fn last_updated_line(label: &str, lang: Lang) -> Option<String> {
    let label = label.trim();
    (!label.is_empty()).then(|| format!("{}: {label}", t(lang, "last_updated")))
}

/// `contentHash: <hash>` when the document carries one, else
/// `Оновлено: <fact.update>` when that is non-blank.
pub fn meta_line(content_hash: Option<&str>, fact: &Fact, lang: Lang) -> Option<String> {
    if let Some(hash) = content_hash.map(str::trim).filter(|h| !h.is_empty()) {
        return Some(format!("contentHash: {hash}"));
    }
    let update = fact.update_label_text();
    (!update.is_empty()).then(|| format!("{}: {update}", t(lang, "updated")))
}
