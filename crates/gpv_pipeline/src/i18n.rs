//! Static phrasebook. Upstream data is Ukrainian, so `uk` is the default and
//! the fallback for a missing English phrase is the key itself.

use crate::context::Lang;

#[derive(Copy, Clone)]
struct Phrase {
    key: &'static str,
    uk: &'static str,
    en: &'static str,
}

const PHRASES: &[Phrase] = &[
    Phrase { key: "title",            uk: "Графік погодинних відключень",  en: "Hourly outage schedule" },
    Phrase { key: "section_today",    uk: "Графік на сьогодні та завтра",   en: "Today and tomorrow" },
    Phrase { key: "section_week",     uk: "Графік на тиждень",              en: "Weekly schedule" },
    Phrase { key: "corner",           uk: "Часові проміжки",                en: "Time slots" },
    Phrase { key: "today",            uk: "Сьогодні",                       en: "Today" },
    Phrase { key: "tomorrow",         uk: "Завтра",                         en: "Tomorrow" },
    Phrase { key: "missing_schedule", uk: "Помилка: відсутні дані для",     en: "Error: no data for" },
    Phrase { key: "queue",            uk: "Черга",                          en: "Queue" },
    Phrase { key: "last_updated",     uk: "Дата та час останнього оновлення інформації на графіку", en: "Schedule information last updated" },
    Phrase { key: "updated",          uk: "Оновлено",                       en: "Updated" },
    Phrase { key: "summary_on",       uk: "світло буде весь день",          en: "power all day" },
    Phrase { key: "summary_unknown",  uk: "Відключень за даними графіка не очікується", en: "No outages expected according to the schedule" },
    Phrase { key: "summary_off",      uk: "світло буде відсутнє",           en: "no power" },
    Phrase { key: "from",             uk: "з",                              en: "from" },
    Phrase { key: "to",               uk: "до",                             en: "to" },
];

pub fn t(lang: Lang, key: &'static str) -> &'static str {
    for p in PHRASES {
        if p.key == key {
            return match lang {
                Lang::Uk => p.uk,
                Lang::En => p.en,
            };
        }
    }
    key
}
