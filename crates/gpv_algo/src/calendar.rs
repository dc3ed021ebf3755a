//! Calendar math in the render time zone (default `Europe/Kyiv`):
//! weekday of `fact.today`, `dd.mm` labels, current year, active/tomorrow day.

use core::str::FromStr;

use chrono::{DateTime, Datelike, TimeZone};
use chrono_tz::Tz;
use gpv_core::{CoreError, DayEpoch, DayIndex, Fact};

pub const DEFAULT_TIME_ZONE: &str = "Europe/Kyiv";

pub fn parse_time_zone(name: &str) -> Result<Tz, CoreError> {
    name.trim().parse::<Tz>().map_err(|_| CoreError::UnknownTimeZone)
}

fn local(epoch: DayEpoch, tz: Tz) -> Option<DateTime<Tz>> {
    tz.timestamp_opt(epoch, 0).single()
}

/// Mon = 1 … Sun = 7.
pub fn weekday_index(epoch: DayEpoch, tz: Tz) -> Option<DayIndex> {
    local(epoch, tz).map(|d| d.weekday().number_from_monday())
}

/// Two-digit day and month, `dd.mm`.
pub fn day_month(epoch: DayEpoch, tz: Tz) -> Option<String> {
    local(epoch, tz).map(|d| d.format("%d.%m").to_string())
}

/// Calendar year of `now` in `tz`.
pub fn current_year(now: DayEpoch, tz: Tz) -> i32 {
    local(now, tz).map(|d| d.year()).unwrap_or(1970)
}

/// The day after `today` among `days`: smallest epoch strictly greater; failing
/// that, the first other epoch. Without a `today` the smallest epoch is used.
pub fn tomorrow_after<I>(today: Option<DayEpoch>, days: I) -> Option<DayEpoch>
where
    I: IntoIterator<Item = DayEpoch>,
{
    let mut sorted: Vec<DayEpoch> = days.into_iter().collect();
    sorted.sort_unstable();
    let Some(today) = today else {
        return sorted.first().copied();
    };
    sorted
        .iter()
        .copied()
        .find(|&d| d > today)
        .or_else(|| sorted.iter().copied().find(|&d| d != today))
}

/// Which day the caller wants in view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DaySelector {
    #[default]
    Today,
    Tomorrow,
    Epoch(DayEpoch),
}

impl DaySelector {
    /// Resolve against a fact document: `Today` is `fact.today`, `Tomorrow`
    /// follows [`tomorrow_after`], an explicit epoch is taken as is.
    pub fn resolve(self, fact: &Fact) -> Option<DayEpoch> {
        match self {
            DaySelector::Today => fact.today,
            DaySelector::Tomorrow => tomorrow_after(fact.today, fact.data.keys().copied()),
            DaySelector::Epoch(e) => Some(e),
        }
    }
}

impl FromStr for DaySelector {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "today" => Ok(DaySelector::Today),
            "tomorrow" => Ok(DaySelector::Tomorrow),
            other => other
                .parse::<DayEpoch>()
                .map(DaySelector::Epoch)
                .map_err(|_| CoreError::InvalidDaySelector),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpv_core::GroupMap;

    // 2025-10-30 00:00 Europe/Kyiv (Thursday), the next day, and the day after.
    const THU: DayEpoch = 1_761_775_200;
    const FRI: DayEpoch = THU + 86_400;
    const SAT: DayEpoch = FRI + 86_400;

    fn kyiv() -> Tz {
        parse_time_zone(DEFAULT_TIME_ZONE).unwrap()
    }

    #[test]
    fn weekday_and_labels_in_kyiv() {
        assert_eq!(weekday_index(THU, kyiv()), Some(4));
        assert_eq!(weekday_index(SAT + 86_400, kyiv()), Some(7));
        assert_eq!(day_month(FRI, kyiv()).as_deref(), Some("31.10"));
        // 22:30 UTC on 31 Dec is already New Year in Kyiv.
        assert_eq!(current_year(1_767_220_200, kyiv()), 2026);
        assert_eq!(current_year(1_767_220_200, chrono_tz::UTC), 2025);
    }

    #[test]
    fn unknown_zone_is_rejected() {
        assert_eq!(parse_time_zone("Mars/Olympus"), Err(CoreError::UnknownTimeZone));
    }

    #[test]
    fn tomorrow_rules() {
        assert_eq!(tomorrow_after(Some(THU), [SAT, THU, FRI]), Some(FRI));
        assert_eq!(tomorrow_after(Some(FRI), [THU, FRI]), Some(THU));
        assert_eq!(tomorrow_after(Some(THU), [THU]), None);
        assert_eq!(tomorrow_after(None, [SAT, FRI]), Some(FRI));
        assert_eq!(tomorrow_after(Some(THU), []), None);
    }

    #[test]
    fn selector_parsing_and_resolution() {
        assert_eq!("Tomorrow".parse::<DaySelector>(), Ok(DaySelector::Tomorrow));
        assert_eq!(" 1761775200 ".parse::<DaySelector>(), Ok(DaySelector::Epoch(THU)));
        assert_eq!("yesterday".parse::<DaySelector>(), Err(CoreError::InvalidDaySelector));

        let mut fact = Fact { today: Some(THU), ..Fact::default() };
        fact.data.insert(THU, GroupMap::new());
        fact.data.insert(FRI, GroupMap::new());
        assert_eq!(DaySelector::Today.resolve(&fact), Some(THU));
        assert_eq!(DaySelector::Tomorrow.resolve(&fact), Some(FRI));
        assert_eq!(DaySelector::Epoch(SAT).resolve(&fact), Some(SAT));
    }
}
