//! crates/gpv_core/src/state.rs
//! Per-slot power states and their presentation icons.

use alloc::borrow::ToOwned;
use alloc::string::String;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// State code of one slot as written by the upstream producer.
///
/// Unrecognized codes are kept verbatim in `Other` so that the cell class and
/// tooltip can still echo them.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum StateCode {
    Yes,
    No,
    Maybe,
    First,
    MFirst,
    Second,
    MSecond,
    Other(String),
}

/// What a state code means for the outage computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateKind {
    /// Power expected for the whole slot.
    On,
    /// Power absent for the whole slot.
    Off,
    /// Power absent for the first half of the slot.
    FirstHalfOff,
    /// Power absent for the second half of the slot.
    SecondHalfOff,
    /// Outage possible.
    Uncertain,
    /// Missing or unrecognized code.
    Unknown,
}

impl StateCode {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "yes" => StateCode::Yes,
            "no" => StateCode::No,
            "maybe" => StateCode::Maybe,
            "first" => StateCode::First,
            "mfirst" => StateCode::MFirst,
            "second" => StateCode::Second,
            "msecond" => StateCode::MSecond,
            other => StateCode::Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            StateCode::Yes => "yes",
            StateCode::No => "no",
            StateCode::Maybe => "maybe",
            StateCode::First => "first",
            StateCode::MFirst => "mfirst",
            StateCode::Second => "second",
            StateCode::MSecond => "msecond",
            StateCode::Other(s) => s,
        }
    }

    /// An empty string carries no information and renders as an empty cell.
    #[inline]
    pub fn is_blank(&self) -> bool {
        matches!(self, StateCode::Other(s) if s.is_empty())
    }

    pub fn kind(&self) -> StateKind {
        match self {
            StateCode::Yes => StateKind::On,
            StateCode::No => StateKind::Off,
            StateCode::Maybe => StateKind::Uncertain,
            StateCode::First | StateCode::MFirst => StateKind::FirstHalfOff,
            StateCode::Second | StateCode::MSecond => StateKind::SecondHalfOff,
            StateCode::Other(_) => StateKind::Unknown,
        }
    }

    /// CSS-style class used by every renderer: `state-<raw code>`.
    pub fn css_class(&self) -> String {
        let mut s = String::from("state-");
        s.push_str(self.as_str());
        s
    }

    /// Icon for this state in the given table, if the state has one.
    pub fn icon(&self, set: IconSet) -> Option<Icon> {
        let icon = match self.kind() {
            StateKind::Off => Icon::No,
            StateKind::Uncertain => Icon::Maybe,
            StateKind::FirstHalfOff => Icon::FirstHalf,
            StateKind::SecondHalfOff => Icon::SecondHalf,
            StateKind::On | StateKind::Unknown => return None,
        };
        Some(match (set, icon) {
            (IconSet::Today, Icon::FirstHalf) => Icon::TodayFirstHalf,
            (IconSet::Today, Icon::SecondHalf) => Icon::TodaySecondHalf,
            (_, i) => i,
        })
    }
}

impl From<String> for StateCode {
    fn from(s: String) -> Self {
        match StateCode::parse(&s) {
            StateCode::Other(_) => StateCode::Other(s),
            known => known,
        }
    }
}

impl From<&str> for StateCode {
    fn from(s: &str) -> Self {
        StateCode::parse(s)
    }
}

impl From<StateCode> for String {
    fn from(s: StateCode) -> Self {
        match s {
            StateCode::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which table a cell belongs to; the Today/Tomorrow table uses its own pair
/// of half-hour icons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IconSet {
    Week,
    Today,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Icon {
    No,
    Maybe,
    FirstHalf,
    SecondHalf,
    TodayFirstHalf,
    TodaySecondHalf,
}

impl Icon {
    /// Asset path relative to the rendered page.
    pub fn path(self) -> &'static str {
        match self {
            Icon::No => "icons/no.svg",
            Icon::Maybe => "icons/maybe.svg",
            Icon::FirstHalf => "icons/mfirst.svg",
            Icon::SecondHalf => "icons/msecond.svg",
            Icon::TodayFirstHalf => "icons/nfirst.svg",
            Icon::TodaySecondHalf => "icons/nsecond.svg",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_echo() {
        for raw in ["yes", "no", "maybe", "first", "mfirst", "second", "msecond", "weird", ""] {
            assert_eq!(StateCode::parse(raw).as_str(), raw);
        }
        assert!(StateCode::parse("").is_blank());
        assert!(!StateCode::parse("no").is_blank());
        assert_eq!(StateCode::parse("msecond").css_class(), "state-msecond");
    }

    #[test]
    fn kinds() {
        assert_eq!(StateCode::parse("mfirst").kind(), StateKind::FirstHalfOff);
        assert_eq!(StateCode::parse("second").kind(), StateKind::SecondHalfOff);
        assert_eq!(StateCode::parse("YES").kind(), StateKind::Unknown);
    }

    #[test]
    fn icon_sets() {
        let first = StateCode::First;
        assert_eq!(first.icon(IconSet::Week), Some(Icon::FirstHalf));
        assert_eq!(first.icon(IconSet::Today), Some(Icon::TodayFirstHalf));
        assert_eq!(StateCode::MSecond.icon(IconSet::Today).map(Icon::path), Some("icons/nsecond.svg"));
        assert_eq!(StateCode::No.icon(IconSet::Today), Some(Icon::No));
        assert_eq!(StateCode::Yes.icon(IconSet::Week), None);
        assert_eq!(StateCode::parse("x").icon(IconSet::Week), None);
    }
}
