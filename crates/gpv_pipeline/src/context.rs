//! Render context: everything the host decides, passed explicitly into a render pass.

use core::convert::Infallible;
use core::fmt;
use core::str::FromStr;

use chrono_tz::Tz;
use gpv_algo::DaySelector;
use gpv_core::{CoreError, DayEpoch, GroupKey};
use serde::Serialize;

/// Presentation mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Today/Tomorrow table + week matrix + "last updated" line.
    Full,
    /// Today/Tomorrow table only.
    Emergency,
    /// Week matrix only.
    Week,
    /// Day status, outage windows and compact group number.
    Summary,
    /// Whatever the host's `ViewTargets` call for.
    #[default]
    Auto,
}

impl Mode {
    pub const ALL: [Mode; 5] = [Mode::Full, Mode::Emergency, Mode::Week, Mode::Summary, Mode::Auto];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Full => "full",
            Mode::Emergency => "emergency",
            Mode::Week => "week",
            Mode::Summary => "summary",
            Mode::Auto => "auto",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Mode::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or(CoreError::InvalidMode)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Page class for the theme, if any.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            Theme::Dark => Some("theme-dark"),
            Theme::Light => None,
        }
    }
}

/// Only `dark` selects the dark theme; anything else is light.
impl FromStr for Theme {
    type Err = Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s.trim() == "dark" { Theme::Dark } else { Theme::Light })
    }
}

/// Phrasebook language.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Uk,
    En,
}

impl Lang {
    pub fn as_str(self) -> &'static str {
        match self {
            Lang::Uk => "uk",
            Lang::En => "en",
        }
    }
}

impl FromStr for Lang {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        let primary = tag.split(['-', '_']).next().unwrap_or("");
        match primary {
            "uk" | "ua" => Ok(Lang::Uk),
            "en" => Ok(Lang::En),
            _ => Err(CoreError::DomainOutOfRange("lang")),
        }
    }
}

/// Output targets present in the host view; consulted by `Mode::Auto` only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ViewTargets {
    pub today: bool,
    pub matrix: bool,
    pub summary_card: bool,
}

impl ViewTargets {
    pub const FULL_PAGE: ViewTargets = ViewTargets { today: true, matrix: true, summary_card: false };
    pub const NONE: ViewTargets = ViewTargets { today: false, matrix: false, summary_card: false };
}

/// The full-schedule page (today table + week matrix) is the default host.
impl Default for ViewTargets {
    fn default() -> Self {
        ViewTargets::FULL_PAGE
    }
}

/// Immutable per-pass context.
#[derive(Clone, Debug)]
pub struct RenderContext {
    pub requested_key: Option<GroupKey>,
    /// Key the host remembered from an earlier pass.
    pub cached_key: Option<GroupKey>,
    pub requested_theme: Theme,
    pub requested_day: DaySelector,
    pub lang: Lang,
    pub time_zone: Tz,
    /// "Now" for the current-year rule of update stamps.
    pub now_epoch: DayEpoch,
    pub targets: ViewTargets,
}

impl Default for RenderContext {
    fn default() -> Self {
        RenderContext {
            requested_key: None,
            cached_key: None,
            requested_theme: Theme::Light,
            requested_day: DaySelector::Today,
            lang: Lang::Uk,
            time_zone: chrono_tz::Europe::Kyiv,
            now_epoch: chrono::Utc::now().timestamp(),
            targets: ViewTargets::default(),
        }
    }
}

impl RenderContext {
    pub fn with_key(mut self, key: GroupKey) -> Self {
        self.requested_key = Some(key);
        self
    }

    pub fn with_day(mut self, day: DaySelector) -> Self {
        self.requested_day = day;
        self
    }

    pub fn with_now(mut self, now_epoch: DayEpoch) -> Self {
        self.now_epoch = now_epoch;
        self
    }

    pub fn with_lang(mut self, lang: Lang) -> Self {
        self.lang = lang;
        self
    }

    pub fn with_targets(mut self, targets: ViewTargets) -> Self {
        self.targets = targets;
        self
    }
}
