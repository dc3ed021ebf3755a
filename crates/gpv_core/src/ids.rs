//! crates/gpv_core/src/ids.rs
//! Group identifiers. Upstream documents key schedules by free-form strings; the
//! canonical shape is `GPV<major>.<minor>` (e.g. `GPV1.2`).

use alloc::borrow::ToOwned;
use alloc::string::String;
use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Literal last-resort group when a document names no usable key.
pub const DEFAULT_GROUP_KEY: &str = "GPV1.2";

const MAX_KEY_LEN: usize = 64;

/// Parse `GPV<digits>.<digits>` into `(major, minor)`.
///
/// With `ignore_case` the `GPV` prefix may be in any case (file naming accepts
/// `gpv1.2`; key selection does not).
pub fn parse_canonical_numbers(s: &str, ignore_case: bool) -> Option<(u32, u32)> {
    let prefix = s.get(..3)?;
    let prefix_ok = if ignore_case {
        prefix.eq_ignore_ascii_case("GPV")
    } else {
        prefix == "GPV"
    };
    if !prefix_ok {
        return None;
    }
    let (major, minor) = s[3..].split_once('.')?;
    let digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
    if !digits(major) || !digits(minor) {
        return None;
    }
    Some((major.parse().ok()?, minor.parse().ok()?))
}

/// A schedule group key as it appears in `preset.data` / `fact.data`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct GroupKey(String);

impl GroupKey {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `(major, minor)` when the key has the canonical `GPV<major>.<minor>` shape.
    #[inline]
    pub fn numbers(&self) -> Option<(u32, u32)> {
        parse_canonical_numbers(&self.0, false)
    }

    /// The literal fallback key.
    pub fn fallback() -> Self {
        GroupKey(DEFAULT_GROUP_KEY.to_owned())
    }
}

impl fmt::Display for GroupKey {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for GroupKey {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.is_empty() || t.len() > MAX_KEY_LEN || t.chars().any(char::is_control) {
            return Err(CoreError::InvalidGroupKey);
        }
        Ok(GroupKey(t.to_owned()))
    }
}

impl TryFrom<&str> for GroupKey {
    type Error = CoreError;
    #[inline]
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl AsRef<str> for GroupKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_numbers() {
        let k: GroupKey = "GPV1.2".parse().unwrap();
        assert_eq!(k.numbers(), Some((1, 2)));
        let k: GroupKey = "GPV12.10".parse().unwrap();
        assert_eq!(k.numbers(), Some((12, 10)));
        for bad in ["GPV1", "GPV.2", "GPV1.", "gpv1.2", "GPV1.2a", "XPV1.2", "GPV1.2.3"] {
            let k: GroupKey = bad.parse().unwrap();
            assert!(k.numbers().is_none(), "{bad}");
        }
        assert_eq!(parse_canonical_numbers("gpv3.1", true), Some((3, 1)));
    }

    #[test]
    fn rejects_blank_keys() {
        assert!("".parse::<GroupKey>().is_err());
        assert!("   ".parse::<GroupKey>().is_err());
        assert_eq!(" GPV2.1 ".parse::<GroupKey>().unwrap().as_str(), "GPV2.1");
    }

    #[test]
    fn fallback_is_canonical() {
        assert_eq!(GroupKey::fallback().numbers(), Some((1, 2)));
    }
}
