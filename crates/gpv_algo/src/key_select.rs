//! Active group key selection.
//!
//! Priority: requested key (if present in `preset.data`) → cached key (same
//! condition) → first canonical `GPV<major>.<minor>` key in document order →
//! the literal `GPV1.2`. Never fails.

use gpv_core::ids::parse_canonical_numbers;
use gpv_core::{GroupKey, Preset};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeySource {
    Requested,
    Cached,
    FirstCanonical,
    Fallback,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyChoice {
    pub key: GroupKey,
    pub source: KeySource,
}

pub fn select_key(
    preset: &Preset,
    requested: Option<&GroupKey>,
    cached: Option<&GroupKey>,
) -> KeyChoice {
    let present = |k: &&GroupKey| preset.data.contains_key(k.as_str());

    if let Some(k) = requested.filter(present) {
        return KeyChoice { key: k.clone(), source: KeySource::Requested };
    }
    if let Some(k) = requested {
        tracing::debug!(key = %k, "requested key not in preset; falling back");
    }
    if let Some(k) = cached.filter(present) {
        return KeyChoice { key: k.clone(), source: KeySource::Cached };
    }
    let first = preset
        .data
        .keys()
        .find(|k| parse_canonical_numbers(k, false).is_some())
        .and_then(|k| k.parse::<GroupKey>().ok());
    match first {
        Some(key) => KeyChoice { key, source: KeySource::FirstCanonical },
        None => {
            tracing::debug!("no canonical key in preset; using fallback {}", GroupKey::fallback());
            KeyChoice { key: GroupKey::fallback(), source: KeySource::Fallback }
        }
    }
}

/// Keys rendered in batch mode: canonical keys (prefix in any case), sorted by
/// `(major, minor)` then by text.
pub fn batch_keys(preset: &Preset) -> Vec<GroupKey> {
    let mut keyed: Vec<((u32, u32), GroupKey)> = preset
        .data
        .keys()
        .filter_map(|k| {
            let nums = parse_canonical_numbers(k, true)?;
            Some((nums, k.parse::<GroupKey>().ok()?))
        })
        .collect();
    keyed.sort();
    keyed.into_iter().map(|(_, k)| k).collect()
}
