//! crates/gpv_core/src/entities.rs
//! Input documents: weekly `Preset`, per-day `Fact`, and the region file that
//! bundles them. Field names mirror the upstream JSON and must stay stable.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ids::GroupKey;
use crate::state::StateCode;

/// Column index of the time grid (`preset.time_zone` key).
pub type SlotIndex = u32;
/// Day of week, 1 = Monday … 7 = Sunday (`preset.days` key).
pub type DayIndex = u32;
/// Unix seconds truncated to a calendar day (`fact.data` key, `fact.today`).
pub type DayEpoch = i64;

/// One day for one group: slot → state.
pub type DaySchedule = BTreeMap<SlotIndex, StateCode>;
/// Weekly template for one group: day → slot → state.
pub type WeekSchedule = BTreeMap<DayIndex, DaySchedule>;

/// Map keyed by group, preserving the order in which keys appear in the document.
///
/// Key selection picks the *first* canonical key, so document order matters and a
/// sorted map would change behavior. Duplicate keys keep their first position and
/// the last value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupMap<V>(Vec<(String, V)>);

impl<V> Default for GroupMap<V> {
    fn default() -> Self {
        GroupMap(Vec::new())
    }
}

impl<V> GroupMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: String, value: V) {
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<V> FromIterator<(String, V)> for GroupMap<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        let mut m = GroupMap::new();
        for (k, v) in iter {
            m.insert(k, v);
        }
        m
    }
}

#[cfg(feature = "serde")]
mod group_map_serde {
    use super::GroupMap;
    use alloc::string::String;
    use core::fmt;
    use core::marker::PhantomData;
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl<V: Serialize> Serialize for GroupMap<V> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.0.len()))?;
            for (k, v) in &self.0 {
                map.serialize_entry(k, v)?;
            }
            map.end()
        }
    }

    struct GroupMapVisitor<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de>> Visitor<'de> for GroupMapVisitor<V> {
        type Value = GroupMap<V>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an object keyed by group")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut out = GroupMap::new();
            while let Some((k, v)) = access.next_entry::<String, V>()? {
                out.insert(k, v);
            }
            Ok(out)
        }
    }

    impl<'de, V: Deserialize<'de>> Deserialize<'de> for GroupMap<V> {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_map(GroupMapVisitor(PhantomData))
        }
    }
}

/// `fact.today` is a number in current documents; older producers wrote a string.
#[cfg(feature = "serde")]
mod lenient_epoch {
    use super::DayEpoch;
    use alloc::string::String;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DayEpoch>, D::Error> {
        let raw: Option<Raw> = Option::deserialize(d)?;
        Ok(match raw {
            None => None,
            Some(Raw::Int(n)) => Some(n),
            Some(Raw::Float(f)) if f.is_finite() => Some(f as i64),
            Some(Raw::Float(_)) => None,
            Some(Raw::Text(s)) => s.trim().parse().ok(),
        })
    }

    pub fn serialize<S: Serializer>(v: &Option<DayEpoch>, s: S) -> Result<S::Ok, S::Error> {
        match v {
            Some(n) => s.serialize_i64(*n),
            None => s.serialize_none(),
        }
    }
}

/// Weekly recurring template for one region.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Preset {
    /// Slot → label tuple; only the first element is used.
    #[cfg_attr(feature = "serde", serde(default))]
    pub time_zone: BTreeMap<SlotIndex, Vec<String>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub days: BTreeMap<DayIndex, String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub data: GroupMap<WeekSchedule>,
    /// State code → human description (tooltips).
    #[cfg_attr(feature = "serde", serde(default))]
    pub time_type: BTreeMap<String, String>,
    /// Group key → display label.
    #[cfg_attr(feature = "serde", serde(default))]
    pub sch_names: BTreeMap<String, String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub update: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, rename = "updateFact", skip_serializing_if = "Option::is_none")
    )]
    pub update_fact: Option<String>,
}

impl Preset {
    pub fn week_for(&self, key: &GroupKey) -> Option<&WeekSchedule> {
        self.data.get(key.as_str())
    }

    /// Tooltip description of a state, falling back to the raw code.
    pub fn describe<'a>(&'a self, state: &'a StateCode) -> &'a str {
        self.time_type
            .get(state.as_str())
            .map(String::as_str)
            .unwrap_or_else(|| state.as_str())
    }

    /// Preset-side "last updated" text: `updateFact`, then `update`.
    pub fn update_text(&self) -> &str {
        first_non_blank(&[self.update_fact.as_deref(), self.update.as_deref()])
    }
}

/// Authoritative per-day schedule for one region.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fact {
    #[cfg_attr(feature = "serde", serde(default, with = "lenient_epoch"))]
    pub today: Option<DayEpoch>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub data: BTreeMap<DayEpoch, GroupMap<DaySchedule>>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub update: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, rename = "updateFact", skip_serializing_if = "Option::is_none")
    )]
    pub update_fact: Option<String>,
}

impl Fact {
    pub fn day_for(&self, day: DayEpoch, key: &GroupKey) -> Option<&DaySchedule> {
        self.data.get(&day).and_then(|groups| groups.get(key.as_str()))
    }

    /// Fact-side text used for the "last updated" label (`update` only).
    pub fn update_label_text(&self) -> &str {
        first_non_blank(&[self.update.as_deref()])
    }

    /// Fact-side text used for column highlighting: `update`, then `updateFact`.
    pub fn update_marker_text(&self) -> &str {
        first_non_blank(&[self.update.as_deref(), self.update_fact.as_deref()])
    }
}

/// Optional producer metadata.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DocumentMeta {
    #[cfg_attr(
        feature = "serde",
        serde(default, rename = "contentHash", skip_serializing_if = "Option::is_none")
    )]
    pub content_hash: Option<String>,
}

/// One region file: `data/<region>.json`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScheduleDocument {
    #[cfg_attr(
        feature = "serde",
        serde(default, rename = "regionId", skip_serializing_if = "Option::is_none")
    )]
    pub region_id: Option<String>,
    pub preset: Preset,
    pub fact: Fact,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub meta: Option<DocumentMeta>,
}

impl ScheduleDocument {
    pub fn content_hash(&self) -> Option<&str> {
        self.meta
            .as_ref()
            .and_then(|m| m.content_hash.as_deref())
            .filter(|h| !h.trim().is_empty())
    }
}

fn first_non_blank<'a>(candidates: &[Option<&'a str>]) -> &'a str {
    candidates
        .iter()
        .copied()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or("")
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "regionId": "kyiv-region",
        "preset": {
            "time_zone": { "2": ["01-02"], "1": ["00-01"] },
            "days": { "1": "Понеділок" },
            "data": {
                "GPV2.1": { "1": { "1": "no", "2": "yes" } },
                "GPV1.1": { "1": { "1": "yes", "2": "mfirst" } }
            },
            "time_type": { "no": "Світла немає" },
            "sch_names": { "GPV1.1": "Черга 1.1" },
            "updateFact": "  "
        },
        "fact": {
            "today": "1761858000",
            "data": { "1761858000": { "GPV1.1": { "1": "maybe" } } },
            "update": "30.10.2025 21:51"
        }
    }"#;

    #[test]
    fn parses_region_document() {
        let doc: ScheduleDocument = serde_json::from_str(DOC).unwrap();
        assert_eq!(doc.region_id.as_deref(), Some("kyiv-region"));
        let keys: Vec<&str> = doc.preset.data.keys().collect();
        assert_eq!(keys, ["GPV2.1", "GPV1.1"], "document order preserved");
        assert_eq!(doc.preset.time_zone[&1][0], "00-01");
        assert_eq!(doc.fact.today, Some(1_761_858_000));
        let key: GroupKey = "GPV1.1".parse().unwrap();
        assert_eq!(
            doc.fact.day_for(1_761_858_000, &key).and_then(|d| d.get(&1)),
            Some(&StateCode::Maybe)
        );
        assert_eq!(doc.preset.update_text(), "");
        assert_eq!(doc.fact.update_marker_text(), "30.10.2025 21:51");
        assert_eq!(doc.content_hash(), None);
    }

    #[test]
    fn describe_falls_back_to_code() {
        let doc: ScheduleDocument = serde_json::from_str(DOC).unwrap();
        assert_eq!(doc.preset.describe(&StateCode::No), "Світла немає");
        assert_eq!(doc.preset.describe(&StateCode::Maybe), "maybe");
    }

    #[test]
    fn group_map_keeps_first_position_on_duplicates() {
        let m: GroupMap<u32> = serde_json::from_str(r#"{"b":1,"a":2,"b":3}"#).unwrap();
        let pairs: Vec<(&str, &u32)> = m.iter().collect();
        assert_eq!(pairs, [("b", &3), ("a", &2)]);
    }
}
