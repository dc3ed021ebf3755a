//! gpv_core: Core types for rolling-blackout ("GPV") schedules.
//!
//! This crate is **I/O-free**. It defines the document types shared across the
//! workspace (`gpv_io`, `gpv_algo`, `gpv_pipeline`, `gpv_report`, `gpv_cli`).
//!
//! - Group keys: `GroupKey` (`GPV<major>.<minor>` plus free-form upstream keys)
//! - Per-slot state codes: `StateCode`, its outage `StateKind`, and cell `Icon`s
//! - Input documents: `Preset` (weekly template), `Fact` (per-day override),
//!   `ScheduleDocument` (one region file)
//!
//! Serialization derives are gated behind the `serde` feature.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod entities;
pub mod ids;
pub mod state;

pub mod errors {
    use core::fmt;

    /// Minimal error set for core-domain parsing.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub enum CoreError {
        InvalidGroupKey,
        InvalidDaySelector,
        InvalidEpoch,
        InvalidMode,
        UnknownTimeZone,
        DomainOutOfRange(&'static str),
    }

    impl fmt::Display for CoreError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                CoreError::InvalidGroupKey => write!(f, "invalid group key"),
                CoreError::InvalidDaySelector => {
                    write!(f, "invalid day selector (expected today, tomorrow or an epoch)")
                }
                CoreError::InvalidEpoch => write!(f, "invalid epoch"),
                CoreError::InvalidMode => {
                    write!(f, "invalid mode (expected full, emergency, week, summary or auto)")
                }
                CoreError::UnknownTimeZone => write!(f, "unknown IANA time zone"),
                CoreError::DomainOutOfRange(k) => write!(f, "domain out of range: {k}"),
            }
        }
    }

    #[cfg(feature = "std")]
    impl std::error::Error for CoreError {}
}

pub use entities::{
    DayEpoch, DayIndex, DaySchedule, DocumentMeta, Fact, GroupMap, Preset, ScheduleDocument,
    SlotIndex, WeekSchedule,
};
pub use errors::CoreError;
pub use ids::{GroupKey, DEFAULT_GROUP_KEY};
pub use state::{Icon, IconSet, StateCode, StateKind};

/// Minutes in one calendar day; the implicit end of the last slot.
pub const MINUTES_PER_DAY: u32 = 24 * 60;
