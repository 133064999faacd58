//! Calendar-derived facts for household automation.
//!
//! Classifies days against the statutory holiday schedule, indexes solar
//! and lunar festivals, tracks recurring anniversaries recorded in either
//! calendar system, and assembles the daily snapshot a host surfaces as
//! sensor state. The crate does no I/O of its own; external data arrives
//! through the traits in [`source`].
//!
//! # Quick start
//!
//! ```
//! use chrono::NaiveDate;
//! use huangli_core::{festival::FestivalIndex, snapshot::Almanac};
//!
//! let mut almanac = Almanac::new(FestivalIndex::builtin());
//! let today = NaiveDate::from_ymd_opt(2024, 2, 9).unwrap();
//! let snapshot = almanac.refresh(today, None, &[]).unwrap();
//! assert_eq!(snapshot.festivals, ["除夕"]);
//! ```

pub mod anniversary;
pub mod error;
pub mod festival;
pub mod holiday;
pub mod period;
pub mod snapshot;
pub mod source;

pub use crate::error::{Error, Result};
