//! Collaborator contracts between the engine and its host.
//!
//! The engine is synchronous and does no I/O of its own; the holiday
//! feed, the configured records, the wall clock, and the sun events all
//! arrive through these traits.

use chrono::{NaiveDate, NaiveDateTime};

use crate::{
  anniversary::AnniversaryRecord, error::Result, holiday::HolidayTable,
  period::SunTimes,
};

/// Source of the per-year statutory holiday table.
pub trait HolidaySource {
  /// The table for `year`, or `Error::DataUnavailable` while the year is
  /// unpublished. Callers fall back to weekend-only classification.
  fn year_table(&self, year: i32) -> Result<HolidayTable>;
}

/// Source of the configured anniversary records.
pub trait ConfigSource {
  /// The records, in configuration order.
  fn anniversaries(&self) -> Result<Vec<AnniversaryRecord>>;
}

/// Source of the reference instant for a refresh.
pub trait Clock {
  fn now(&self) -> NaiveDateTime;

  /// The civil date of [`Clock::now`]; the snapshot's reference day.
  fn today(&self) -> NaiveDate {
    self.now().date()
  }
}

/// Source of sun event times for the day-period classifier.
pub trait SunEvents {
  fn sun_times(&self, date: NaiveDate) -> SunTimes;
}
