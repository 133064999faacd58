//! Error types for `huangli-lunisolar`.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  /// The lunar year has no entry in the packed calendar tables.
  #[error("lunar year {year} is outside the supported range 1900..=2100")]
  UnsupportedYear { year: i32 },

  /// The solar date precedes the table epoch (1900-01-31) or falls past
  /// the end of the last covered lunar year.
  #[error("solar date {0} is outside the supported lunisolar range")]
  OutOfRange(NaiveDate),

  /// The month/day combination does not exist in that lunar year, e.g.
  /// day 30 of a 29-day month or a leap month the year does not have.
  #[error("lunar date {year}-{month:02}-{day:02} (leap month: {leap}) does not exist")]
  InvalidLunarDate {
    year:  i32,
    month: u32,
    day:   u32,
    leap:  bool,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
