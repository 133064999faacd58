//! Error types for `huangli-core`.

use chrono::NaiveDate;
use thiserror::Error;

use crate::anniversary::OriginDate;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  /// No candidate year places the anniversary's origin at or after the
  /// reference day.
  #[error("no candidate year around {today} resolves anniversary origin {origin}")]
  InvalidAnniversaryDate { origin: OriginDate, today: NaiveDate },

  /// The holiday table covers a different year than the queried date.
  #[error("holiday table for {table_year} cannot classify {date}")]
  WrongYearTable { table_year: i32, date: NaiveDate },

  /// The external holiday source has nothing published for the year.
  #[error("no holiday data available for {year}")]
  DataUnavailable { year: i32 },

  /// A lunisolar conversion failed.
  #[error(transparent)]
  Lunisolar(#[from] huangli_lunisolar::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
