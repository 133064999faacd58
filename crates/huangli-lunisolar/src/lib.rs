//! Lunisolar calendar codec for Huangli.
//!
//! Converts between solar (Gregorian) dates and Chinese lunar dates,
//! locates solar-term boundaries, and renders traditional display names.
//! Pure and synchronous; no I/O or platform dependencies.
//!
//! # Quick start
//!
//! ```
//! use chrono::NaiveDate;
//! use huangli_lunisolar::LunarDate;
//!
//! // 2024-02-10 was Chinese New Year.
//! let solar = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
//! let lunar = LunarDate::from_solar(solar).unwrap();
//! assert_eq!((lunar.year(), lunar.month(), lunar.day()), (2024, 1, 1));
//! assert_eq!(lunar.to_solar(), solar);
//! ```

mod astro;
pub mod error;
pub mod fmt;
pub mod solar_term;
pub mod tables;

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use tables::{MAX_YEAR, MIN_YEAR};

pub use crate::{
  error::{Error, Result},
  solar_term::{SolarTerm, term_before, term_of_day, term_on_or_after},
};

/// Solar date of lunar 1900-01-01, the first day the tables cover.
const EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(1900, 1, 31) {
  Some(d) => d,
  None => unreachable!(),
};

/// A validated Chinese lunar calendar date.
///
/// Construction checks the month/day combination against the year tables,
/// so every value of this type names a real day and converts to a solar
/// date infallibly. Lunar dates are not ordered by field comparison across
/// years; convert to solar to compare chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LunarDate {
  year:  i32,
  month: u32,
  leap:  bool,
  day:   u32,
}

impl LunarDate {
  /// Build a lunar date, rejecting combinations that do not exist in
  /// `year` (a leap month the year lacks, or a day past the month's end).
  pub fn new(year: i32, month: u32, leap: bool, day: u32) -> Result<Self> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
      return Err(Error::UnsupportedYear { year });
    }
    let invalid = Error::InvalidLunarDate {
      year,
      month,
      day,
      leap,
    };
    if !(1..=12).contains(&month) || day == 0 {
      return Err(invalid);
    }
    if leap && tables::leap_month_raw(year) != Some(month) {
      return Err(invalid);
    }
    if day > tables::month_length_raw(year, month, leap) {
      return Err(invalid);
    }
    Ok(Self {
      year,
      month,
      leap,
      day,
    })
  }

  /// Convert a solar date to its lunar equivalent.
  ///
  /// Dates in the lunar twelfth month that precede the solar New Year
  /// belong to the previous lunar year; the year walk from the epoch
  /// attributes them correctly.
  pub fn from_solar(date: NaiveDate) -> Result<Self> {
    let mut offset = date.signed_duration_since(EPOCH).num_days();
    if offset < 0 {
      return Err(Error::OutOfRange(date));
    }

    let mut year = MIN_YEAR;
    loop {
      if year > MAX_YEAR {
        return Err(Error::OutOfRange(date));
      }
      let len = i64::from(tables::year_length_raw(year));
      if offset < len {
        break;
      }
      offset -= len;
      year += 1;
    }

    let leap_month = tables::leap_month_raw(year);
    let mut month = 1;
    let mut leap = false;
    loop {
      let len = i64::from(tables::month_length_raw(year, month, leap));
      if offset < len {
        break;
      }
      offset -= len;
      // The leap month follows its common twin.
      if !leap && leap_month == Some(month) {
        leap = true;
      } else {
        leap = false;
        month += 1;
      }
    }

    Ok(Self {
      year,
      month,
      leap,
      day: offset as u32 + 1,
    })
  }

  /// The solar date of this lunar day. Infallible: the fields were
  /// validated at construction.
  pub fn to_solar(self) -> NaiveDate {
    let mut days = i64::from(self.day) - 1;
    for y in MIN_YEAR..self.year {
      days += i64::from(tables::year_length_raw(y));
    }
    let leap_month = tables::leap_month_raw(self.year);
    for m in 1..self.month {
      days += i64::from(tables::month_length_raw(self.year, m, false));
      if leap_month == Some(m) {
        days += i64::from(tables::month_length_raw(self.year, m, true));
      }
    }
    if self.leap {
      days += i64::from(tables::month_length_raw(self.year, self.month, false));
    }
    EPOCH + Duration::days(days)
  }

  pub fn year(self) -> i32 {
    self.year
  }

  pub fn month(self) -> u32 {
    self.month
  }

  pub fn is_leap_month(self) -> bool {
    self.leap
  }

  pub fn day(self) -> u32 {
    self.day
  }
}
