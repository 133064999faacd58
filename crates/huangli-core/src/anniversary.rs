//! Recurring anniversary records and their derived facts.
//!
//! A record fixes a name, a kind, and an origin date in either calendar
//! system; everything else (next occurrence, age, countdowns, wording)
//! is recomputed from it and the reference day on every refresh. Origins
//! recur on their month/day: a solar Feb 29 lands on the 28th in common
//! years, a lunar day 30 lands on day 29 in short months, and a lunar
//! leap-month origin falls back to the common month in years without
//! that leap month.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use huangli_lunisolar::{tables, LunarDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// What the anniversary commemorates; fixes the display wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnniversaryKind {
  Birthday,
  Memorial,
}

impl AnniversaryKind {
  /// Chinese label, as entered in configuration.
  pub fn label(self) -> &'static str {
    match self {
      Self::Birthday => "生日",
      Self::Memorial => "纪念日",
    }
  }
}

/// The original date, in whichever calendar system it was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "system", content = "date", rename_all = "snake_case")]
pub enum OriginDate {
  Solar(NaiveDate),
  Lunar(LunarDate),
}

impl OriginDate {
  /// The solar date the origin fell on. Ages count from this date's
  /// year in both systems.
  pub fn to_solar(self) -> NaiveDate {
    match self {
      Self::Solar(date) => date,
      Self::Lunar(date) => date.to_solar(),
    }
  }
}

impl fmt::Display for OriginDate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Solar(date) => write!(f, "{date}"),
      Self::Lunar(date) => write!(f, "{date}"),
    }
  }
}

/// A recurring anniversary, as configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnniversaryRecord {
  pub name:   String,
  pub kind:   AnniversaryKind,
  pub origin: OriginDate,
}

impl AnniversaryRecord {
  /// Stable key for this record, distinguishing same-named records of a
  /// different kind or origin. The digits mirror the configured entry:
  /// lunar origins keep their lunar year/month/day.
  pub fn key(&self) -> String {
    let digits = match self.origin {
      OriginDate::Solar(d) => {
        format!("{:04}{:02}{:02}", d.year(), d.month(), d.day())
      }
      OriginDate::Lunar(d) => {
        format!("{:04}{:02}{:02}", d.year(), d.month(), d.day())
      }
    };
    format!("{}{}{}", self.name, self.kind.label(), digits)
  }
}

/// Facts derived from a record for one reference day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnniversaryFact {
  /// Next date the anniversary recurs, never before the reference day.
  pub next_occurrence:   NaiveDate,
  /// Years from the origin's solar year to the next occurrence's.
  pub age:               i32,
  pub days_until:        i64,
  pub days_since_origin: i64,
  /// Display wording, e.g. "结婚10周年纪念日" or "小明8岁生日".
  pub hint:              String,
}

/// Compute the derived facts for `record` as of `today`.
pub fn evaluate(record: &AnniversaryRecord, today: NaiveDate) -> Result<AnniversaryFact> {
  let next = next_occurrence(record, today)?;
  let origin = record.origin.to_solar();
  let age = next.year() - origin.year();
  let hint = match record.kind {
    AnniversaryKind::Birthday => format!("{}{}岁生日", record.name, age),
    AnniversaryKind::Memorial => format!("{}{}周年纪念日", record.name, age),
  };
  Ok(AnniversaryFact {
    next_occurrence:   next,
    age,
    days_until:        next.signed_duration_since(today).num_days(),
    days_since_origin: today.signed_duration_since(origin).num_days(),
    hint,
  })
}

/// The next date `record` recurs, at or after `today`.
pub fn next_occurrence(record: &AnniversaryRecord, today: NaiveDate) -> Result<NaiveDate> {
  match record.origin {
    OriginDate::Solar(origin) => next_solar_occurrence(origin, today),
    OriginDate::Lunar(origin) => next_lunar_occurrence(origin, today),
  }
}

fn next_solar_occurrence(origin: NaiveDate, today: NaiveDate) -> Result<NaiveDate> {
  for year in [today.year(), today.year() + 1] {
    if let Some(date) = restamp_solar(year, origin)
      && date >= today
    {
      return Ok(date);
    }
  }
  Err(Error::InvalidAnniversaryDate { origin: OriginDate::Solar(origin), today })
}

/// A lunar origin in the twelfth month recurs inside the *next* solar
/// year, so the lunar year before today's is a real candidate alongside
/// this year and the next. Candidate years ascend, and the same lunar
/// month/day falls later in each, so the first hit is the earliest.
fn next_lunar_occurrence(origin: LunarDate, today: NaiveDate) -> Result<NaiveDate> {
  for year in [today.year() - 1, today.year(), today.year() + 1] {
    if let Some(date) = resolve_lunar_in_year(origin, year)
      && date >= today
    {
      return Ok(date);
    }
  }
  Err(Error::InvalidAnniversaryDate { origin: OriginDate::Lunar(origin), today })
}

/// Re-stamp a month/day onto `year`, clamping a day the month lacks.
fn restamp_solar(year: i32, origin: NaiveDate) -> Option<NaiveDate> {
  NaiveDate::from_ymd_opt(year, origin.month(), origin.day()).or_else(|| {
    // Feb 29 origins land on the 28th in common years.
    NaiveDate::from_ymd_opt(year, origin.month(), origin.day() - 1)
  })
}

/// Place the origin's month/day into lunar `year`, adapting to its
/// shape. `None` when the year is outside the supported tables.
fn resolve_lunar_in_year(origin: LunarDate, year: i32) -> Option<NaiveDate> {
  let leap = origin.is_leap_month()
    && tables::leap_month(year).ok()? == Some(origin.month());
  let last = tables::month_length(year, origin.month(), leap).ok()?;
  let day = origin.day().min(last);
  LunarDate::new(year, origin.month(), leap, day)
    .ok()
    .map(LunarDate::to_solar)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
  }

  fn solar_record(name: &str, kind: AnniversaryKind, origin: NaiveDate) -> AnniversaryRecord {
    AnniversaryRecord { name: name.into(), kind, origin: OriginDate::Solar(origin) }
  }

  fn lunar_record(name: &str, kind: AnniversaryKind, origin: LunarDate) -> AnniversaryRecord {
    AnniversaryRecord { name: name.into(), kind, origin: OriginDate::Lunar(origin) }
  }

  #[test]
  fn solar_birthday_before_and_after_its_date() {
    let record = solar_record("小明", AnniversaryKind::Birthday, ymd(1990, 3, 15));

    let fact = evaluate(&record, ymd(2024, 1, 1)).unwrap();
    assert_eq!(fact.next_occurrence, ymd(2024, 3, 15));
    assert_eq!(fact.age, 34);
    assert_eq!(fact.days_until, 74);
    assert_eq!(fact.hint, "小明34岁生日");

    let fact = evaluate(&record, ymd(2024, 6, 1)).unwrap();
    assert_eq!(fact.next_occurrence, ymd(2025, 3, 15));
    assert_eq!(fact.age, 35);
  }

  #[test]
  fn the_day_itself_counts_as_the_occurrence() {
    let record = solar_record("小明", AnniversaryKind::Birthday, ymd(1990, 3, 15));
    let fact = evaluate(&record, ymd(2024, 3, 15)).unwrap();
    assert_eq!(fact.next_occurrence, ymd(2024, 3, 15));
    assert_eq!(fact.days_until, 0);
  }

  #[test]
  fn leap_day_origin_clamps_in_common_years() {
    let record = solar_record("闰闰", AnniversaryKind::Birthday, ymd(2000, 2, 29));

    let fact = evaluate(&record, ymd(2023, 2, 1)).unwrap();
    assert_eq!(fact.next_occurrence, ymd(2023, 2, 28));
    assert_eq!(fact.age, 23);

    // After the clamped date, the leap year supplies the true day.
    let fact = evaluate(&record, ymd(2023, 3, 1)).unwrap();
    assert_eq!(fact.next_occurrence, ymd(2024, 2, 29));
    assert_eq!(fact.age, 24);
  }

  #[test]
  fn twelfth_month_origin_resolves_through_the_previous_lunar_year() {
    // Lunar 1987-12-20 fell on solar 1988-02-07.
    let origin = LunarDate::new(1987, 12, false, 20).unwrap();
    let record = lunar_record("爷爷", AnniversaryKind::Birthday, origin);

    // In early January 2024 the upcoming occurrence is lunar 2023-12-20,
    // which is solar 2024-01-30: the candidate from lunar year 2023.
    let fact = evaluate(&record, ymd(2024, 1, 5)).unwrap();
    assert_eq!(fact.next_occurrence, ymd(2024, 1, 30));
    assert_eq!(fact.age, 36);
    assert_eq!(fact.hint, "爷爷36岁生日");

    // Once that passes, the next one sits a lunar year later.
    let fact = evaluate(&record, ymd(2024, 2, 1)).unwrap();
    assert_eq!(fact.next_occurrence, ymd(2025, 1, 19));
    assert_eq!(fact.age, 37);
  }

  #[test]
  fn lunar_day_30_clamps_in_short_months() {
    // Lunar 2023-12-30 existed (it was the Eve); lunar 2024's twelfth
    // month has only 29 days.
    let origin = LunarDate::new(2023, 12, false, 30).unwrap();
    let record = lunar_record("守岁", AnniversaryKind::Memorial, origin);
    let fact = evaluate(&record, ymd(2025, 1, 1)).unwrap();
    assert_eq!(fact.next_occurrence, ymd(2025, 1, 28));
    assert_eq!(fact.age, 1);
    assert_eq!(fact.hint, "守岁1周年纪念日");
  }

  #[test]
  fn leap_month_origin_uses_the_common_month_when_absent() {
    // 1990 had a leap fifth month; 2024 does not.
    let origin = LunarDate::new(1990, 5, true, 10).unwrap();
    let record = lunar_record("结婚", AnniversaryKind::Memorial, origin);
    let fact = evaluate(&record, ymd(2024, 1, 1)).unwrap();
    assert_eq!(fact.next_occurrence, ymd(2024, 6, 15));
    assert_eq!(fact.age, 34);
  }

  #[test]
  fn leap_month_origin_honors_a_matching_leap_month() {
    // 2001 and 2020 both carry a leap fourth month.
    let origin = LunarDate::new(2001, 4, true, 15).unwrap();
    let record = lunar_record("结婚", AnniversaryKind::Memorial, origin);
    let fact = evaluate(&record, ymd(2020, 6, 1)).unwrap();
    assert_eq!(fact.next_occurrence, ymd(2020, 6, 6));
    assert_eq!(fact.age, 19);
  }

  #[test]
  fn exhausted_candidates_error_at_the_table_edge() {
    let origin = LunarDate::new(1900, 1, false, 1).unwrap();
    let record = lunar_record("边界", AnniversaryKind::Memorial, origin);
    let err = evaluate(&record, ymd(2100, 12, 31)).unwrap_err();
    assert!(matches!(err, Error::InvalidAnniversaryDate { .. }));
  }

  #[test]
  fn record_keys_distinguish_kind_and_origin() {
    let solar = solar_record("小明", AnniversaryKind::Birthday, ymd(1990, 3, 15));
    assert_eq!(solar.key(), "小明生日19900315");

    let origin = LunarDate::new(1987, 12, false, 20).unwrap();
    let lunar = lunar_record("小明", AnniversaryKind::Memorial, origin);
    assert_eq!(lunar.key(), "小明纪念日19871220");
  }

  #[test]
  fn days_since_origin_counts_from_the_solar_equivalent() {
    let origin = LunarDate::new(1987, 12, false, 20).unwrap();
    assert_eq!(origin.to_solar(), ymd(1988, 2, 7));
    let record = lunar_record("爷爷", AnniversaryKind::Birthday, origin);
    let fact = evaluate(&record, ymd(2024, 1, 5)).unwrap();
    assert_eq!(fact.days_since_origin, ymd(2024, 1, 5).signed_duration_since(ymd(1988, 2, 7)).num_days());
    assert_eq!(fact.days_until, 25);
  }
}
