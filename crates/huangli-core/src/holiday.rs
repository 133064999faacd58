//! Workday and rest-day classification.
//!
//! Statutory holidays move every year, and the schedule routinely turns
//! a weekend day into a compensating workday, so the published table for
//! the year takes priority over the plain weekday. Days the table does
//! not name fall back to the ordinary week.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How one tabled day deviates from the ordinary week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRule {
  pub is_rest_day:       bool,
  pub is_makeup_workday: bool,
  /// Holiday name carried by the feed; display metadata only.
  #[serde(default)]
  pub name:              Option<String>,
}

impl DayRule {
  /// A designated day off.
  pub fn rest(name: Option<String>) -> Self {
    Self { is_rest_day: true, is_makeup_workday: false, name }
  }

  /// A weekend day pressed into service.
  pub fn makeup(name: Option<String>) -> Self {
    Self { is_rest_day: false, is_makeup_workday: true, name }
  }
}

/// The statutory holiday table for exactly one calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HolidayTable {
  year: i32,
  days: BTreeMap<NaiveDate, DayRule>,
}

impl HolidayTable {
  /// An empty table scoped to `year`.
  pub fn new(year: i32) -> Self {
    Self { year, days: BTreeMap::new() }
  }

  pub fn year(&self) -> i32 {
    self.year
  }

  /// File a rule, rejecting dates outside the table's year.
  pub fn insert(&mut self, date: NaiveDate, rule: DayRule) -> Result<()> {
    if date.year() != self.year {
      return Err(Error::WrongYearTable { table_year: self.year, date });
    }
    self.days.insert(date, rule);
    Ok(())
  }

  /// The rule for `date`, if the table names it.
  pub fn rule(&self, date: NaiveDate) -> Option<&DayRule> {
    self.days.get(&date)
  }

  pub fn len(&self) -> usize {
    self.days.len()
  }

  pub fn is_empty(&self) -> bool {
    self.days.is_empty()
  }
}

/// A day's working status, table-over-weekday priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
  /// A statutory holiday.
  Holiday,
  /// A day redesignated as working to compensate a holiday elsewhere.
  MakeUpWorkday,
  /// An ordinary Saturday or Sunday.
  Weekend,
  Workday,
}

impl DayStatus {
  /// Chinese display label.
  pub fn label(self) -> &'static str {
    match self {
      Self::Holiday => "节假日",
      Self::MakeUpWorkday => "调休日",
      Self::Weekend => "休息日",
      Self::Workday => "工作日",
    }
  }
}

/// Classify `date` against its year's table: a tabled day is a holiday
/// or a make-up workday, an untabled weekend rests, anything else works.
pub fn classify(date: NaiveDate, table: &HolidayTable) -> Result<DayStatus> {
  if date.year() != table.year() {
    return Err(Error::WrongYearTable { table_year: table.year(), date });
  }
  if let Some(rule) = table.rule(date) {
    return Ok(if rule.is_rest_day {
      DayStatus::Holiday
    } else {
      DayStatus::MakeUpWorkday
    });
  }
  Ok(classify_weekend_only(date))
}

/// Fallback when no table is published for the year: weekends rest,
/// every other day works.
pub fn classify_weekend_only(date: NaiveDate) -> DayStatus {
  match date.weekday() {
    Weekday::Sat | Weekday::Sun => DayStatus::Weekend,
    _ => DayStatus::Workday,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
  }

  /// The National Day stretch of the real 2024 schedule.
  fn table_2024() -> HolidayTable {
    let mut table = HolidayTable::new(2024);
    for day in 1..=7 {
      table
        .insert(ymd(2024, 10, day), DayRule::rest(Some("国庆节".into())))
        .unwrap();
    }
    table.insert(ymd(2024, 9, 29), DayRule::makeup(None)).unwrap();
    table.insert(ymd(2024, 10, 12), DayRule::makeup(None)).unwrap();
    table
  }

  #[test]
  fn tabled_rest_day_is_a_holiday_even_midweek() {
    // 2024-10-01 was a Tuesday.
    let status = classify(ymd(2024, 10, 1), &table_2024()).unwrap();
    assert_eq!(status, DayStatus::Holiday);
    assert_eq!(status.label(), "节假日");
  }

  #[test]
  fn tabled_weekend_becomes_a_makeup_workday() {
    // 2024-09-29 (Sunday) and 2024-10-12 (Saturday) were working days.
    let table = table_2024();
    assert_eq!(
      classify(ymd(2024, 9, 29), &table).unwrap(),
      DayStatus::MakeUpWorkday
    );
    assert_eq!(
      classify(ymd(2024, 10, 12), &table).unwrap(),
      DayStatus::MakeUpWorkday
    );
  }

  #[test]
  fn untabled_days_fall_back_to_the_week() {
    let table = table_2024();
    // 2024-10-19 is an untabled Saturday, 2024-10-21 a Monday.
    assert_eq!(classify(ymd(2024, 10, 19), &table).unwrap(), DayStatus::Weekend);
    assert_eq!(classify(ymd(2024, 10, 21), &table).unwrap(), DayStatus::Workday);
  }

  #[test]
  fn classification_is_total_within_the_year() {
    let table = table_2024();
    let mut date = ymd(2024, 1, 1);
    while date <= ymd(2024, 12, 31) {
      assert!(classify(date, &table).is_ok(), "{date}");
      date = date.succ_opt().unwrap();
    }
  }

  #[test]
  fn foreign_year_is_rejected_by_classify_and_insert() {
    let mut table = table_2024();
    assert_eq!(
      classify(ymd(2025, 1, 1), &table),
      Err(Error::WrongYearTable { table_year: 2024, date: ymd(2025, 1, 1) })
    );
    assert!(table.insert(ymd(2025, 1, 1), DayRule::rest(None)).is_err());
  }

  #[test]
  fn weekend_only_fallback() {
    assert_eq!(classify_weekend_only(ymd(2024, 10, 5)), DayStatus::Weekend);
    assert_eq!(classify_weekend_only(ymd(2024, 10, 6)), DayStatus::Weekend);
    assert_eq!(classify_weekend_only(ymd(2024, 10, 7)), DayStatus::Workday);
  }
}
