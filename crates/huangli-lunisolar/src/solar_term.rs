//! The 24 solar terms (节气).
//!
//! A term boundary is the instant the Sun's apparent longitude reaches a
//! multiple of 15°. Dates are the civil day of that instant in UTC+8,
//! matching the Chinese calendar convention.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::{
  astro,
  error::{Error, Result},
  tables,
};

/// Term names in calendar-year order, 小寒 (early January) first.
pub const TERM_NAMES: [&str; 24] = [
  "小寒", "大寒", "立春", "雨水", "惊蛰", "春分", "清明", "谷雨", "立夏",
  "小满", "芒种", "夏至", "小暑", "大暑", "立秋", "处暑", "白露", "秋分",
  "寒露", "霜降", "立冬", "小雪", "大雪", "冬至",
];

/// A solar-term boundary day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SolarTerm {
  pub name: &'static str,
  pub date: NaiveDate,
}

fn term_date(year: i32, index: usize) -> Result<NaiveDate> {
  if !(tables::MIN_YEAR..=tables::MAX_YEAR).contains(&year) {
    return Err(Error::UnsupportedYear { year });
  }
  let jan1 = NaiveDate::from_ymd_opt(year, 1, 1)
    .ok_or(Error::UnsupportedYear { year })?;
  // 小寒 sits at 285°; each later term adds 15°.
  let target = (285.0 + 15.0 * index as f64).rem_euclid(360.0);
  let guess = astro::julian_day(jan1) + 4.5 + 15.2184 * index as f64;
  let jde = astro::longitude_crossing(target, guess);
  astro::utc8_date(jde, year).ok_or(Error::UnsupportedYear { year })
}

/// The 24 term boundaries of a calendar year, in order.
pub fn terms_of_year(year: i32) -> Result<Vec<SolarTerm>> {
  (0..24)
    .map(|i| {
      Ok(SolarTerm {
        name: TERM_NAMES[i],
        date: term_date(year, i)?,
      })
    })
    .collect()
}

/// The nearest term boundary at or after `date`.
pub fn term_on_or_after(date: NaiveDate) -> Result<SolarTerm> {
  for term in terms_of_year(date.year())? {
    if term.date >= date {
      return Ok(term);
    }
  }
  // Past the December solstice: the next boundary opens the next year.
  Ok(terms_of_year(date.year() + 1)?[0])
}

/// The nearest term boundary strictly before `date`.
pub fn term_before(date: NaiveDate) -> Result<SolarTerm> {
  let mut prev = None;
  for term in terms_of_year(date.year())? {
    if term.date < date {
      prev = Some(term);
    } else {
      break;
    }
  }
  match prev {
    Some(term) => Ok(term),
    // Early January before 小寒: the previous year's 冬至.
    None => Ok(terms_of_year(date.year() - 1)?[23]),
  }
}

/// The term falling exactly on `date`, if any.
pub fn term_of_day(date: NaiveDate) -> Result<Option<SolarTerm>> {
  let term = term_on_or_after(date)?;
  Ok((term.date == date).then_some(term))
}
