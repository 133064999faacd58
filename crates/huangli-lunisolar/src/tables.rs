//! Packed per-year lunar calendar data, 1900–2100.
//!
//! Each entry encodes one lunar year in a `u32`:
//!
//! - bits 4–15: months 12…1 — a set bit means the month has 30 days,
//!   a clear bit 29 (month `m` is bit `0x10000 >> m`);
//! - bit 16: the leap month, if any, has 30 days;
//! - bits 0–3: the leap month number, 0 when the year has none.
//!
//! Lunar 1900-01-01 fell on solar 1900-01-31; conversions walk whole
//! years and months from that epoch.

use crate::error::{Error, Result};

/// First lunar year covered by the tables.
pub const MIN_YEAR: i32 = 1900;
/// Last lunar year covered by the tables.
pub const MAX_YEAR: i32 = 2100;

#[rustfmt::skip]
const YEAR_INFO: [u32; 201] = [
  0x04bd8, 0x04ae0, 0x0a570, 0x054d5, 0x0d260, // 1900-1904
  0x0d950, 0x16554, 0x056a0, 0x09ad0, 0x055d2, // 1905-1909
  0x04ae0, 0x0a5b6, 0x0a4d0, 0x0d250, 0x1d255, // 1910-1914
  0x0b540, 0x0d6a0, 0x0ada2, 0x095b0, 0x14977, // 1915-1919
  0x04970, 0x0a4b0, 0x0b4b5, 0x06a50, 0x06d40, // 1920-1924
  0x1ab54, 0x02b60, 0x09570, 0x052f2, 0x04970, // 1925-1929
  0x06566, 0x0d4a0, 0x0ea50, 0x06e95, 0x05ad0, // 1930-1934
  0x02b60, 0x186e3, 0x092e0, 0x1c8d7, 0x0c950, // 1935-1939
  0x0d4a0, 0x1d8a6, 0x0b550, 0x056a0, 0x1a5b4, // 1940-1944
  0x025d0, 0x092d0, 0x0d2b2, 0x0a950, 0x0b557, // 1945-1949
  0x06ca0, 0x0b550, 0x15355, 0x04da0, 0x0a5b0, // 1950-1954
  0x14573, 0x052b0, 0x0a9a8, 0x0e950, 0x06aa0, // 1955-1959
  0x0aea6, 0x0ab50, 0x04b60, 0x0aae4, 0x0a570, // 1960-1964
  0x05260, 0x0f263, 0x0d950, 0x05b57, 0x056a0, // 1965-1969
  0x096d0, 0x04dd5, 0x04ad0, 0x0a4d0, 0x0d4d4, // 1970-1974
  0x0d250, 0x0d558, 0x0b540, 0x0b5a0, 0x195a6, // 1975-1979
  0x095b0, 0x049b0, 0x0a974, 0x0a4b0, 0x0b27a, // 1980-1984
  0x06a50, 0x06d40, 0x0af46, 0x0ab60, 0x09570, // 1985-1989
  0x04af5, 0x04970, 0x064b0, 0x074a3, 0x0ea50, // 1990-1994
  0x06b58, 0x055c0, 0x0ab60, 0x096d5, 0x092e0, // 1995-1999
  0x0c960, 0x0d954, 0x0d4a0, 0x0da50, 0x07552, // 2000-2004
  0x056a0, 0x0abb7, 0x025d0, 0x092d0, 0x0cab5, // 2005-2009
  0x0a950, 0x0b4a0, 0x0baa4, 0x0ad50, 0x055d9, // 2010-2014
  0x04ba0, 0x0a5b0, 0x15176, 0x052b0, 0x0a930, // 2015-2019
  0x07954, 0x06aa0, 0x0ad50, 0x05b52, 0x04b60, // 2020-2024
  0x0a6e6, 0x0a4e0, 0x0d260, 0x0ea65, 0x0d530, // 2025-2029
  0x05aa0, 0x076a3, 0x096d0, 0x04afb, 0x04ad0, // 2030-2034
  0x0a4d0, 0x1d0b6, 0x0d250, 0x0d520, 0x0dd45, // 2035-2039
  0x0b5a0, 0x056d0, 0x055b2, 0x049b0, 0x0a577, // 2040-2044
  0x0a4b0, 0x0aa50, 0x1b255, 0x06d20, 0x0ada0, // 2045-2049
  0x14b63, 0x09370, 0x049f8, 0x04970, 0x064b0, // 2050-2054
  0x168a6, 0x0ea50, 0x06b20, 0x1a6c4, 0x0aae0, // 2055-2059
  0x0a2e0, 0x0d2e3, 0x0c960, 0x0d557, 0x0d4a0, // 2060-2064
  0x0da50, 0x05d55, 0x056a0, 0x0a6d0, 0x055d4, // 2065-2069
  0x052d0, 0x0a9b8, 0x0a950, 0x0b4a0, 0x0b6a6, // 2070-2074
  0x0ad50, 0x055a0, 0x0aba4, 0x0a5b0, 0x052b0, // 2075-2079
  0x0b273, 0x06930, 0x07337, 0x06aa0, 0x0ad50, // 2080-2084
  0x14b55, 0x04b60, 0x0a570, 0x054e4, 0x0d160, // 2085-2089
  0x0e968, 0x0d520, 0x0daa0, 0x16aa6, 0x056d0, // 2090-2094
  0x04ae0, 0x0a9d4, 0x0a2d0, 0x0d150, 0x0f252, // 2095-2099
  0x0d520,                                     // 2100
];

/// Raw entry for a year already known to be in range.
fn raw(year: i32) -> u32 {
  YEAR_INFO[(year - MIN_YEAR) as usize]
}

fn check_year(year: i32) -> Result<u32> {
  if (MIN_YEAR..=MAX_YEAR).contains(&year) {
    Ok(raw(year))
  } else {
    Err(Error::UnsupportedYear { year })
  }
}

// ─── Range-validated accessors ───────────────────────────────────────────────

/// The leap month of `year` (1–12), or `None` in a common year.
pub fn leap_month(year: i32) -> Result<Option<u32>> {
  let info = check_year(year)?;
  let m = info & 0xf;
  Ok((m != 0).then_some(m))
}

/// Days (29 or 30) in the given lunar month. `leap` selects the leap
/// month, which must exist in that year.
pub fn month_length(year: i32, month: u32, leap: bool) -> Result<u32> {
  let info = check_year(year)?;
  let invalid = Error::InvalidLunarDate { year, month, day: 1, leap };
  if !(1..=12).contains(&month) {
    return Err(invalid);
  }
  if leap {
    if info & 0xf != month {
      return Err(invalid);
    }
    Ok(if info & 0x10000 != 0 { 30 } else { 29 })
  } else {
    Ok(if info & (0x10000 >> month) != 0 { 30 } else { 29 })
  }
}

/// Total days in the lunar year, leap month included (353–355 common,
/// 383–385 leap).
pub fn year_length(year: i32) -> Result<u32> {
  check_year(year)?;
  Ok(year_length_raw(year))
}

// ─── Unchecked accessors for pre-validated years ─────────────────────────────

pub(crate) fn leap_month_raw(year: i32) -> Option<u32> {
  let m = raw(year) & 0xf;
  (m != 0).then_some(m)
}

pub(crate) fn month_length_raw(year: i32, month: u32, leap: bool) -> u32 {
  let info = raw(year);
  let thirty = if leap {
    info & 0x10000 != 0
  } else {
    info & (0x10000 >> month) != 0
  };
  if thirty { 30 } else { 29 }
}

pub(crate) fn year_length_raw(year: i32) -> u32 {
  let info = raw(year);
  let mut days = 348 + (info >> 4 & 0xfff).count_ones();
  if info & 0xf != 0 {
    days += if info & 0x10000 != 0 { 30 } else { 29 };
  }
  days
}
