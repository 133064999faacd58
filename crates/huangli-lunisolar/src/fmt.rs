//! Chinese display names for lunar dates: sexagenary year cycle, zodiac
//! animals, and the traditional month and day forms.

use std::fmt;

use crate::LunarDate;

const STEMS: [&str; 10] =
  ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];

const BRANCHES: [&str; 12] = [
  "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

const ZODIAC: [&str; 12] = [
  "鼠", "牛", "虎", "兔", "龙", "蛇", "马", "羊", "猴", "鸡", "狗", "猪",
];

const MONTHS: [&str; 12] = [
  "正", "二", "三", "四", "五", "六", "七", "八", "九", "十", "冬", "腊",
];

#[rustfmt::skip]
const DAYS: [&str; 30] = [
  "初一", "初二", "初三", "初四", "初五", "初六", "初七", "初八", "初九", "初十",
  "十一", "十二", "十三", "十四", "十五", "十六", "十七", "十八", "十九", "二十",
  "廿一", "廿二", "廿三", "廿四", "廿五", "廿六", "廿七", "廿八", "廿九", "三十",
];

/// Sexagenary (干支) name of a lunar year, e.g. 2025 → "乙巳".
/// Anchored on 1984 = 甲子.
pub fn year_stem_branch(year: i32) -> String {
  let stem = STEMS[(year - 4).rem_euclid(10) as usize];
  let branch = BRANCHES[(year - 4).rem_euclid(12) as usize];
  format!("{stem}{branch}")
}

/// Zodiac animal of a lunar year, e.g. 2025 → "蛇".
pub fn year_zodiac(year: i32) -> &'static str {
  ZODIAC[(year - 4).rem_euclid(12) as usize]
}

/// Traditional month form, e.g. "正月", "腊月", "闰六月".
pub fn month_name(date: LunarDate) -> String {
  let prefix = if date.is_leap_month() { "闰" } else { "" };
  format!("{prefix}{}月", MONTHS[(date.month() - 1) as usize])
}

/// Traditional day form, "初一" through "三十".
pub fn day_name(date: LunarDate) -> &'static str {
  DAYS[(date.day() - 1) as usize]
}

impl fmt::Display for LunarDate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}年{}{}", self.year(), month_name(*self), day_name(*self))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sexagenary_cycle() {
    assert_eq!(year_stem_branch(1984), "甲子");
    assert_eq!(year_stem_branch(1900), "庚子");
    assert_eq!(year_stem_branch(1987), "丁卯");
    assert_eq!(year_stem_branch(2025), "乙巳");
  }

  #[test]
  fn zodiac_animals() {
    assert_eq!(year_zodiac(1984), "鼠");
    assert_eq!(year_zodiac(1987), "兔");
    assert_eq!(year_zodiac(2024), "龙");
    assert_eq!(year_zodiac(2025), "蛇");
  }

  #[test]
  fn month_and_day_forms() {
    let d = LunarDate::new(2025, 6, true, 5).unwrap();
    assert_eq!(month_name(d), "闰六月");
    assert_eq!(day_name(d), "初五");

    let eve = LunarDate::new(2023, 12, false, 30).unwrap();
    assert_eq!(month_name(eve), "腊月");
    assert_eq!(day_name(eve), "三十");

    let first = LunarDate::new(2024, 1, false, 1).unwrap();
    assert_eq!(format!("{first}"), "2024年正月初一");
  }
}
