//! Plain-text attribute block, one `key: value` line per attribute.
//!
//! This is the shape the host scrapes, so labels and value forms stay
//! stable.

use chrono::{Datelike as _, NaiveDate, NaiveDateTime};
use huangli_core::snapshot::DailySnapshot;
use huangli_lunisolar::fmt as lunar;

const WEEKDAYS: [&str; 7] = [
  "星期一", "星期二", "星期三", "星期四", "星期五", "星期六", "星期日",
];

/// Render `snapshot` as the attribute block, stamped with `now`.
pub fn attribute_block(snapshot: &DailySnapshot, now: NaiveDateTime) -> String {
  let date = snapshot.date;
  let moon = snapshot.lunar;

  let mut lines = Vec::new();
  lines.push(format!("状态: {}", snapshot.status.label()));
  lines.push(format!(
    "今天: {}年{:02}月{:02}日 {}",
    date.year(),
    date.month(),
    date.day(),
    WEEKDAYS[date.weekday().num_days_from_monday() as usize],
  ));
  lines.push(format!(
    "农历: {}({})年 {}{}",
    lunar::year_stem_branch(moon.year()),
    lunar::year_zodiac(moon.year()),
    lunar::month_name(moon),
    lunar::day_name(moon),
  ));
  lines.push(format!("周数: {}", snapshot.iso_week));

  // On a boundary day the term names itself; otherwise "X后".
  let term = &snapshot.current_term;
  if term.days_since == 0 {
    lines.push(format!("节气: {}", term.name));
  } else {
    lines.push(format!("节气: {}后", term.name));
  }

  let festivals = if snapshot.festivals.is_empty() {
    "无".to_string()
  } else {
    snapshot.festivals.join(" ")
  };
  lines.push(format!("节假日: {festivals}"));
  lines.push(format!(
    "纪念日/生日: {}",
    snapshot.nearest_hint().unwrap_or("无")
  ));

  if let Some(next) = &snapshot.next_festival {
    lines.push(format!(
      "下一个节假日: {} {}",
      month_day(next.date),
      next.names.join(" "),
    ));
  }
  lines.push(format!(
    "下一个节气: {} {}",
    month_day(snapshot.next_term.date),
    snapshot.next_term.name,
  ));
  if let Some(nearest) = &snapshot.nearest_anniversary {
    lines.push(format!(
      "下一个纪念日: {} {}",
      month_day(nearest.date),
      nearest.hint,
    ));
  }
  lines.push(format!("更新时间: {}", now.format("%Y-%m-%d %H:%M")));

  let mut out = lines.join("\n");
  out.push('\n');
  out
}

fn month_day(date: NaiveDate) -> String {
  format!("{:02}月{:02}日", date.month(), date.day())
}
