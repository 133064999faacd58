//! Time-of-day classification anchored at sunrise and sunset.
//!
//! The day splits into eight named periods. Four boundaries follow the
//! sun and move with the season; the rest are fixed clock times. The
//! last period runs up to the midnight after it starts.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Sunrise and sunset for one day, as local clock times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SunTimes {
  pub sunrise: NaiveTime,
  pub sunset:  NaiveTime,
}

/// One boundary of a period: a fixed clock time or a sun event.
#[derive(Debug, Clone, Copy)]
enum Anchor {
  At(u32, u32),
  Sunrise,
  Sunset,
}

const PERIODS: [(Anchor, Anchor, &str); 8] = [
  (Anchor::At(0, 0), Anchor::At(5, 0), "凌晨"),
  (Anchor::At(5, 0), Anchor::Sunrise, "清晨"),
  (Anchor::Sunrise, Anchor::At(11, 0), "上午"),
  (Anchor::At(11, 0), Anchor::At(13, 0), "中午"),
  (Anchor::At(13, 0), Anchor::Sunset, "下午"),
  (Anchor::Sunset, Anchor::At(20, 0), "傍晚"),
  (Anchor::At(20, 0), Anchor::At(23, 0), "晚上"),
  (Anchor::At(23, 0), Anchor::At(0, 0), "深夜"),
];

/// A resolved period: its label and the concrete window `now` fell in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayPeriod {
  pub label: &'static str,
  pub start: NaiveDateTime,
  pub end:   NaiveDateTime,
}

/// The first period whose window `[start, end)` contains `now`. A window
/// whose end precedes its start extends past midnight. `None` only when
/// the configured sun times leave `now` outside every window.
pub fn classify(now: NaiveDateTime, sun: SunTimes) -> Option<DayPeriod> {
  let date = now.date();
  for (start, end, label) in PERIODS {
    let start = date.and_time(resolve(start, sun));
    let mut end = date.and_time(resolve(end, sun));
    if end < start {
      end += Duration::days(1);
    }
    if start <= now && now < end {
      return Some(DayPeriod { label, start, end });
    }
  }
  None
}

fn resolve(anchor: Anchor, sun: SunTimes) -> NaiveTime {
  match anchor {
    Anchor::At(hour, minute) => match NaiveTime::from_hms_opt(hour, minute, 0) {
      Some(time) => time,
      None => unreachable!("period table anchors are valid clock times"),
    },
    Anchor::Sunrise => sun.sunrise,
    Anchor::Sunset => sun.sunset,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::NaiveDate;

  fn sun() -> SunTimes {
    SunTimes {
      sunrise: NaiveTime::from_hms_opt(6, 30, 0).unwrap(),
      sunset:  NaiveTime::from_hms_opt(18, 15, 0).unwrap(),
    }
  }

  fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 10, 1)
      .unwrap()
      .and_hms_opt(hour, minute, 0)
      .unwrap()
  }

  #[test]
  fn fixed_boundaries_are_half_open() {
    assert_eq!(classify(at(4, 59), sun()).unwrap().label, "凌晨");
    assert_eq!(classify(at(5, 0), sun()).unwrap().label, "清晨");
    assert_eq!(classify(at(10, 59), sun()).unwrap().label, "上午");
    assert_eq!(classify(at(11, 0), sun()).unwrap().label, "中午");
    assert_eq!(classify(at(12, 59), sun()).unwrap().label, "中午");
    assert_eq!(classify(at(13, 0), sun()).unwrap().label, "下午");
  }

  #[test]
  fn sun_boundaries_move_with_the_season() {
    assert_eq!(classify(at(6, 29), sun()).unwrap().label, "清晨");
    assert_eq!(classify(at(6, 30), sun()).unwrap().label, "上午");
    assert_eq!(classify(at(18, 14), sun()).unwrap().label, "下午");
    assert_eq!(classify(at(18, 15), sun()).unwrap().label, "傍晚");

    let winter = SunTimes {
      sunrise: NaiveTime::from_hms_opt(7, 30, 0).unwrap(),
      sunset:  NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
    };
    assert_eq!(classify(at(7, 0), winter).unwrap().label, "清晨");
    assert_eq!(classify(at(17, 30), winter).unwrap().label, "傍晚");
  }

  #[test]
  fn the_last_period_wraps_past_midnight() {
    let period = classify(at(23, 30), sun()).unwrap();
    assert_eq!(period.label, "深夜");
    assert_eq!(period.start, at(23, 0));
    assert_eq!(
      period.end,
      NaiveDate::from_ymd_opt(2024, 10, 2).unwrap().and_hms_opt(0, 0, 0).unwrap()
    );
    // Past midnight the first window matches again.
    assert_eq!(classify(at(0, 30), sun()).unwrap().label, "凌晨");
  }

  #[test]
  fn reported_window_carries_the_resolved_times() {
    let period = classify(at(14, 0), sun()).unwrap();
    assert_eq!(period.label, "下午");
    assert_eq!(period.start, at(13, 0));
    assert_eq!(period.end, at(18, 15));
  }
}
