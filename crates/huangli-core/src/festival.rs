//! Festival tables and lookups across both calendar systems.
//!
//! Festivals are keyed by a packed month/day number (`month * 100 + day`)
//! in the calendar system they belong to. Lunar keys always name common
//! months; a day inside a leap month therefore matches nothing. New
//! Year's Eve is the one movable entry: it sits on day 29 or 30 of the
//! twelfth month depending on the year, and is re-keyed whenever the
//! reference year changes.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use huangli_lunisolar::{tables, LunarDate};
use serde::Serialize;

use crate::error::Result;

/// Fixed solar-calendar festivals.
const SOLAR_FESTIVALS: [(u16, &str); 14] = [
  (101, "元旦"),
  (214, "情人节"),
  (308, "妇女节"),
  (312, "植树节"),
  (401, "愚人节"),
  (501, "劳动节"),
  (504, "青年节"),
  (601, "儿童节"),
  (701, "建党节"),
  (801, "建军节"),
  (910, "教师节"),
  (1001, "国庆节"),
  (1224, "平安夜"),
  (1225, "圣诞节"),
];

/// Fixed lunar-calendar festivals. New Year's Eve is movable and kept
/// out of this table; see [`FestivalIndex::refresh_movable_key`].
const LUNAR_FESTIVALS: [(u16, &str); 10] = [
  (101, "春节"),
  (115, "元宵节"),
  (202, "龙抬头"),
  (505, "端午节"),
  (707, "七夕节"),
  (715, "中元节"),
  (815, "中秋节"),
  (909, "重阳节"),
  (1208, "腊八节"),
  (1223, "小年"),
];

const EVE_NAME: &str = "除夕";

/// Which calendar system a festival key is defined in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FestivalSystem {
  Solar,
  Lunar,
}

/// The nearest upcoming festival date and every name landing on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextFestival {
  pub date:  NaiveDate,
  pub names: Vec<String>,
}

/// Festival lookup tables for both calendar systems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FestivalIndex {
  solar:     BTreeMap<u16, Vec<String>>,
  lunar:     BTreeMap<u16, Vec<String>>,
  eve_names: Vec<String>,
  /// Solar year the movable key was last computed for, and the key.
  movable:   Option<(i32, u16)>,
}

impl FestivalIndex {
  /// Index over the built-in festival datasets.
  pub fn builtin() -> Self {
    let mut solar: BTreeMap<u16, Vec<String>> = BTreeMap::new();
    for (key, name) in SOLAR_FESTIVALS {
      solar.entry(key).or_default().push(name.to_string());
    }
    let mut lunar: BTreeMap<u16, Vec<String>> = BTreeMap::new();
    for (key, name) in LUNAR_FESTIVALS {
      lunar.entry(key).or_default().push(name.to_string());
    }
    Self {
      solar,
      lunar,
      eve_names: vec![EVE_NAME.to_string()],
      movable: None,
    }
  }

  /// Index over caller-supplied tables. `eve_names` are filed under the
  /// movable New Year's Eve key on each [`Self::refresh_movable_key`].
  pub fn new(
    solar: BTreeMap<u16, Vec<String>>,
    lunar: BTreeMap<u16, Vec<String>>,
    eve_names: Vec<String>,
  ) -> Self {
    Self { solar, lunar, eve_names, movable: None }
  }

  /// Re-key the movable New Year's Eve entry for `year`.
  ///
  /// The Eve falling inside solar year `year` is the last day (29 or 30)
  /// of lunar year `year - 1`'s twelfth month. Idempotent while the
  /// stored year matches.
  pub fn refresh_movable_key(&mut self, year: i32) -> Result<()> {
    if self.movable.is_some_and(|(y, _)| y == year) {
      return Ok(());
    }
    let last_day = tables::month_length(year - 1, 12, false)?;
    let key = 1200 + last_day as u16;
    if let Some((_, old_key)) = self.movable.take()
      && let Some(names) = self.lunar.get_mut(&old_key)
    {
      names.retain(|name| !self.eve_names.contains(name));
      if names.is_empty() {
        self.lunar.remove(&old_key);
      }
    }
    if !self.eve_names.is_empty() {
      self
        .lunar
        .entry(key)
        .or_default()
        .extend(self.eve_names.iter().cloned());
    }
    self.movable = Some((year, key));
    Ok(())
  }

  /// Solar year the movable key currently targets, if ever refreshed.
  pub fn movable_key_year(&self) -> Option<i32> {
    self.movable.map(|(year, _)| year)
  }

  /// Festival names landing exactly on `date` in one calendar system.
  ///
  /// Lunar lookups convert `date` first; a date inside a leap month
  /// matches nothing, since every lunar key names a common month.
  pub fn festivals_on(
    &self,
    date: NaiveDate,
    system: FestivalSystem,
  ) -> Result<Vec<String>> {
    let names = match system {
      FestivalSystem::Solar => self.solar.get(&solar_key(date)),
      FestivalSystem::Lunar => {
        let lunar = LunarDate::from_solar(date)?;
        if lunar.is_leap_month() {
          None
        } else {
          self.lunar.get(&lunar_key(lunar))
        }
      }
    };
    Ok(names.cloned().unwrap_or_default())
  }

  /// Every festival landing on `date` in either system, solar names
  /// first.
  pub fn festivals_on_merged(&self, date: NaiveDate) -> Result<Vec<String>> {
    let mut names = self.festivals_on(date, FestivalSystem::Solar)?;
    names.extend(self.festivals_on(date, FestivalSystem::Lunar)?);
    Ok(names)
  }

  /// The nearest festival strictly after `date` in one calendar system,
  /// or `None` if the table is empty.
  ///
  /// A festival on `date` itself counts as today's, not the next. Past
  /// the final key of the year the scan wraps into the following year.
  /// Keys naming a day the scanned year lacks (Feb 29, day 30 of a short
  /// lunar month) are skipped.
  pub fn next_festival(
    &self,
    date: NaiveDate,
    system: FestivalSystem,
  ) -> Result<Option<NextFestival>> {
    match system {
      FestivalSystem::Solar => self.next_solar_festival(date),
      FestivalSystem::Lunar => self.next_lunar_festival(date),
    }
  }

  /// The nearest upcoming festival across both systems.
  ///
  /// Both systems are scanned independently; when they land on the same
  /// solar date the name lists merge, solar names first. Ties in date
  /// favor solar by the same rule.
  pub fn next_festival_merged(
    &self,
    date: NaiveDate,
  ) -> Result<Option<NextFestival>> {
    let solar = self.next_solar_festival(date)?;
    let lunar = self.next_lunar_festival(date)?;
    Ok(match (solar, lunar) {
      (Some(mut solar), Some(lunar)) => {
        if solar.date == lunar.date {
          solar.names.extend(lunar.names);
          Some(solar)
        } else if lunar.date < solar.date {
          Some(lunar)
        } else {
          Some(solar)
        }
      }
      (solar, lunar) => solar.or(lunar),
    })
  }

  fn next_solar_festival(&self, date: NaiveDate) -> Result<Option<NextFestival>> {
    let query = solar_key(date);
    for (&key, names) in self.solar.range(query + 1..) {
      if let Some(found) = restamp_solar(date.year(), key) {
        return Ok(Some(NextFestival { date: found, names: names.clone() }));
      }
    }
    for (&key, names) in &self.solar {
      if let Some(found) = restamp_solar(date.year() + 1, key) {
        return Ok(Some(NextFestival { date: found, names: names.clone() }));
      }
    }
    Ok(None)
  }

  fn next_lunar_festival(&self, date: NaiveDate) -> Result<Option<NextFestival>> {
    let lunar = LunarDate::from_solar(date)?;
    // Every day of a leap month sits after the common month's keys, so a
    // leap-month query scans from past the common month's last day.
    let query = if lunar.is_leap_month() {
      lunar.month() as u16 * 100 + 99
    } else {
      lunar_key(lunar)
    };
    for (&key, names) in self.lunar.range(query + 1..) {
      if let Some(found) = restamp_lunar(lunar.year(), key)? {
        return Ok(Some(NextFestival { date: found, names: names.clone() }));
      }
    }
    for (&key, names) in &self.lunar {
      if let Some(found) = restamp_lunar(lunar.year() + 1, key)? {
        return Ok(Some(NextFestival { date: found, names: names.clone() }));
      }
    }
    Ok(None)
  }
}

impl Default for FestivalIndex {
  fn default() -> Self {
    Self::builtin()
  }
}

fn solar_key(date: NaiveDate) -> u16 {
  (date.month() * 100 + date.day()) as u16
}

fn lunar_key(date: LunarDate) -> u16 {
  (date.month() * 100 + date.day()) as u16
}

fn restamp_solar(year: i32, key: u16) -> Option<NaiveDate> {
  NaiveDate::from_ymd_opt(year, u32::from(key / 100), u32::from(key % 100))
}

/// Place a lunar key into `year`. A key naming a day the year lacks
/// yields `None`; a year outside the tables is a hard error.
fn restamp_lunar(year: i32, key: u16) -> Result<Option<NaiveDate>> {
  let (month, day) = (u32::from(key / 100), u32::from(key % 100));
  match LunarDate::new(year, month, false, day) {
    Ok(lunar) => Ok(Some(lunar.to_solar())),
    Err(huangli_lunisolar::Error::InvalidLunarDate { .. }) => Ok(None),
    Err(e) => Err(e.into()),
  }
}
