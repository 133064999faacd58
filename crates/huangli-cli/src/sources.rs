//! Data-source adapters for the CLI.
//!
//! The holiday feed is the JSON file published per year by the
//! statutory-holiday dataset: a map from year string to a map of ISO
//! dates, each carrying a name and an `isOffDay` flag.

use std::{collections::BTreeMap, path::PathBuf};

use anyhow::Context as _;
use chrono::{Local, NaiveDate, NaiveDateTime};
use huangli_core::{
  holiday::{DayRule, HolidayTable},
  period::SunTimes,
  source::{Clock, HolidaySource, SunEvents},
  Error,
};
use serde::Deserialize;

// ─── Holiday feed ─────────────────────────────────────────────────────────────

/// One day entry in the published feed.
#[derive(Debug, Deserialize)]
struct FeedDay {
  #[serde(default)]
  name:       Option<String>,
  #[serde(rename = "isOffDay")]
  is_off_day: bool,
}

/// Holiday tables read from a feed file on disk.
#[derive(Debug, Clone)]
pub struct FileHolidaySource {
  path: PathBuf,
}

impl FileHolidaySource {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  /// Read and parse the feed, extracting `year`. A missing file or a
  /// file without that year both come back as `None`.
  fn load_year(&self, year: i32) -> anyhow::Result<Option<HolidayTable>> {
    let raw = match std::fs::read_to_string(&self.path) {
      Ok(raw) => raw,
      Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
        return Ok(None);
      }
      Err(error) => {
        return Err(error)
          .with_context(|| format!("failed to read {}", self.path.display()));
      }
    };
    parse_feed(&raw, year)
  }
}

/// Extract the table for `year` from the raw feed text.
fn parse_feed(raw: &str, year: i32) -> anyhow::Result<Option<HolidayTable>> {
  let feed: BTreeMap<String, BTreeMap<NaiveDate, FeedDay>> =
    serde_json::from_str(raw).context("holiday feed is not valid JSON")?;
  let Some(days) = feed.get(&year.to_string()) else {
    return Ok(None);
  };

  let mut table = HolidayTable::new(year);
  for (date, day) in days {
    let rule = if day.is_off_day {
      DayRule::rest(day.name.clone())
    } else {
      DayRule::makeup(day.name.clone())
    };
    table
      .insert(*date, rule)
      .with_context(|| format!("holiday feed entry {date} under year {year}"))?;
  }
  Ok(Some(table))
}

impl HolidaySource for FileHolidaySource {
  fn year_table(&self, year: i32) -> huangli_core::Result<HolidayTable> {
    match self.load_year(year) {
      Ok(Some(table)) => Ok(table),
      Ok(None) => {
        tracing::info!("no holiday table published for {year}");
        Err(Error::DataUnavailable { year })
      }
      Err(error) => {
        tracing::warn!(
          "holiday feed unreadable, treating {year} as unpublished: {error:#}"
        );
        Err(Error::DataUnavailable { year })
      }
    }
  }
}

// ─── Clock and sun ────────────────────────────────────────────────────────────

/// Wall clock in the host's local timezone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> NaiveDateTime {
    Local::now().naive_local()
  }
}

/// Sunrise and sunset fixed by configuration, the same every day.
#[derive(Debug, Clone, Copy)]
pub struct FixedSunEvents {
  times: SunTimes,
}

impl FixedSunEvents {
  pub fn new(times: SunTimes) -> Self {
    Self { times }
  }
}

impl SunEvents for FixedSunEvents {
  fn sun_times(&self, _date: NaiveDate) -> SunTimes {
    self.times
  }
}
