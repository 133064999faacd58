//! Settings loading and validation.
//!
//! The TOML file (plus `HUANGLI_`-prefixed environment overrides) keeps
//! the vocabulary users entered in the original product: anniversary
//! entries carry 阳历/阴历 and 生日/纪念日 tags and an 8-digit origin
//! date.
//!
//! ```toml
//! holiday_file = "holiday.json"
//! refresh_hour = 2
//! sunrise = "06:12"
//! sunset  = "18:40"
//!
//! [[anniversaries]]
//! name      = "结婚"
//! kind      = "纪念日"
//! date_type = "阳历"
//! date      = "20101009"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _};
use chrono::{NaiveDate, NaiveTime};
use huangli_core::{
  anniversary::{AnniversaryKind, AnniversaryRecord, OriginDate},
  period::SunTimes,
  source::ConfigSource,
};
use huangli_lunisolar::LunarDate;
use serde::Deserialize;

// ─── File shape ───────────────────────────────────────────────────────────────

/// Raw file shape, prior to validation.
#[derive(Debug, Deserialize)]
struct RawSettings {
  #[serde(default = "default_holiday_file")]
  holiday_file:  PathBuf,
  /// Local hour of the daily refresh.
  #[serde(default = "default_refresh_hour")]
  refresh_hour:  u32,
  #[serde(default = "default_sunrise")]
  sunrise:       String,
  #[serde(default = "default_sunset")]
  sunset:        String,
  #[serde(default)]
  anniversaries: Vec<RawAnniversary>,
}

#[derive(Debug, Deserialize)]
struct RawAnniversary {
  /// Display name, without the kind suffix.
  name:      String,
  /// "生日" or "纪念日".
  kind:      String,
  /// "阳历" or "阴历".
  date_type: String,
  /// Origin date as 8 digits, `yyyymmdd`.
  date:      String,
}

fn default_holiday_file() -> PathBuf {
  PathBuf::from("holiday.json")
}

fn default_refresh_hour() -> u32 {
  2
}

fn default_sunrise() -> String {
  "06:00".to_string()
}

fn default_sunset() -> String {
  "18:00".to_string()
}

// ─── Validated settings ───────────────────────────────────────────────────────

/// Validated runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
  pub holiday_file:  PathBuf,
  pub refresh_at:    NaiveTime,
  pub sun:           SunTimes,
  pub anniversaries: Vec<AnniversaryRecord>,
}

impl Settings {
  /// Load settings from `path` and the environment, validating every
  /// anniversary entry into a record.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix("HUANGLI"))
      .build()
      .context("failed to read config file")?;

    let raw: RawSettings = settings
      .try_deserialize()
      .context("failed to deserialise settings")?;

    let refresh_at = NaiveTime::from_hms_opt(raw.refresh_hour, 0, 0)
      .with_context(|| format!("refresh_hour {} is not a clock hour", raw.refresh_hour))?;
    let sun = SunTimes {
      sunrise: parse_clock(&raw.sunrise).context("invalid sunrise")?,
      sunset:  parse_clock(&raw.sunset).context("invalid sunset")?,
    };
    let anniversaries = raw
      .anniversaries
      .iter()
      .map(validate_anniversary)
      .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(Self {
      holiday_file: raw.holiday_file,
      refresh_at,
      sun,
      anniversaries,
    })
  }
}

impl ConfigSource for Settings {
  fn anniversaries(&self) -> huangli_core::Result<Vec<AnniversaryRecord>> {
    Ok(self.anniversaries.clone())
  }
}

// ─── Validation ───────────────────────────────────────────────────────────────

/// Parse "HH:MM".
pub(crate) fn parse_clock(raw: &str) -> anyhow::Result<NaiveTime> {
  NaiveTime::parse_from_str(raw, "%H:%M")
    .with_context(|| format!("{raw:?} is not a HH:MM clock time"))
}

/// Validate one raw entry into a record.
fn validate_anniversary(raw: &RawAnniversary) -> anyhow::Result<AnniversaryRecord> {
  let name = raw.name.trim();
  if name.is_empty() || name.chars().count() > 50 {
    bail!("anniversary name must be 1 to 50 characters: {:?}", raw.name);
  }
  let kind = match raw.kind.as_str() {
    "生日" => AnniversaryKind::Birthday,
    "纪念日" => AnniversaryKind::Memorial,
    other => bail!("unknown anniversary kind {other:?} (expected 生日 or 纪念日)"),
  };

  let digits = raw.date.as_str();
  if digits.len() != 8 || !digits.bytes().all(|b| b.is_ascii_digit()) {
    bail!("anniversary date must be 8 digits (yyyymmdd): {digits:?}");
  }
  let year: i32 = digits[0..4].parse()?;
  let month: u32 = digits[4..6].parse()?;
  let day: u32 = digits[6..8].parse()?;

  let origin = match raw.date_type.as_str() {
    "阳历" => OriginDate::Solar(
      NaiveDate::from_ymd_opt(year, month, day)
        .with_context(|| format!("{digits} is not a solar calendar date"))?,
    ),
    "阴历" => OriginDate::Lunar(
      LunarDate::new(year, month, false, day)
        .with_context(|| format!("{digits} is not a lunar calendar date"))?,
    ),
    other => bail!("unknown date type {other:?} (expected 阳历 or 阴历)"),
  };

  Ok(AnniversaryRecord { name: name.to_string(), kind, origin })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn raw(name: &str, kind: &str, date_type: &str, date: &str) -> RawAnniversary {
    RawAnniversary {
      name:      name.to_string(),
      kind:      kind.to_string(),
      date_type: date_type.to_string(),
      date:      date.to_string(),
    }
  }

  #[test]
  fn solar_entry_validates() {
    let record = validate_anniversary(&raw("结婚", "纪念日", "阳历", "20101009")).unwrap();
    assert_eq!(record.name, "结婚");
    assert_eq!(record.kind, AnniversaryKind::Memorial);
    assert_eq!(
      record.origin,
      OriginDate::Solar(NaiveDate::from_ymd_opt(2010, 10, 9).unwrap())
    );
  }

  #[test]
  fn lunar_entry_validates() {
    let record = validate_anniversary(&raw("爷爷", "生日", "阴历", "19871220")).unwrap();
    assert_eq!(record.kind, AnniversaryKind::Birthday);
    assert_eq!(
      record.origin,
      OriginDate::Lunar(LunarDate::new(1987, 12, false, 20).unwrap())
    );
  }

  #[test]
  fn bad_entries_are_rejected() {
    assert!(validate_anniversary(&raw("", "生日", "阳历", "19900315")).is_err());
    assert!(validate_anniversary(&raw("x", "婚礼", "阳历", "19900315")).is_err());
    assert!(validate_anniversary(&raw("x", "生日", "皇历", "19900315")).is_err());
    assert!(validate_anniversary(&raw("x", "生日", "阳历", "1990-03-15")).is_err());
    assert!(validate_anniversary(&raw("x", "生日", "阳历", "19900230")).is_err());
    // Lunar months never reach 13, and short months never a day 30.
    assert!(validate_anniversary(&raw("x", "生日", "阴历", "19901330")).is_err());
    assert!(validate_anniversary(&raw("x", "生日", "阴历", "20241230")).is_err());
  }

  #[test]
  fn clock_strings() {
    assert_eq!(
      parse_clock("06:12").unwrap(),
      NaiveTime::from_hms_opt(6, 12, 0).unwrap()
    );
    assert!(parse_clock("6 am").is_err());
  }
}
