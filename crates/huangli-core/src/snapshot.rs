//! The daily snapshot and the engine that assembles it.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use huangli_lunisolar::{solar_term, LunarDate, SolarTerm};
use serde::Serialize;

use crate::{
  anniversary::{self, AnniversaryFact, AnniversaryRecord},
  error::{Error, Result},
  festival::{FestivalIndex, NextFestival},
  holiday::{self, DayStatus, HolidayTable},
  source::{Clock, ConfigSource, HolidaySource},
};

/// The solar term in effect on a day: the boundary itself, or the most
/// recent one and the days elapsed since it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentTerm {
  pub name:       &'static str,
  pub date:       NaiveDate,
  /// Zero exactly on the boundary day.
  pub days_since: i64,
}

/// Per-record result slot. A record that fails to evaluate is isolated
/// here instead of aborting the whole snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AnniversaryOutcome {
  Computed(AnniversaryFact),
  Failed { error: String },
}

impl AnniversaryOutcome {
  pub fn fact(&self) -> Option<&AnniversaryFact> {
    match self {
      Self::Computed(fact) => Some(fact),
      Self::Failed { .. } => None,
    }
  }
}

/// The earliest upcoming anniversary across all records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NearestAnniversary {
  pub key:        String,
  pub date:       NaiveDate,
  pub days_until: i64,
  pub hint:       String,
}

/// Everything the host displays for one day. Recreated wholesale by each
/// refresh, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySnapshot {
  /// The reference day the snapshot was computed for.
  pub date:                NaiveDate,
  pub lunar:               LunarDate,
  pub iso_week:            u32,
  pub status:              DayStatus,
  /// Festivals landing on `date`, solar names first; empty most days.
  pub festivals:           Vec<String>,
  pub next_festival:       Option<NextFestival>,
  pub current_term:        CurrentTerm,
  pub next_term:           SolarTerm,
  pub anniversaries:       BTreeMap<String, AnniversaryOutcome>,
  pub nearest_anniversary: Option<NearestAnniversary>,
}

impl DailySnapshot {
  /// The nearest anniversary's wording when it is due within a day; the
  /// host surfaces it only that close.
  pub fn nearest_hint(&self) -> Option<&str> {
    self
      .nearest_anniversary
      .as_ref()
      .filter(|nearest| nearest.days_until <= 1)
      .map(|nearest| nearest.hint.as_str())
  }
}

/// Computation engine: owns the festival index, whose movable key it
/// re-keys on year changes, and the latest snapshot.
///
/// Starts stale, with no snapshot. Reference days in solar years 1901
/// through 2100 are supported; a refresh needs the previous lunar year's
/// tables for the movable New Year's Eve key.
#[derive(Debug, Clone)]
pub struct Almanac {
  festivals: FestivalIndex,
  snapshot:  Option<DailySnapshot>,
}

impl Almanac {
  pub fn new(festivals: FestivalIndex) -> Self {
    Self { festivals, snapshot: None }
  }

  /// The last computed snapshot, or `None` before the first refresh.
  pub fn snapshot(&self) -> Option<&DailySnapshot> {
    self.snapshot.as_ref()
  }

  /// Recompute the snapshot for `today`.
  ///
  /// `table` is the holiday table for `today`'s year, or `None` when the
  /// source has none published, which drops classification back to
  /// weekends only. A failure on a single anniversary record lands in
  /// its slot; a failure resolving `today` itself aborts the refresh and
  /// leaves the previous snapshot in place.
  pub fn refresh(
    &mut self,
    today: NaiveDate,
    table: Option<&HolidayTable>,
    records: &[AnniversaryRecord],
  ) -> Result<&DailySnapshot> {
    self.festivals.refresh_movable_key(today.year())?;

    let lunar = LunarDate::from_solar(today)?;
    let status = match table {
      Some(table) => holiday::classify(today, table)?,
      None => holiday::classify_weekend_only(today),
    };
    let festivals = self.festivals.festivals_on_merged(today)?;
    let next_festival = self.festivals.next_festival_merged(today)?;
    let next_term = solar_term::term_on_or_after(today)?;
    let current_term = match solar_term::term_of_day(today)? {
      Some(term) => CurrentTerm { name: term.name, date: term.date, days_since: 0 },
      None => {
        let term = solar_term::term_before(today)?;
        CurrentTerm {
          name:       term.name,
          date:       term.date,
          days_since: today.signed_duration_since(term.date).num_days(),
        }
      }
    };

    let mut anniversaries = BTreeMap::new();
    let mut nearest: Option<NearestAnniversary> = None;
    for record in records {
      let key = record.key();
      let outcome = match anniversary::evaluate(record, today) {
        Ok(fact) => {
          // Strictly-less keeps the first record on equal dates.
          if nearest.as_ref().is_none_or(|n| fact.next_occurrence < n.date) {
            nearest = Some(NearestAnniversary {
              key:        key.clone(),
              date:       fact.next_occurrence,
              days_until: fact.days_until,
              hint:       fact.hint.clone(),
            });
          }
          AnniversaryOutcome::Computed(fact)
        }
        Err(error) => AnniversaryOutcome::Failed { error: error.to_string() },
      };
      anniversaries.insert(key, outcome);
    }

    let snapshot = DailySnapshot {
      date: today,
      lunar,
      iso_week: today.iso_week().week(),
      status,
      festivals,
      next_festival,
      current_term,
      next_term,
      anniversaries,
      nearest_anniversary: nearest,
    };
    Ok(self.snapshot.insert(snapshot))
  }

  /// Refresh through the collaborator contracts: the reference day from
  /// `clock`, the year's table from `source` (absence tolerated), the
  /// records from `config`.
  pub fn refresh_from(
    &mut self,
    clock: &impl Clock,
    source: &impl HolidaySource,
    config: &impl ConfigSource,
  ) -> Result<&DailySnapshot> {
    let today = clock.today();
    let table = match source.year_table(today.year()) {
      Ok(table) => Some(table),
      Err(Error::DataUnavailable { .. }) => None,
      Err(e) => return Err(e),
    };
    let records = config.anniversaries()?;
    self.refresh(today, table.as_ref(), &records)
  }
}
