//! `huangli` — daily lunisolar calendar facts for home automation.
//!
//! Computes the day's rest/work status, lunar date, festivals, solar
//! terms, and anniversary countdowns, from a locally cached statutory
//! holiday feed and a TOML configuration.
//!
//! # Usage
//!
//! ```
//! huangli show
//! huangli show --date 2025-01-28 --json
//! huangli watch
//! huangli period --time 07:30
//! ```

mod config;
mod render;
mod sources;

use std::{path::PathBuf, time::Duration};

use anyhow::Context as _;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Parser, Subcommand};
use huangli_core::{
  festival::FestivalIndex,
  period,
  snapshot::{Almanac, DailySnapshot},
  source::{Clock as _, HolidaySource as _, SunEvents as _},
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::{
  config::Settings,
  sources::{FileHolidaySource, FixedSunEvents, SystemClock},
};

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(author, version, about = "Lunisolar calendar and anniversary daemon")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "huangli.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Print the snapshot for today (or a given date) and exit.
  Show {
    /// Compute for this date instead of today.
    #[arg(long, value_name = "YYYY-MM-DD")]
    date: Option<NaiveDate>,

    /// Emit the snapshot as JSON instead of the attribute block.
    #[arg(long)]
    json: bool,
  },

  /// Refresh immediately, then daily at the configured hour.
  Watch,

  /// Classify a clock time into its day period.
  Period {
    /// Time to classify (HH:MM); defaults to now.
    #[arg(long, value_name = "HH:MM")]
    time: Option<String>,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(&cli.config)?;

  match cli.command {
    Command::Show { date, json } => run_show(&settings, date, json),
    Command::Watch => run_watch(&settings).await,
    Command::Period { time } => run_period(&settings, time),
  }
}

// ─── Subcommands ──────────────────────────────────────────────────────────────

fn run_show(settings: &Settings, date: Option<NaiveDate>, json: bool) -> anyhow::Result<()> {
  let clock = SystemClock;
  let today = date.unwrap_or_else(|| clock.today());
  let mut almanac = Almanac::new(FestivalIndex::builtin());
  let snapshot = refresh_cycle(&mut almanac, settings, today)?;

  if json {
    let rendered =
      serde_json::to_string_pretty(&snapshot).context("serialising snapshot")?;
    println!("{rendered}");
  } else {
    print!("{}", render::attribute_block(&snapshot, clock.now()));
  }
  Ok(())
}

async fn run_watch(settings: &Settings) -> anyhow::Result<()> {
  let clock = SystemClock;
  let source = FileHolidaySource::new(settings.holiday_file.clone());
  let mut almanac = Almanac::new(FestivalIndex::builtin());

  tracing::info!("daily refresh at {}", settings.refresh_at.format("%H:%M"));
  loop {
    match almanac.refresh_from(&clock, &source, settings) {
      Ok(snapshot) => {
        tracing::info!("refreshed snapshot for {}", snapshot.date);
        print!("{}", render::attribute_block(snapshot, clock.now()));
      }
      Err(error) => tracing::error!("refresh failed: {error}"),
    }

    let pause = until_next(clock.now(), settings.refresh_at);
    tracing::info!("next refresh in {}s", pause.as_secs());
    tokio::time::sleep(pause).await;
  }
}

fn run_period(settings: &Settings, time: Option<String>) -> anyhow::Result<()> {
  let clock = SystemClock;
  let now = match time {
    Some(raw) => clock.today().and_time(config::parse_clock(&raw)?),
    None => clock.now(),
  };
  let sun = FixedSunEvents::new(settings.sun);
  let times = sun.sun_times(now.date());

  match period::classify(now, times) {
    Some(found) => {
      println!("{}", found.label);
      println!(
        "时间区间: [{}, {})",
        found.start.format("%H:%M"),
        found.end.format("%H:%M")
      );
      println!("日出时间: {}", times.sunrise.format("%H:%M"));
      println!("日落时间: {}", times.sunset.format("%H:%M"));
    }
    None => println!("未知"),
  }
  Ok(())
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

/// One refresh: fetch the year's table (an unpublished year drops to
/// weekend-only classification), refresh, and hand back the snapshot.
fn refresh_cycle(
  almanac: &mut Almanac,
  settings: &Settings,
  today: NaiveDate,
) -> anyhow::Result<DailySnapshot> {
  let source = FileHolidaySource::new(settings.holiday_file.clone());
  let table = match source.year_table(today.year()) {
    Ok(table) => Some(table),
    Err(huangli_core::Error::DataUnavailable { .. }) => None,
    Err(error) => return Err(error).context("loading holiday table"),
  };
  let snapshot = almanac
    .refresh(today, table.as_ref(), &settings.anniversaries)
    .context("refreshing snapshot")?;
  Ok(snapshot.clone())
}

/// Time until the next daily boundary at `at`.
fn until_next(now: NaiveDateTime, at: NaiveTime) -> Duration {
  let mut boundary = now.date().and_time(at);
  if boundary <= now {
    boundary += chrono::Duration::days(1);
  }
  (boundary - now).to_std().unwrap_or(Duration::ZERO)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn until_next_rolls_past_a_boundary_already_hit() {
    let at = NaiveTime::from_hms_opt(2, 0, 0).unwrap();
    let early = NaiveDate::from_ymd_opt(2024, 10, 1)
      .unwrap()
      .and_hms_opt(1, 30, 0)
      .unwrap();
    assert_eq!(until_next(early, at), Duration::from_secs(30 * 60));

    let late = NaiveDate::from_ymd_opt(2024, 10, 1)
      .unwrap()
      .and_hms_opt(2, 0, 0)
      .unwrap();
    assert_eq!(until_next(late, at), Duration::from_secs(24 * 60 * 60));
  }
}
