//! Low-precision solar ephemeris used to locate solar-term boundaries.
//!
//! Accuracy is a small fraction of a degree in apparent longitude, i.e.
//! minutes of time at the 15° term boundaries, which is ample for civil
//! day attribution.

use chrono::{Datelike, NaiveDate};

/// Mean solar motion in degrees per day.
const MEAN_MOTION: f64 = 360.0 / 365.2422;

/// Julian day of `date` at 00:00 UTC.
pub(crate) fn julian_day(date: NaiveDate) -> f64 {
  f64::from(date.num_days_from_ce()) + 1_721_424.5
}

/// ΔT = TT − UT in seconds, polynomial fit per calendar year segment.
/// Good to a few seconds across 1900–2100, far below day resolution.
pub(crate) fn delta_t(year: i32) -> f64 {
  let y = f64::from(year);
  if y < 1920.0 {
    let t = y - 1900.0;
    -2.79 + 1.494119 * t - 0.0598939 * t * t + 0.0061966 * t.powi(3)
      - 0.000197 * t.powi(4)
  } else if y < 1941.0 {
    let t = y - 1920.0;
    21.20 + 0.84493 * t - 0.076100 * t * t + 0.0020936 * t.powi(3)
  } else if y < 1961.0 {
    let t = y - 1950.0;
    29.07 + 0.407 * t - t * t / 233.0 + t.powi(3) / 2547.0
  } else if y < 1986.0 {
    let t = y - 1975.0;
    45.45 + 1.067 * t - t * t / 260.0 - t.powi(3) / 718.0
  } else if y < 2005.0 {
    let t = y - 2000.0;
    63.86 + 0.3345 * t - 0.060374 * t * t + 0.0017275 * t.powi(3)
      + 0.000651814 * t.powi(4)
      + 0.00002373599 * t.powi(5)
  } else if y < 2050.0 {
    let t = y - 2000.0;
    62.92 + 0.32217 * t + 0.005589 * t * t
  } else {
    let u = (y - 1820.0) / 100.0;
    -20.0 + 32.0 * u * u - 0.5628 * (2150.0 - y)
  }
}

/// Apparent geocentric solar longitude in degrees at `jde` (TT), in
/// [0, 360): mean longitude plus the equation of center, corrected for
/// nutation and aberration.
pub(crate) fn solar_longitude(jde: f64) -> f64 {
  let t = (jde - 2_451_545.0) / 36_525.0;
  let l0 = 280.46646 + 36_000.76983 * t + 0.000_303_2 * t * t;
  let m = (357.52911 + 35_999.05029 * t - 0.000_153_7 * t * t).to_radians();
  let c = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m.sin()
    + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
    + 0.000_289 * (3.0 * m).sin();
  let omega = (125.04 - 1_934.136 * t).to_radians();
  (l0 + c - 0.005_69 - 0.004_78 * omega.sin()).rem_euclid(360.0)
}

/// Wrap an angle difference into [-180, 180).
fn wrap_degrees(x: f64) -> f64 {
  (x + 180.0).rem_euclid(360.0) - 180.0
}

/// TT instant (as a Julian day) at which the apparent solar longitude
/// reaches `target` degrees, refined from `guess`. The guess must be
/// within a few weeks of the crossing.
pub(crate) fn longitude_crossing(target: f64, guess: f64) -> f64 {
  let mut jde = guess;
  for _ in 0..8 {
    let diff = wrap_degrees(solar_longitude(jde) - target);
    if diff.abs() < 1e-8 {
      break;
    }
    jde -= diff / MEAN_MOTION;
  }
  jde
}

/// Civil date in UTC+8 of the TT instant `jde`. `year` selects the ΔT
/// segment; it only needs to be within a year of the instant.
pub(crate) fn utc8_date(jde: f64, year: i32) -> Option<NaiveDate> {
  let jd_ut = jde - delta_t(year) / 86_400.0;
  let jd_local = jd_ut + 8.0 / 24.0;
  let days_from_ce = (jd_local + 0.5).floor() as i32 - 1_721_425;
  NaiveDate::from_num_days_from_ce_opt(days_from_ce)
}
