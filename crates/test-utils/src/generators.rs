//! Deterministic measurement generators.
//!
//! Values follow simple modular patterns so tests can recompute any
//! expected aggregate from the same inputs.

use chrono::{Duration, NaiveDate};

use climate_common::Measurement;

/// One measurement every `step_days` days from `first` through `last` inclusive.
///
/// For the `i`-th generated row:
/// - `prcp` is `None` when `i % 11 == 5`, `0.0` when `i % 3 == 0`,
///   otherwise `(i % 7) * 0.05`
/// - `tobs` is `base_tobs + (i % 15) - 7`, or `None` when `tobs_gap` divides `i + 1`
pub fn daily_measurements(
    station: &str,
    first: NaiveDate,
    last: NaiveDate,
    step_days: i64,
    base_tobs: f64,
    tobs_gap: Option<usize>,
) -> Vec<Measurement> {
    let step = Duration::days(step_days.max(1));
    let mut rows = Vec::new();
    let mut day = first;
    let mut i = 0usize;

    while day <= last {
        let prcp = if i % 11 == 5 {
            None
        } else if i % 3 == 0 {
            Some(0.0)
        } else {
            Some((i % 7) as f64 * 0.05)
        };

        let tobs = match tobs_gap {
            Some(gap) if gap > 0 && (i + 1) % gap == 0 => None,
            _ => Some(base_tobs + (i % 15) as f64 - 7.0),
        };

        rows.push(Measurement::new(
            station,
            day.format("%Y-%m-%d").to_string(),
            prcp,
            tobs,
        ));

        day += step;
        i += 1;
    }

    rows
}
