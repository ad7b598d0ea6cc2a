//! Wall-clock measurement for aggregation reports.

use std::time::{Duration, Instant};

use cohort_types::Report;

/// Round a value to two decimal places, ties to even.
pub fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Convert a duration to milliseconds rounded to two decimal places.
pub fn duration_ms(elapsed: Duration) -> f64 {
    round_hundredths(elapsed.as_secs_f64() * 1000.0)
}

/// Run `compute` and wrap its rows in a [`Report`] stamped with the
/// elapsed time.
pub fn measure<T>(compute: impl FnOnce() -> Vec<T>) -> Report<T> {
    let started = Instant::now();
    let data = compute();
    let processing_time_ms = duration_ms(started.elapsed());

    Report {
        processing_time_ms,
        total: data.len(),
        data,
    }
}
