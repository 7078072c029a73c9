//! Runs the four reporters over one dataset and times each of them.

use std::time::{Duration, Instant};

use bikeshare_core::error::Result;
use bikeshare_core::models::Dataset;

use crate::reporters::{
    station_stats, time_stats, trip_duration_stats, user_stats, DurationStats, StationStats,
    TimeStats, UserStats,
};

// ── Public types ──────────────────────────────────────────────────────────────

/// A reporter's output together with the wall-clock time it took.
#[derive(Debug)]
pub struct Timed<T> {
    pub value: T,
    pub elapsed: Duration,
}

impl<T> Timed<T> {
    /// Run `f`, recording how long it took.
    pub fn measure(f: impl FnOnce() -> T) -> Self {
        let start = Instant::now();
        let value = f();
        Self {
            value,
            elapsed: start.elapsed(),
        }
    }
}

/// Every statistic computed for one selection, in reporting order.
#[derive(Debug)]
pub struct AnalysisReport {
    pub time: Timed<Result<TimeStats>>,
    pub station: Timed<Result<StationStats>>,
    pub duration: Timed<Result<DurationStats>>,
    pub user: Timed<UserStats>,
    /// Trips the statistics were computed over.
    pub trips: usize,
    /// Rows in the source file before filtering.
    pub source_rows: usize,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run Time → Station → Duration → User over `dataset`.
///
/// A reporter that cannot produce a value (e.g. on an empty selection)
/// records its error; the remaining reporters still run.
pub fn analyze(dataset: &Dataset) -> AnalysisReport {
    let time = Timed::measure(|| time_stats(dataset));
    let station = Timed::measure(|| station_stats(dataset));
    let duration = Timed::measure(|| trip_duration_stats(dataset));
    let user = Timed::measure(|| user_stats(dataset));

    AnalysisReport {
        time,
        station,
        duration,
        user,
        trips: dataset.len(),
        source_rows: dataset.source_rows,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
