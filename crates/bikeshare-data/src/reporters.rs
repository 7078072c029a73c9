//! The four statistics passes over a filtered [`Dataset`].
//!
//! Every function borrows the dataset immutably, so all four can run over
//! the same selection before the rows are paged through.

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::models::{Dataset, OptionalColumn};
use chrono::Weekday;

use crate::aggregator::{mode, value_counts, FrequencyTable};

/// Joins start and end station names into a trip label.
pub const PAIR_SEPARATOR: &str = " / ";

// ── Result types ──────────────────────────────────────────────────────────────

/// Most frequent times of travel.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeStats {
    /// Month number (1–12).
    pub most_common_month: u32,
    pub most_common_day: Weekday,
    /// Hour of day (0–23).
    pub most_common_hour: u32,
}

/// Most popular stations and trip.
#[derive(Debug, Clone, PartialEq)]
pub struct StationStats {
    pub most_common_start: String,
    pub most_common_end: String,
    /// `"<start> / <end>"`.
    pub most_common_trip: String,
}

/// Total and mean trip duration, in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationStats {
    pub total_seconds: f64,
    pub mean_seconds: f64,
    pub trips: usize,
}

/// Outcome of a statistic that depends on an optional column.
#[derive(Debug, Clone, PartialEq)]
pub enum Availability<T> {
    /// The column exists and holds values for this selection.
    Present(T),
    /// The column exists but every selected row leaves it blank.
    NoValues,
    /// The source file has no such column.
    Absent,
}

impl<T> Availability<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Availability::Present(_))
    }
}

/// Earliest, most recent and most common year of birth.
#[derive(Debug, Clone, PartialEq)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: i32,
}

/// Rider demographics.
#[derive(Debug, Clone, PartialEq)]
pub struct UserStats {
    /// Count per user type, most frequent first. Blank cells are not counted.
    pub user_types: Vec<(String, usize)>,
    pub genders: Availability<Vec<(String, usize)>>,
    pub birth_years: Availability<BirthYearStats>,
}

// ── Reporters ─────────────────────────────────────────────────────────────────

/// Most common month, weekday and start hour.
///
/// Fails with [`BikeshareError::EmptyDataset`] when no trips are selected.
pub fn time_stats(dataset: &Dataset) -> Result<TimeStats> {
    let records = &dataset.records;
    Ok(TimeStats {
        most_common_month: mode(records.iter().map(|r| r.month))
            .ok_or(BikeshareError::EmptyDataset)?,
        most_common_day: mode(records.iter().map(|r| r.day_of_week))
            .ok_or(BikeshareError::EmptyDataset)?,
        most_common_hour: mode(records.iter().map(|r| r.hour))
            .ok_or(BikeshareError::EmptyDataset)?,
    })
}

/// Most common start station, end station and start/end combination.
///
/// Fails with [`BikeshareError::EmptyDataset`] when no trips are selected.
pub fn station_stats(dataset: &Dataset) -> Result<StationStats> {
    let records = &dataset.records;
    Ok(StationStats {
        most_common_start: mode(records.iter().map(|r| r.start_station.as_str()))
            .ok_or(BikeshareError::EmptyDataset)?
            .to_string(),
        most_common_end: mode(records.iter().map(|r| r.end_station.as_str()))
            .ok_or(BikeshareError::EmptyDataset)?
            .to_string(),
        most_common_trip: mode(
            records
                .iter()
                .map(|r| station_pair(&r.start_station, &r.end_station)),
        )
        .ok_or(BikeshareError::EmptyDataset)?,
    })
}

/// Label for a trip from `start` to `end`. Order matters.
pub fn station_pair(start: &str, end: &str) -> String {
    format!("{}{}{}", start, PAIR_SEPARATOR, end)
}

/// Sum and arithmetic mean of trip duration.
///
/// Fails with [`BikeshareError::EmptyDataset`] when no trips are selected,
/// since the mean is undefined.
pub fn trip_duration_stats(dataset: &Dataset) -> Result<DurationStats> {
    if dataset.is_empty() {
        return Err(BikeshareError::EmptyDataset);
    }
    let total_seconds: f64 = dataset.records.iter().map(|r| r.trip_duration).sum();
    let trips = dataset.len();
    Ok(DurationStats {
        total_seconds,
        mean_seconds: total_seconds / trips as f64,
        trips,
    })
}

/// User type, gender and birth-year breakdowns.
///
/// Gender and birth year are looked up by column presence, so a file without
/// those columns yields [`Availability::Absent`] whatever the city.
pub fn user_stats(dataset: &Dataset) -> UserStats {
    let records = &dataset.records;

    let user_types = value_counts(records.iter().filter_map(|r| r.user_type.clone()));

    let genders = if dataset.has_optional(OptionalColumn::Gender) {
        let counts = value_counts(records.iter().filter_map(|r| r.gender.clone()));
        if counts.is_empty() {
            Availability::NoValues
        } else {
            Availability::Present(counts)
        }
    } else {
        Availability::Absent
    };

    let birth_years = if dataset.has_optional(OptionalColumn::BirthYear) {
        birth_year_stats(records.iter().filter_map(|r| r.birth_year))
            .map_or(Availability::NoValues, Availability::Present)
    } else {
        Availability::Absent
    };

    UserStats {
        user_types,
        genders,
        birth_years,
    }
}

fn birth_year_stats<I: Iterator<Item = i32> + Clone>(years: I) -> Option<BirthYearStats> {
    let earliest = years.clone().min()?;
    let most_recent = years.clone().max()?;
    let most_common = FrequencyTable::from_values(years).mode()?;
    Some(BirthYearStats {
        earliest,
        most_recent,
        most_common,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
