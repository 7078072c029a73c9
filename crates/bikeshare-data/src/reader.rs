//! City CSV loading and month/day filtering.
//!
//! Reads one city file into [`TripRecord`]s, derives the month, weekday and
//! hour of each trip from its start time and keeps only the rows that match
//! the [`Selection`].

use std::path::Path;

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::filters::Selection;
use bikeshare_core::models::{Dataset, TripRecord, REQUIRED_COLUMNS};
use bikeshare_core::time_utils::parse_timestamp;
use serde::Deserialize;
use tracing::debug;

// ── Raw row ───────────────────────────────────────────────────────────────────

/// One CSV row as written in the city files. Columns not listed here
/// (such as the unnamed leading index column) are ignored.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time")]
    end_time: String,
    #[serde(rename = "Trip Duration")]
    trip_duration: f64,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    // Stored as a float ("1989.0") in the files that have it.
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<f64>,
}

impl RawTrip {
    fn into_record(self, row_index: usize) -> Result<TripRecord> {
        let start_time =
            parse_timestamp(&self.start_time).ok_or_else(|| BikeshareError::TimestampParse {
                row: row_index,
                value: self.start_time.clone(),
            })?;
        let end_time =
            parse_timestamp(&self.end_time).ok_or_else(|| BikeshareError::TimestampParse {
                row: row_index,
                value: self.end_time.clone(),
            })?;

        Ok(TripRecord::new(
            row_index,
            start_time,
            end_time,
            self.trip_duration,
            self.start_station,
            self.end_station,
            self.user_type.filter(|s| !s.is_empty()),
            self.gender.filter(|s| !s.is_empty()),
            self.birth_year
                .filter(|y| y.is_finite())
                .map(|y| y.round() as i32),
        ))
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the file for `selection.city` from `data_dir` and apply the
/// month/day filters.
pub fn load_dataset(data_dir: &Path, selection: Selection) -> Result<Dataset> {
    let path = data_dir.join(selection.city.file_name());
    load_city_file(&path, selection)
}

/// Load an explicit CSV file and filter it by `selection`.
///
/// Fails with [`BikeshareError::FileRead`] when the file cannot be opened,
/// [`BikeshareError::MissingColumn`] when a required header is absent,
/// [`BikeshareError::CsvParse`] when a row cannot be decoded and
/// [`BikeshareError::TimestampParse`] on the first unparseable time. No row
/// is skipped silently.
pub fn load_city_file(path: &Path, selection: Selection) -> Result<Dataset> {
    let file = std::fs::File::open(path).map_err(|source| BikeshareError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(std::io::BufReader::new(file));

    let columns: Vec<String> = reader
        .headers()
        .map_err(|source| BikeshareError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?
        .iter()
        .map(str::to_string)
        .collect();

    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|required| !columns.iter().any(|c| c == *required))
    {
        return Err(BikeshareError::MissingColumn {
            path: path.to_path_buf(),
            column: missing.to_string(),
        });
    }

    let mut records: Vec<TripRecord> = Vec::new();
    let mut source_rows = 0usize;

    for (row_index, row) in reader.deserialize::<RawTrip>().enumerate() {
        let raw = row.map_err(|source| BikeshareError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        records.push(raw.into_record(row_index)?);
        source_rows += 1;
    }

    let records = apply_filters(records, &selection);

    debug!(
        "File {}: {} rows read, {} kept for {}",
        path.display(),
        source_rows,
        records.len(),
        selection
    );

    Ok(Dataset {
        selection,
        columns,
        records,
        source_rows,
    })
}

/// Keep the records whose derived month and weekday pass the selection's
/// filters, preserving order.
pub fn apply_filters(records: Vec<TripRecord>, selection: &Selection) -> Vec<TripRecord> {
    records
        .into_iter()
        .filter(|r| selection.month.matches(r.month) && selection.day.matches(r.day_of_week))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_core::filters::{
        month_number, City, DayFilter, MonthFilter, ALL_TOKEN, DAY_CHOICES, MONTH_CHOICES,
    };
    use bikeshare_core::models::OptionalColumn;
    use bikeshare_core::time_utils::{capitalize, weekday_name};
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    // ── Helpers ───────────────────────────────────────────────────────────────

    const CHICAGO_HEADER: &str =
        ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year";
    const WASHINGTON_HEADER: &str =
        ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type";

    fn write_csv(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    /// Chicago-shaped rows spread over several months and weekdays.
    fn chicago_rows() -> Vec<&'static str> {
        vec![
            CHICAGO_HEADER,
            // Friday
            "1423854,2017-06-23 15:09:32,2017-06-23 15:14:53,321,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0",
            // Monday
            "955915,2017-05-29 18:36:56,2017-05-29 18:50:42,826,Theater on the Lake,Sheffield Ave & Waveland Ave,Subscriber,Female,1992.0",
            // Wednesday
            "9031,2017-01-11 07:57:39,2017-01-11 08:05:11,452,Leavitt Ave & Belmont Ave,Clark St & Schiller St,Subscriber,,",
            // Monday
            "304487,2017-03-13 17:01:04,2017-03-13 17:17:00,956,Theater on the Lake,Wood St & Hubbard St,Customer,,",
            // Friday
            "45207,2017-01-06 08:12:10,2017-01-06 08:20:55,525,Clark St & Schiller St,Theater on the Lake,Subscriber,Male,1987.0",
            // Monday
            "1473887,2017-06-26 09:01:20,2017-06-26 09:11:06,586,Wood St & Hubbard St,Theater on the Lake,Dependent,Male,1983.0",
        ]
    }

    fn washington_rows() -> Vec<&'static str> {
        vec![
            WASHINGTON_HEADER,
            "1621326,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber",
            "482740,2017-03-11 10:40:00,2017-03-11 10:46:00,402.549,Yuma St & Tenley Circle NW,Connecticut Ave & Yuma St NW,Subscriber",
            "1330280,2017-05-30 01:02:59,2017-05-30 01:13:37,637.251,17th St & Massachusetts Ave NW,5th & K St NW,Customer",
        ]
    }

    fn all_selection(city: City) -> Selection {
        Selection::new(city, MonthFilter::All, DayFilter::All)
    }

    // ── load_city_file ────────────────────────────────────────────────────────

    #[test]
    fn test_load_all_returns_every_row() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "chicago.csv", &chicago_rows());

        let ds = load_city_file(&path, all_selection(City::Chicago)).unwrap();
        assert_eq!(ds.len(), 6);
        assert_eq!(ds.source_rows, 6);
        let indices: Vec<usize> = ds.records.iter().map(|r| r.row_index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_load_parses_fields_and_derives_time_columns() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "chicago.csv", &chicago_rows());

        let ds = load_city_file(&path, all_selection(City::Chicago)).unwrap();
        let first = &ds.records[0];
        assert_eq!(first.start_station, "Wood St & Hubbard St");
        assert_eq!(first.end_station, "Damen Ave & Chicago Ave");
        assert!((first.trip_duration - 321.0).abs() < 1e-9);
        assert_eq!(first.user_type.as_deref(), Some("Subscriber"));
        assert_eq!(first.gender.as_deref(), Some("Male"));
        assert_eq!(first.birth_year, Some(1992));
        assert_eq!(first.month, 6);
        assert_eq!(weekday_name(first.day_of_week), "Friday");
        assert_eq!(first.hour, 15);
    }

    #[test]
    fn test_load_blank_optional_cells_are_none() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "chicago.csv", &chicago_rows());

        let ds = load_city_file(&path, all_selection(City::Chicago)).unwrap();
        assert!(ds.records[2].gender.is_none());
        assert!(ds.records[2].birth_year.is_none());
    }

    #[test]
    fn test_load_records_column_presence() {
        let dir = TempDir::new().unwrap();
        let chicago = write_csv(dir.path(), "chicago.csv", &chicago_rows());
        let washington = write_csv(dir.path(), "washington.csv", &washington_rows());

        let ds = load_city_file(&chicago, all_selection(City::Chicago)).unwrap();
        assert!(ds.has_optional(OptionalColumn::Gender));
        assert!(ds.has_optional(OptionalColumn::BirthYear));

        let ds = load_city_file(&washington, all_selection(City::Washington)).unwrap();
        assert!(!ds.has_optional(OptionalColumn::Gender));
        assert!(!ds.has_optional(OptionalColumn::BirthYear));
        assert!(ds.records.iter().all(|r| r.gender.is_none() && r.birth_year.is_none()));
    }

    #[test]
    fn test_load_fractional_durations() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "washington.csv", &washington_rows());

        let ds = load_city_file(&path, all_selection(City::Washington)).unwrap();
        assert!((ds.records[0].trip_duration - 489.066).abs() < 1e-9);
    }

    #[test]
    fn test_load_month_filter_matches_numbering() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "chicago.csv", &chicago_rows());

        for token in MONTH_CHOICES.iter().filter(|m| **m != ALL_TOKEN) {
            let month: MonthFilter = token.parse().unwrap();
            let ds = load_city_file(&path, Selection::new(City::Chicago, month, DayFilter::All))
                .unwrap();
            let expected = month_number(token).unwrap();
            assert!(ds.records.iter().all(|r| r.month == expected), "month {}", token);
        }

        let june = load_city_file(
            &path,
            Selection::new(City::Chicago, MonthFilter::Month(6), DayFilter::All),
        )
        .unwrap();
        assert_eq!(june.len(), 2);
    }

    #[test]
    fn test_load_may_filter_reachable_programmatically() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "chicago.csv", &chicago_rows());

        let ds = load_city_file(
            &path,
            Selection::new(City::Chicago, MonthFilter::Month(5), DayFilter::All),
        )
        .unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].start_station, "Theater on the Lake");
    }

    #[test]
    fn test_load_day_filter_matches_capitalised_name() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "chicago.csv", &chicago_rows());

        for token in DAY_CHOICES.iter().filter(|d| **d != ALL_TOKEN) {
            let day: DayFilter = token.parse().unwrap();
            let ds = load_city_file(&path, Selection::new(City::Chicago, MonthFilter::All, day))
                .unwrap();
            let expected = capitalize(token);
            assert!(ds.records.iter().all(|r| weekday_name(r.day_of_week) == expected));
        }

        let monday: DayFilter = "monday".parse().unwrap();
        let ds =
            load_city_file(&path, Selection::new(City::Chicago, MonthFilter::All, monday)).unwrap();
        let indices: Vec<usize> = ds.records.iter().map(|r| r.row_index).collect();
        assert_eq!(indices, vec![1, 3, 5]);
    }

    #[test]
    fn test_load_month_and_day_combined() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "chicago.csv", &chicago_rows());

        let sel = Selection::parse("chicago", "june", "monday").unwrap();
        let ds = load_city_file(&path, sel).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].row_index, 5);
        assert_eq!(ds.source_rows, 6);
    }

    #[test]
    fn test_load_filter_can_yield_empty_dataset() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "washington.csv", &washington_rows());

        let sel = Selection::parse("washington", "february", "all").unwrap();
        let ds = load_city_file(&path, sel).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.source_rows, 3);
    }

    #[test]
    fn test_load_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "chicago.csv", &chicago_rows());
        let sel = Selection::parse("chicago", "all", "monday").unwrap();

        let first = load_city_file(&path, sel).unwrap();
        let second = load_city_file(&path, sel).unwrap();
        assert_eq!(first, second);
    }

    // ── Failures ──────────────────────────────────────────────────────────────

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_dataset(dir.path(), all_selection(City::Chicago)).unwrap_err();
        match err {
            BikeshareError::FileRead { path, source } => {
                assert!(path.ends_with("chicago.csv"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_missing_required_column() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "chicago.csv",
            &[
                "Start Time,End Time,Trip Duration,Start Station,End Station",
                "2017-01-01 00:07:57,2017-01-01 00:20:53,776,A,B",
            ],
        );
        let err = load_city_file(&path, all_selection(City::Chicago)).unwrap_err();
        assert!(
            matches!(err, BikeshareError::MissingColumn { ref column, .. } if column == "User Type"),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn test_load_bad_timestamp_is_strict() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "washington.csv",
            &[
                WASHINGTON_HEADER,
                "1,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,A,B,Subscriber",
                "2,sometime in june,2017-06-21 08:44:43,489.066,A,B,Subscriber",
            ],
        );
        let err = load_city_file(&path, all_selection(City::Washington)).unwrap_err();
        match err {
            BikeshareError::TimestampParse { row, value } => {
                assert_eq!(row, 1);
                assert_eq!(value, "sometime in june");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_non_numeric_duration_is_csv_error() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "washington.csv",
            &[
                WASHINGTON_HEADER,
                "1,2017-06-21 08:36:34,2017-06-21 08:44:43,long,A,B,Subscriber",
            ],
        );
        let err = load_city_file(&path, all_selection(City::Washington)).unwrap_err();
        assert!(matches!(err, BikeshareError::CsvParse { .. }), "unexpected error: {err:?}");
    }

    // ── load_dataset ──────────────────────────────────────────────────────────

    #[test]
    fn test_load_dataset_resolves_city_file() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "new_york_city.csv", &chicago_rows());

        let ds = load_dataset(dir.path(), all_selection(City::NewYorkCity)).unwrap();
        assert_eq!(ds.selection.city, City::NewYorkCity);
        assert_eq!(ds.len(), 6);
    }
}
