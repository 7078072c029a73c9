use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

use crate::filters::Selection;

// ── Column names ──────────────────────────────────────────────────────────────

pub const START_TIME: &str = "Start Time";
pub const END_TIME: &str = "End Time";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

/// Columns every city file must provide.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    START_TIME,
    END_TIME,
    TRIP_DURATION,
    START_STATION,
    END_STATION,
    USER_TYPE,
];

/// Columns only some city files provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionalColumn {
    Gender,
    BirthYear,
}

impl OptionalColumn {
    /// Header name as it appears in the CSV file.
    pub fn header(self) -> &'static str {
        match self {
            OptionalColumn::Gender => GENDER,
            OptionalColumn::BirthYear => BIRTH_YEAR,
        }
    }
}

// ── TripRecord ────────────────────────────────────────────────────────────────

/// A single bike trip with its derived time fields.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    /// 0-based position of the row in the source file.
    pub row_index: usize,
    /// Local wall-clock time the trip started.
    pub start_time: NaiveDateTime,
    /// Local wall-clock time the trip ended.
    pub end_time: NaiveDateTime,
    /// Trip length in seconds.
    pub trip_duration: f64,
    pub start_station: String,
    pub end_station: String,
    /// Subscriber / Customer / Dependent; `None` when the cell is blank.
    pub user_type: Option<String>,
    /// `None` when the cell is blank or the column is absent.
    pub gender: Option<String>,
    /// `None` when the cell is blank or the column is absent.
    pub birth_year: Option<i32>,
    /// Month of `start_time` (1–12).
    pub month: u32,
    /// Weekday of `start_time`.
    pub day_of_week: Weekday,
    /// Hour of `start_time` (0–23).
    pub hour: u32,
}

impl TripRecord {
    /// Build a record, deriving month, weekday and hour from `start_time`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        row_index: usize,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        trip_duration: f64,
        start_station: String,
        end_station: String,
        user_type: Option<String>,
        gender: Option<String>,
        birth_year: Option<i32>,
    ) -> Self {
        Self {
            row_index,
            month: start_time.month(),
            day_of_week: start_time.weekday(),
            hour: start_time.hour(),
            start_time,
            end_time,
            trip_duration,
            start_station,
            end_station,
            user_type,
            gender,
            birth_year,
        }
    }
}

// ── Dataset ───────────────────────────────────────────────────────────────────

/// The trips of one city after month/day filtering, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Selection the dataset was loaded for.
    pub selection: Selection,
    /// Header names of the source file, in file order.
    pub columns: Vec<String>,
    /// Retained trips.
    pub records: Vec<TripRecord>,
    /// Number of data rows in the source file before filtering.
    pub source_rows: usize,
}

impl Dataset {
    /// Whether the source file carried a column named `name`.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Whether the source file carried the given optional column.
    pub fn has_optional(&self, column: OptionalColumn) -> bool {
        self.has_column(column.header())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows `[offset, offset + len)`, clipped to the dataset.
    ///
    /// Out-of-range windows yield an empty slice instead of panicking.
    pub fn window(&self, offset: usize, len: usize) -> &[TripRecord] {
        let start = offset.min(self.records.len());
        let end = offset.saturating_add(len).min(self.records.len());
        &self.records[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{City, DayFilter, MonthFilter};
    use chrono::NaiveDate;

    fn ts(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 15, 0)
            .unwrap()
    }

    fn record(idx: usize) -> TripRecord {
        TripRecord::new(
            idx,
            ts(2017, 2, 6, 9),
            ts(2017, 2, 6, 10),
            600.0,
            "A".to_string(),
            "B".to_string(),
            Some("Subscriber".to_string()),
            None,
            None,
        )
    }

    fn dataset(rows: usize, columns: &[&str]) -> Dataset {
        Dataset {
            selection: Selection::new(City::Chicago, MonthFilter::All, DayFilter::All),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            records: (0..rows).map(record).collect(),
            source_rows: rows,
        }
    }

    #[test]
    fn test_trip_record_derives_time_fields() {
        let r = record(0);
        assert_eq!(r.month, 2);
        assert_eq!(r.day_of_week, Weekday::Mon);
        assert_eq!(r.hour, 9);
    }

    #[test]
    fn test_has_optional_column() {
        let with = dataset(1, &[START_TIME, GENDER, BIRTH_YEAR]);
        assert!(with.has_optional(OptionalColumn::Gender));
        assert!(with.has_optional(OptionalColumn::BirthYear));

        let without = dataset(1, &REQUIRED_COLUMNS);
        assert!(!without.has_optional(OptionalColumn::Gender));
        assert!(!without.has_optional(OptionalColumn::BirthYear));
    }

    #[test]
    fn test_window_clips_to_end() {
        let ds = dataset(7, &REQUIRED_COLUMNS);
        assert_eq!(ds.window(0, 5).len(), 5);
        assert_eq!(ds.window(5, 5).len(), 2);
        assert_eq!(ds.window(5, 5)[0].row_index, 5);
        assert!(ds.window(10, 5).is_empty());
        assert!(ds.window(usize::MAX, 5).is_empty());
    }
}
