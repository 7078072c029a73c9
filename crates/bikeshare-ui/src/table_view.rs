//! Aligned plain-text table of raw trip rows.
//!
//! Columns follow the source file, with Gender and Birth Year only when the
//! file carried them, then the derived month / day_of_week / hour fields.

use bikeshare_core::formatting::format_number;
use bikeshare_core::models::{
    Dataset, OptionalColumn, TripRecord, END_STATION, END_TIME, START_STATION, START_TIME,
    TRIP_DURATION, USER_TYPE,
};
use bikeshare_core::time_utils::weekday_name;
use unicode_width::UnicodeWidthStr;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const COLUMN_GAP: &str = "  ";
/// Shown for blank cells.
const MISSING: &str = "NaN";

/// Column headers for `dataset`, in display order. The first is the row index.
pub fn table_headers(dataset: &Dataset) -> Vec<&'static str> {
    let mut headers = vec![
        "",
        START_TIME,
        END_TIME,
        TRIP_DURATION,
        START_STATION,
        END_STATION,
        USER_TYPE,
    ];
    for column in [OptionalColumn::Gender, OptionalColumn::BirthYear] {
        if dataset.has_optional(column) {
            headers.push(column.header());
        }
    }
    headers.extend(["month", "day_of_week", "hour"]);
    headers
}

fn row_cells(record: &TripRecord, gender: bool, birth_year: bool) -> Vec<String> {
    let mut cells = vec![
        record.row_index.to_string(),
        record.start_time.format(TIMESTAMP_FORMAT).to_string(),
        record.end_time.format(TIMESTAMP_FORMAT).to_string(),
        format_number(record.trip_duration, 1),
        record.start_station.clone(),
        record.end_station.clone(),
        or_missing(record.user_type.as_deref()),
    ];
    if gender {
        cells.push(or_missing(record.gender.as_deref()));
    }
    if birth_year {
        cells.push(
            record
                .birth_year
                .map(|y| format!("{}.0", y))
                .unwrap_or_else(|| MISSING.to_string()),
        );
    }
    cells.push(record.month.to_string());
    cells.push(weekday_name(record.day_of_week).to_string());
    cells.push(record.hour.to_string());
    cells
}

fn or_missing(value: Option<&str>) -> String {
    value.unwrap_or(MISSING).to_string()
}

/// Render `rows` of `dataset` as a header line followed by one line per row.
///
/// Every column is padded to its widest cell, measured in display columns.
pub fn render_rows(dataset: &Dataset, rows: &[TripRecord]) -> Vec<String> {
    let headers = table_headers(dataset);
    let gender = dataset.has_optional(OptionalColumn::Gender);
    let birth_year = dataset.has_optional(OptionalColumn::BirthYear);

    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|r| row_cells(r, gender, birth_year))
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for cells in &body {
        for (idx, cell) in cells.iter().enumerate() {
            widths[idx] = widths[idx].max(cell.width());
        }
    }

    let mut lines = Vec::with_capacity(body.len() + 1);
    lines.push(join_padded(headers.iter().copied(), &widths));
    for cells in &body {
        lines.push(join_padded(cells.iter().map(String::as_str), &widths));
    }
    lines
}

fn join_padded<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &width)| {
            let fill = width.saturating_sub(cell.width());
            format!("{}{}", cell, " ".repeat(fill))
        })
        .collect();
    padded.join(COLUMN_GAP).trim_end().to_string()
}

// ── Tests ──────────────────────────────────────────────────────────────────────
