//! Plain-text rendering of an [`AnalysisReport`].
//!
//! Each section opens with a "Calculating ..." banner, lists its statistics,
//! states how long the computation took and closes with a dashed rule.

use std::time::Duration;

use bikeshare_core::error::Result;
use bikeshare_core::filters::City;
use bikeshare_core::formatting::{
    format_count, format_duration, format_elapsed, format_number, percentage, section_rule,
};
use bikeshare_core::time_utils::weekday_name;
use bikeshare_data::analysis::{AnalysisReport, Timed};
use bikeshare_data::reporters::{
    Availability, BirthYearStats, DurationStats, StationStats, TimeStats, UserStats,
};

/// Render every section of `report`, in reporting order.
pub fn render_report(report: &AnalysisReport, city: City) -> Vec<String> {
    let mut lines = Vec::new();
    lines.extend(render_time_section(&report.time));
    lines.extend(render_station_section(&report.station));
    lines.extend(render_duration_section(&report.duration));
    lines.extend(render_user_section(&report.user, city));
    lines
}

// ── Sections ──────────────────────────────────────────────────────────────────

pub fn render_time_section(section: &Timed<Result<TimeStats>>) -> Vec<String> {
    framed(
        "Calculating The Most Frequent Times of Travel...",
        section.elapsed,
        match &section.value {
            Ok(stats) => vec![
                format!("Most common month: {}", stats.most_common_month),
                format!("Most common day of week: {}", weekday_name(stats.most_common_day)),
                format!("Most common start hour: {}", stats.most_common_hour),
            ],
            Err(e) => vec![unavailable(e)],
        },
    )
}

pub fn render_station_section(section: &Timed<Result<StationStats>>) -> Vec<String> {
    framed(
        "Calculating The Most Popular Stations and Trip...",
        section.elapsed,
        match &section.value {
            Ok(stats) => vec![
                format!("Most common start station: {}", stats.most_common_start),
                format!("Most common end station: {}", stats.most_common_end),
                format!(
                    "Most frequent combination of start and end stations: {}",
                    stats.most_common_trip
                ),
            ],
            Err(e) => vec![unavailable(e)],
        },
    )
}

pub fn render_duration_section(section: &Timed<Result<DurationStats>>) -> Vec<String> {
    framed(
        "Calculating Trip Duration...",
        section.elapsed,
        match &section.value {
            Ok(stats) => duration_lines(stats),
            Err(e) => vec![unavailable(e)],
        },
    )
}

pub fn render_user_section(section: &Timed<UserStats>, city: City) -> Vec<String> {
    let stats = &section.value;
    let mut body = Vec::new();

    body.push("Counts of user type:".to_string());
    if stats.user_types.is_empty() {
        body.push("  (none)".to_string());
    } else {
        body.extend(count_lines(&stats.user_types));
    }

    match &stats.genders {
        Availability::Present(counts) => {
            body.push("Counts of gender:".to_string());
            body.extend(count_lines(counts));
        }
        Availability::NoValues => {
            body.push("No gender values recorded for this selection.".to_string())
        }
        Availability::Absent => body.push(format!("There's no Gender data for {}.", city)),
    }

    match &stats.birth_years {
        Availability::Present(years) => body.extend(birth_year_lines(years)),
        Availability::NoValues => {
            body.push("No birth year values recorded for this selection.".to_string())
        }
        Availability::Absent => body.push(format!("There's no Birth Year data for {}.", city)),
    }

    framed("Calculating User Stats...", section.elapsed, body)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn framed(banner: &str, elapsed: Duration, body: Vec<String>) -> Vec<String> {
    let mut lines = Vec::with_capacity(body.len() + 6);
    lines.push(String::new());
    lines.push(banner.to_string());
    lines.push(String::new());
    lines.extend(body);
    lines.push(String::new());
    lines.push(format!("This took {}.", format_elapsed(elapsed)));
    lines.push(section_rule());
    lines
}

fn unavailable(err: &bikeshare_core::error::BikeshareError) -> String {
    format!("Not available: {}.", err)
}

fn duration_lines(stats: &DurationStats) -> Vec<String> {
    vec![
        format!(
            "Total travel time (seconds): {} ({})",
            format_number(stats.total_seconds, 2),
            format_duration(stats.total_seconds)
        ),
        format!(
            "Mean travel time (seconds): {} ({})",
            format_number(stats.mean_seconds, 2),
            format_duration(stats.mean_seconds)
        ),
    ]
}

fn count_lines(counts: &[(String, usize)]) -> Vec<String> {
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    counts
        .iter()
        .map(|(value, n)| {
            format!(
                "  {}: {} ({}%)",
                value,
                format_count(*n),
                percentage(*n as f64, total as f64, 1)
            )
        })
        .collect()
}

fn birth_year_lines(years: &BirthYearStats) -> Vec<String> {
    vec![
        format!("Earliest year of birth: {}", years.earliest),
        format!("Most recent year of birth: {}", years.most_recent),
        format!("Most common year of birth: {}", years.most_common),
    ]
}

// ── Tests ──────────────────────────────────────────────────────────────────────
