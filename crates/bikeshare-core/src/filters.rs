//! Fixed selector vocabularies and the typed filter selection.
//!
//! The permitted month set deliberately lacks `"may"` and the day set covers
//! Monday to Friday only. Month numbers are resolved against
//! [`MONTH_NUMBERING`], which does include May, so a `Month(5)` filter can be
//! built programmatically even though no user token maps to it.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;

use crate::error::{BikeshareError, Result};

// ── Vocabularies ──────────────────────────────────────────────────────────────

/// Token accepted by the month and day selectors to disable that filter.
pub const ALL_TOKEN: &str = "all";

/// City token → CSV file name.
pub const CITY_DATA: [(&str, &str); 3] = [
    ("chicago", "chicago.csv"),
    ("new york city", "new_york_city.csv"),
    ("washington", "washington.csv"),
];

/// City tokens accepted from the user.
pub const CITY_CHOICES: [&str; 3] = [CITY_DATA[0].0, CITY_DATA[1].0, CITY_DATA[2].0];

/// Month tokens accepted from the user.
pub const MONTH_CHOICES: [&str; 6] = ["january", "february", "march", "april", "june", ALL_TOKEN];

/// Ordered list used to turn a month token into its 1-based month number.
pub const MONTH_NUMBERING: [&str; 6] = ["january", "february", "march", "april", "may", "june"];

/// Day tokens accepted from the user.
pub const DAY_CHOICES: [&str; 6] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    ALL_TOKEN,
];

// ── City ──────────────────────────────────────────────────────────────────────

/// One of the cities a data file exists for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    /// Every supported city, in menu order.
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lower-case token as typed by the user.
    pub fn token(self) -> &'static str {
        CITY_DATA[self.position()].0
    }

    /// Name of the CSV file holding this city's trips.
    pub fn file_name(self) -> &'static str {
        CITY_DATA[self.position()].1
    }

    fn position(self) -> usize {
        match self {
            City::Chicago => 0,
            City::NewYorkCity => 1,
            City::Washington => 2,
        }
    }
}

impl FromStr for City {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim().to_lowercase();
        City::ALL
            .into_iter()
            .find(|city| city.token() == token)
            .ok_or(BikeshareError::InvalidSelection {
                kind: "city",
                value: token,
            })
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

// ── MonthFilter ───────────────────────────────────────────────────────────────

/// Restriction on the month a trip started in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    All,
    /// 1-based month number.
    Month(u32),
}

impl MonthFilter {
    /// Whether a trip that started in `month` passes this filter.
    pub fn matches(self, month: u32) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Month(wanted) => wanted == month,
        }
    }
}

/// 1-based position of `name` within [`MONTH_NUMBERING`].
pub fn month_number(name: &str) -> Option<u32> {
    MONTH_NUMBERING
        .iter()
        .position(|m| *m == name)
        .map(|idx| idx as u32 + 1)
}

impl FromStr for MonthFilter {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim().to_lowercase();
        if !MONTH_CHOICES.contains(&token.as_str()) {
            return Err(BikeshareError::InvalidSelection {
                kind: "month",
                value: token,
            });
        }
        if token == ALL_TOKEN {
            return Ok(MonthFilter::All);
        }
        month_number(&token)
            .map(MonthFilter::Month)
            .ok_or(BikeshareError::InvalidSelection {
                kind: "month",
                value: token,
            })
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str(ALL_TOKEN),
            MonthFilter::Month(n) => match (*n as usize)
                .checked_sub(1)
                .and_then(|idx| MONTH_NUMBERING.get(idx))
            {
                Some(name) => f.write_str(name),
                None => write!(f, "month {}", n),
            },
        }
    }
}

// ── DayFilter ─────────────────────────────────────────────────────────────────

/// Restriction on the weekday a trip started on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayFilter {
    All,
    Day(Weekday),
}

impl DayFilter {
    /// Whether a trip that started on `weekday` passes this filter.
    pub fn matches(self, weekday: Weekday) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Day(wanted) => wanted == weekday,
        }
    }
}

impl FromStr for DayFilter {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim().to_lowercase();
        if !DAY_CHOICES.contains(&token.as_str()) {
            return Err(BikeshareError::InvalidSelection {
                kind: "day",
                value: token,
            });
        }
        if token == ALL_TOKEN {
            return Ok(DayFilter::All);
        }
        // Weekday names are compared in their capitalised form ("Monday").
        let title = crate::time_utils::capitalize(&token);
        crate::time_utils::weekday_from_name(&title)
            .map(DayFilter::Day)
            .ok_or(BikeshareError::InvalidSelection {
                kind: "day",
                value: token,
            })
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::All => f.write_str(ALL_TOKEN),
            DayFilter::Day(day) => f.write_str(crate::time_utils::weekday_name(*day)),
        }
    }
}

// ── Selection ─────────────────────────────────────────────────────────────────

/// A validated `(city, month, day)` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl Selection {
    pub fn new(city: City, month: MonthFilter, day: DayFilter) -> Self {
        Self { city, month, day }
    }

    /// Parse three raw tokens, validating each against its vocabulary.
    pub fn parse(city: &str, month: &str, day: &str) -> Result<Self> {
        Ok(Self {
            city: city.parse()?,
            month: month.parse()?,
            day: day.parse()?,
        })
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "city={}, month={}, day={}", self.city, self.month, self.day)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
