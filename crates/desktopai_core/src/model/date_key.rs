//! Canonical date identity and month arithmetic.
//!
//! # Responsibility
//! - Convert calendar dates into an orderable key and the ISO wire form.
//! - Provide `(year, month)` arithmetic for calendar navigation.
//!
//! # Invariants
//! - Date identity ignores time of day entirely.
//! - ISO wire form is always zero-padded `YYYY-MM-DD` from local calendar
//!   fields, never a timestamp.
//! - A `YearMonth` is always anchored on day 1 of a representable month.

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// `strftime` pattern of the ISO calendar-date wire form.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse errors for ISO date and month input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateKeyError {
    /// Input is not a canonical `YYYY-MM-DD` date.
    InvalidDate(String),
    /// Input is not a canonical `YYYY-MM` month.
    InvalidMonth(String),
}

impl Display for DateKeyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(value) => {
                write!(f, "invalid date `{value}`; expected YYYY-MM-DD")
            }
            Self::InvalidMonth(value) => write!(f, "invalid month `{value}`; expected YYYY-MM"),
        }
    }
}

impl Error for DateKeyError {}

/// Orderable identity of one calendar date.
///
/// Two keys are equal iff year, month and day all match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Builds a key from a calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Builds a key from a local date-time, dropping the time of day.
    pub fn from_datetime(value: NaiveDateTime) -> Self {
        Self(value.date())
    }

    /// Parses the canonical ISO form.
    ///
    /// # Errors
    /// - Returns `InvalidDate` for non-padded, out-of-range or malformed input.
    pub fn parse_iso(value: &str) -> Result<Self, DateKeyError> {
        let trimmed = value.trim();
        let date = NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT)
            .map_err(|_| DateKeyError::InvalidDate(trimmed.to_string()))?;
        let key = Self(date);
        // chrono accepts unpadded fields; the wire form does not.
        if key.to_iso() != trimmed {
            return Err(DateKeyError::InvalidDate(trimmed.to_string()));
        }
        Ok(key)
    }

    /// Returns the calendar date behind this key.
    pub fn date(self) -> NaiveDate {
        self.0
    }

    /// Renders the zero-padded ISO wire form.
    pub fn to_iso(self) -> String {
        self.0.format(ISO_DATE_FORMAT).to_string()
    }
}

impl From<NaiveDate> for DateKey {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl From<DateKey> for NaiveDate {
    fn from(value: DateKey) -> Self {
        value.0
    }
}

impl Display for DateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(ISO_DATE_FORMAT))
    }
}

/// Weekday that occupies grid column 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    /// Column index of `weekday` in a grid starting at this day.
    pub fn index_of(self, weekday: Weekday) -> u32 {
        match self {
            Self::Sunday => weekday.num_days_from_sunday(),
            Self::Monday => weekday.num_days_from_monday(),
        }
    }

    /// Short weekday labels in column order.
    pub fn labels(self) -> [&'static str; 7] {
        match self {
            Self::Sunday => ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"],
            Self::Monday => ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sunday => "sunday",
            Self::Monday => "monday",
        }
    }
}

/// A `(year, month)` pair, independent of any day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    first: NaiveDate,
}

impl YearMonth {
    /// Builds a month from year and 1-based month number.
    ///
    /// Returns `None` when the month is outside `1..=12` or the year is not
    /// representable.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    /// Returns the month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    /// Parses the canonical `YYYY-MM` form.
    pub fn parse(value: &str) -> Result<Self, DateKeyError> {
        let trimmed = value.trim();
        let key = DateKey::parse_iso(&format!("{trimmed}-01"))
            .map_err(|_| DateKeyError::InvalidMonth(trimmed.to_string()))?;
        Ok(Self::of(key.date()))
    }

    pub fn year(self) -> i32 {
        self.first.year()
    }

    /// 1-based month number.
    pub fn month(self) -> u32 {
        self.first.month()
    }

    /// Moves by `delta` months, rolling over year boundaries.
    ///
    /// Stays put when the target month is not representable.
    pub fn shift(self, delta: i32) -> Self {
        let magnitude = Months::new(delta.unsigned_abs());
        let shifted = if delta >= 0 {
            self.first.checked_add_months(magnitude)
        } else {
            self.first.checked_sub_months(magnitude)
        };
        shifted.map_or(self, |first| Self { first })
    }

    pub fn days_in_month(self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    /// Number of placeholder cells before day 1 in a grid.
    pub fn leading_empty(self, week_start: WeekStart) -> u32 {
        week_start.index_of(self.first.weekday())
    }

    /// Date of `day` within this month, if the day exists.
    pub fn date_of(self, day: u32) -> Option<NaiveDate> {
        if day == 0 || day > self.days_in_month() {
            return None;
        }
        self.first.checked_add_days(Days::new(u64::from(day - 1)))
    }

    /// Header title such as `October 2026`.
    pub fn title(self) -> String {
        self.first.format("%B %Y").to_string()
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.first.format("%Y-%m"))
    }
}

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Day count of a 1-based month; zero for an invalid month number.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}
