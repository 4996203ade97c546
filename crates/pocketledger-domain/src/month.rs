//! Calendar year-month value used as the reference period for budget reports.

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
/// Identifies one calendar month without a day component.
pub struct MonthRef {
    pub year: i32,
    pub month: u32,
}

impl MonthRef {
    pub fn new(year: i32, month: u32) -> Result<Self, MonthParseError> {
        if !(1..=12).contains(&month) {
            return Err(MonthParseError::OutOfRange);
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns `true` when `date` falls inside this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for MonthRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthRef {
    type Err = MonthParseError;

    /// Parses the `YYYY-MM` form used for persisted month keys.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let (year, month) = text.split_once('-').ok_or(MonthParseError::Malformed)?;
        let year: i32 = year.parse().map_err(|_| MonthParseError::Malformed)?;
        let month: u32 = month.parse().map_err(|_| MonthParseError::Malformed)?;
        Self::new(year, month)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Errors that can occur when constructing [`MonthRef`] values.
pub enum MonthParseError {
    Malformed,
    OutOfRange,
}

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthParseError::Malformed => f.write_str("expected YYYY-MM"),
            MonthParseError::OutOfRange => f.write_str("month must be between 1 and 12"),
        }
    }
}

impl std::error::Error for MonthParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_matches_only_same_month() {
        let march = MonthRef::new(2024, 3).unwrap();
        assert!(march.contains(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
        assert!(march.contains(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()));
        assert!(!march.contains(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
        assert!(!march.contains(NaiveDate::from_ymd_opt(2023, 3, 15).unwrap()));
    }

    #[test]
    fn parses_and_displays_year_month_form() {
        let parsed: MonthRef = "2024-03".parse().unwrap();
        assert_eq!(parsed, MonthRef::new(2024, 3).unwrap());
        assert_eq!(parsed.to_string(), "2024-03");
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!("2024".parse::<MonthRef>(), Err(MonthParseError::Malformed));
        assert_eq!(
            "2024-13".parse::<MonthRef>(),
            Err(MonthParseError::OutOfRange)
        );
        assert_eq!("03-2024x".parse::<MonthRef>(), Err(MonthParseError::Malformed));
    }
}
