//! Monthly period representation
//!
//! A period is a calendar month identified by a `YYYY-MM` key. It resolves to
//! the closed interval from the first instant of the month to
//! 23:59:59.999 on its last day, in local (naive) time.

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{FinanceError, FinanceResult};

/// A calendar month, e.g. "2025-01"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Create a monthly period, validating the month number
    pub fn new(year: i32, month: u32) -> FinanceResult<Self> {
        if !(1..=12).contains(&month) || !(0..=9999).contains(&year) {
            return Err(FinanceError::InvalidPeriod(format!("{:04}-{:02}", year, month)));
        }
        Ok(Self { year, month })
    }

    /// The period containing a date
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The current month according to the local clock
    pub fn current() -> Self {
        Self::of(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First calendar day of the month
    pub fn start_date(&self) -> NaiveDate {
        // Year and month are validated on construction.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Last calendar day of the month (inclusive)
    ///
    /// Derived as the day before the first of the following month, so month
    /// lengths and leap years come out of the calendar rather than a table.
    pub fn end_date(&self) -> NaiveDate {
        self.next().start_date() - Duration::days(1)
    }

    /// First instant of the month
    pub fn start(&self) -> NaiveDateTime {
        self.start_date().and_time(NaiveTime::MIN)
    }

    /// Last instant of the month: 23:59:59.999 on the last day
    pub fn end(&self) -> NaiveDateTime {
        let end_of_day =
            NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
        self.end_date().and_time(end_of_day)
    }

    /// Check if a date falls within this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        in_range(date.and_time(NaiveTime::MIN), self.start(), self.end())
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Human label, e.g. "March 2024"
    pub fn label(&self) -> String {
        self.start_date().format("%B %Y").to_string()
    }

    /// Parse a `YYYY-MM` period key
    ///
    /// The key must be exactly four year digits, a dash, and two month digits
    /// with the month in 01..=12.
    pub fn parse(s: &str) -> FinanceResult<Self> {
        let invalid = || FinanceError::InvalidPeriod(s.to_string());
        let bytes = s.as_bytes();

        if bytes.len() != 7 || bytes[4] != b'-' {
            return Err(invalid());
        }
        let (year, month) = (&s[..4], &s[5..]);
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }

        Ok(Self { year, month })
    }
}

/// Resolve a period key to its inclusive `[start, end]` instants
pub fn range_for_period(key: &str) -> FinanceResult<(NaiveDateTime, NaiveDateTime)> {
    let period = Period::parse(key)?;
    Ok((period.start(), period.end()))
}

/// Inclusive on both bounds
pub fn in_range(instant: NaiveDateTime, start: NaiveDateTime, end: NaiveDateTime) -> bool {
    instant >= start && instant <= end
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s.trim())
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Period::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_monthly_range() {
        let period = Period::parse("2025-01").unwrap();
        assert_eq!(period.start_date(), date(2025, 1, 1));
        assert_eq!(period.end_date(), date(2025, 1, 31));
    }

    #[test]
    fn test_leap_year_february() {
        let (_, end) = range_for_period("2024-02").unwrap();
        assert_eq!(end.date(), date(2024, 2, 29));

        let (_, end) = range_for_period("2023-02").unwrap();
        assert_eq!(end.date(), date(2023, 2, 28));

        let (_, end) = range_for_period("2000-02").unwrap();
        assert_eq!(end.date(), date(2000, 2, 29));
        let (_, end) = range_for_period("1900-02").unwrap();
        assert_eq!(end.date(), date(1900, 2, 28));
    }

    #[test]
    fn test_range_bounds_are_first_and_last_instant() {
        let (start, end) = range_for_period("2024-12").unwrap();
        assert_eq!(start, date(2024, 12, 1).and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(
            end,
            date(2024, 12, 31).and_hms_milli_opt(23, 59, 59, 999).unwrap()
        );
    }

    #[test]
    fn test_in_range_is_inclusive() {
        let (start, end) = range_for_period("2024-03").unwrap();
        assert!(in_range(start, start, end));
        assert!(in_range(end, start, end));
        assert!(!in_range(start - Duration::milliseconds(1), start, end));
        assert!(!in_range(end + Duration::milliseconds(1), start, end));
    }

    #[test]
    fn test_contains() {
        let jan = Period::parse("2025-01").unwrap();
        assert!(jan.contains(date(2025, 1, 1)));
        assert!(jan.contains(date(2025, 1, 31)));
        assert!(!jan.contains(date(2025, 2, 1)));
        assert!(!jan.contains(date(2024, 12, 31)));
    }

    #[test]
    fn test_parse_rejects_malformed_keys() {
        for bad in [
            "2024-00", "2024-13", "2024-1", "24-01", "2024/01", "2024-01-01", "", "abcd-ef",
            "2024-+1",
        ] {
            let err = Period::parse(bad).unwrap_err();
            assert!(
                matches!(err, FinanceError::InvalidPeriod(_)),
                "expected InvalidPeriod for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_navigation() {
        let dec = Period::parse("2024-12").unwrap();
        assert_eq!(dec.next().to_string(), "2025-01");
        assert_eq!(dec.next().prev(), dec);
        assert_eq!(Period::parse("2025-01").unwrap().prev().to_string(), "2024-12");
    }

    #[test]
    fn test_label() {
        assert_eq!(Period::parse("2024-03").unwrap().label(), "March 2024");
    }

    #[test]
    fn test_serialization_is_key_string() {
        let period = Period::parse("2025-07").unwrap();
        let json = serde_json::to_string(&period).unwrap();
        assert_eq!(json, "\"2025-07\"");
        let back: Period = serde_json::from_str(&json).unwrap();
        assert_eq!(back, period);
        assert!(serde_json::from_str::<Period>("\"2025-13\"").is_err());
    }
}
