//! Calendar months and date ranges.
//!
//! A [Period] is the unit that balances are rolled up by: every transaction
//! belongs to exactly one period, the calendar month containing its date.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::{Date, Duration, Month};

use crate::Error;

/// The earliest year a date may have.
pub const MIN_YEAR: i32 = 1;
/// The latest year a date may have.
pub const MAX_YEAR: i32 = 9999;

/// Whether `year` is between [MIN_YEAR] and [MAX_YEAR].
///
/// Dates are stored as `YYYY-MM-DD` text and compared as text, which only
/// orders correctly for unsigned four digit years.
pub fn is_supported_year(year: i32) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&year)
}

/// An inclusive range of dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// The first date in the range.
    pub start: Date,
    /// The last date in the range.
    pub end: Date,
}

impl DateRange {
    /// A range covering the single day `date`.
    pub fn day(date: Date) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Whether `date` falls within the range, including both ends.
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

/// A calendar month, identified by year and month number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    first_day: Date,
}

impl Period {
    /// The period containing `date`.
    pub fn containing(date: Date) -> Self {
        Self {
            first_day: date - Duration::days(i64::from(date.day()) - 1),
        }
    }

    /// The year of the period.
    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    /// The month of the period.
    pub fn month(&self) -> Month {
        self.first_day.month()
    }

    /// The first day of the month.
    pub fn first_day(&self) -> Date {
        self.first_day
    }

    /// The last day of the month.
    pub fn last_day(&self) -> Date {
        let length = self.month().length(self.year());

        // Stays within the month, so it cannot overflow.
        self.first_day + Duration::days(i64::from(length) - 1)
    }

    /// The inclusive range of dates in the month.
    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.first_day(),
            end: self.last_day(),
        }
    }

    /// Whether `date` falls in this month.
    pub fn contains(&self, date: Date) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// The month before this one, or `None` before January of [MIN_YEAR].
    pub fn previous(&self) -> Option<Self> {
        self.first_day
            .checked_sub(Duration::days(1))
            .map(Self::containing)
            .filter(|period| is_supported_year(period.year()))
    }

    /// The month after this one, or `None` after December of [MAX_YEAR].
    pub fn next(&self) -> Option<Self> {
        self.last_day()
            .checked_add(Duration::days(1))
            .map(Self::containing)
            .filter(|period| is_supported_year(period.year()))
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), u8::from(self.month()))
    }
}

impl FromStr for Period {
    type Err = Error;

    /// Parse a period from a string of the form `YYYY-MM`, e.g. "2025-04".
    ///
    /// The year must be four digits between [MIN_YEAR] and [MAX_YEAR].
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidPeriod(text.to_owned());

        let (year, month) = text.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || !year.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        if !is_supported_year(year) {
            return Err(invalid());
        }
        let month: u8 = month.parse().map_err(|_| invalid())?;
        let month = Month::try_from(month).map_err(|_| invalid())?;
        let first_day = Date::from_calendar_date(year, month, 1).map_err(|_| invalid())?;

        Ok(Self { first_day })
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;

        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use time::{Month, macros::date};

    use crate::{Error, period::Period};

    #[test]
    fn containing_snaps_to_first_day() {
        let period = Period::containing(date!(2025 - 04 - 17));

        assert_eq!(period.first_day(), date!(2025 - 04 - 01));
        assert_eq!(period.year(), 2025);
        assert_eq!(period.month(), Month::April);
    }

    #[test]
    fn last_day_handles_month_lengths() {
        assert_eq!(
            Period::containing(date!(2025 - 04 - 10)).last_day(),
            date!(2025 - 04 - 30)
        );
        assert_eq!(
            Period::containing(date!(2024 - 02 - 10)).last_day(),
            date!(2024 - 02 - 29)
        );
        assert_eq!(
            Period::containing(date!(2025 - 02 - 10)).last_day(),
            date!(2025 - 02 - 28)
        );
        assert_eq!(
            Period::containing(date!(2025 - 12 - 31)).last_day(),
            date!(2025 - 12 - 31)
        );
    }

    #[test]
    fn next_and_previous_cross_year_boundaries() {
        let december = Period::containing(date!(2024 - 12 - 25));
        let january = Period::containing(date!(2025 - 01 - 01));

        assert_eq!(december.next(), Some(january));
        assert_eq!(january.previous(), Some(december));
        assert_eq!(
            Period::containing(date!(2025 - 01 - 31))
                .next()
                .map(|period| period.first_day()),
            Some(date!(2025 - 02 - 01))
        );
    }

    #[test]
    fn last_supported_month_has_no_next() {
        let december: Period = "9999-12".parse().expect("could not parse period");

        assert_eq!(december.last_day(), date!(9999 - 12 - 31));
        assert_eq!(december.range().end, date!(9999 - 12 - 31));
        assert_eq!(december.next(), None);
        assert_eq!(
            december.previous().map(|period| period.to_string()),
            Some("9999-11".to_owned())
        );
    }

    #[test]
    fn first_supported_month_has_no_previous() {
        let january: Period = "0001-01".parse().expect("could not parse period");

        assert_eq!(january.previous(), None);
        assert_eq!(
            january.next().map(|period| period.to_string()),
            Some("0001-02".to_owned())
        );
    }

    #[test]
    fn contains_only_dates_in_the_same_month() {
        let april = Period::containing(date!(2025 - 04 - 01));

        assert!(april.contains(date!(2025 - 04 - 01)));
        assert!(april.contains(date!(2025 - 04 - 30)));
        assert!(!april.contains(date!(2025 - 03 - 31)));
        assert!(!april.contains(date!(2024 - 04 - 15)));
        assert!(april.range().contains(date!(2025 - 04 - 15)));
    }

    #[test]
    fn parses_and_displays_year_month() {
        let period: Period = "2025-04".parse().expect("could not parse period");

        assert_eq!(period.first_day(), date!(2025 - 04 - 01));
        assert_eq!(period.to_string(), "2025-04");
    }

    #[test]
    fn rejects_invalid_year_month() {
        for text in [
            "2025-13",
            "2025",
            "April 2025",
            "2025-00",
            "",
            "0000-01",
            "-0003-01",
            "+2025-01",
            "12025-01",
        ] {
            assert_eq!(
                text.parse::<Period>(),
                Err(Error::InvalidPeriod(text.to_owned())),
                "want {text:?} to be rejected"
            );
        }
    }

    #[test]
    fn serializes_as_string() {
        let period = Period::containing(date!(2025 - 03 - 09));

        let json = serde_json::to_string(&period).expect("could not serialize period");

        assert_eq!(json, "\"2025-03\"");
        assert_eq!(
            serde_json::from_str::<Period>(&json).expect("could not deserialize period"),
            period
        );
    }
}
