//! Date types for query paths.

use std::fmt;

use chrono::NaiveDate;

/// Error returned when parsing an invalid compact date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date: {reason}")]
pub struct InvalidDate {
    reason: &'static str,
}

/// A calendar date given in a URL path as `YYYYMMDD`.
///
/// The input must be exactly 8 ASCII digits naming a real calendar date.
/// Any `QueryDate` value is valid by construction.
///
/// # Examples
///
/// ```
/// use climate_server::domain::QueryDate;
///
/// let date = QueryDate::parse("20160823").unwrap();
/// assert_eq!(date.to_string(), "2016-08-23");
///
/// // Separators are rejected
/// assert!(QueryDate::parse("2016-08-23").is_err());
///
/// // So are dates that do not exist
/// assert!(QueryDate::parse("20170230").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryDate(NaiveDate);

impl QueryDate {
    /// Parse a compact `YYYYMMDD` date.
    pub fn parse(s: &str) -> Result<Self, InvalidDate> {
        if s.len() != 8 {
            return Err(InvalidDate {
                reason: "must be exactly 8 characters",
            });
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidDate {
                reason: "must contain only digits 0-9",
            });
        }

        // All ASCII, so byte slicing is on char boundaries.
        let field = |range: std::ops::Range<usize>| {
            s[range].parse::<u32>().map_err(|_| InvalidDate {
                reason: "must contain only digits 0-9",
            })
        };
        let year = field(0..4)? as i32;
        let month = field(4..6)?;
        let day = field(6..8)?;

        NaiveDate::from_ymd_opt(year, month, day)
            .map(QueryDate)
            .ok_or(InvalidDate {
                reason: "not a calendar date",
            })
    }

    /// Returns the underlying calendar date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for QueryDate {
    fn from(date: NaiveDate) -> Self {
        QueryDate(date)
    }
}

impl fmt::Debug for QueryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QueryDate({})", self.0)
    }
}

/// Displays in ISO form (`YYYY-MM-DD`), the form stored in the database.
impl fmt::Display for QueryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// An inclusive range of dates with an optional upper bound.
///
/// A range whose end precedes its start is empty rather than invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Every date on or after `start`.
    pub fn starting(start: QueryDate) -> Self {
        Self {
            start: start.date(),
            end: None,
        }
    }

    /// Dates from `start` to `end`, both inclusive.
    pub fn between(start: QueryDate, end: QueryDate) -> Self {
        Self {
            start: start.date(),
            end: Some(end.date()),
        }
    }

    /// Whether `date` falls within the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && self.end.is_none_or(|end| date <= end)
    }
}
