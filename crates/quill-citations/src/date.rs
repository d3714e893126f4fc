//! Date bounds and sort order options.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::citation::calendar_date;

/// Sort order applied after date filtering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Keep extraction order.
    #[default]
    None,
    /// Oldest first.
    Date,
    /// Newest first.
    DateReverse,
}

impl SortOrder {
    /// Option value as written in block properties.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Date => "date",
            Self::DateReverse => "date_reverse",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized sort order string.
#[derive(Debug, thiserror::Error)]
#[error("unknown sort order '{0}' (expected none, date or date_reverse)")]
pub struct UnknownSortOrder(String);

impl FromStr for SortOrder {
    type Err = UnknownSortOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "none" => Ok(Self::None),
            "date" => Ok(Self::Date),
            "date_reverse" => Ok(Self::DateReverse),
            other => Err(UnknownSortOrder(other.to_owned())),
        }
    }
}

/// Invalid date bound string.
#[derive(Debug, thiserror::Error)]
#[error("invalid date '{0}' (expected YYYY, YYYY/MM or YYYY/MM/DD)")]
pub struct DateBoundError(String);

/// Parse a date-range bound written as `YYYY[/MM[/DD]]`.
///
/// `-` is accepted as separator too. Missing month and day default to
/// January and the 1st, matching how citation dates are completed.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use quill_citations::parse_date_bound;
///
/// assert_eq!(parse_date_bound("2019/6").unwrap(), NaiveDate::from_ymd_opt(2019, 6, 1).unwrap());
/// assert!(parse_date_bound("June 2019").is_err());
/// ```
pub fn parse_date_bound(value: &str) -> Result<NaiveDate, DateBoundError> {
    let error = || DateBoundError(value.to_owned());

    let parts = value
        .trim()
        .split(['/', '-'])
        .map(|part| part.trim().parse::<i64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| error())?;

    match parts.as_slice() {
        [year] => calendar_date(*year, 1, 1),
        [year, month] => calendar_date(*year, *month, 1),
        [year, month, day] => calendar_date(*year, *month, *day),
        _ => None,
    }
    .ok_or_else(error)
}
