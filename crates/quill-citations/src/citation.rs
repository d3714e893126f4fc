//! CSL-JSON citation record.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One bibliographic record.
///
/// The record is kept as its original JSON object so every field, including
/// ones this crate knows nothing about, is written back unchanged and in the
/// original order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Citation(Map<String, Value>);

impl Citation {
    /// Wrap a JSON object.
    #[must_use]
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// All fields of the record.
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Record id, when present as a string or number.
    #[must_use]
    pub fn id(&self) -> Option<String> {
        match self.0.get("id")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Raw `issued.date-parts[0]` value.
    #[must_use]
    pub fn date_parts(&self) -> Option<&[Value]> {
        self.0
            .get("issued")?
            .get("date-parts")?
            .get(0)?
            .as_array()
            .map(Vec::as_slice)
    }

    /// Effective issue date used for filtering and sorting.
    ///
    /// Built from `[year, month?, day?]`; a missing or zero month defaults to
    /// January and a missing or zero day to the 1st. Out-of-range months and
    /// days roll over into the following month or year. `None` when there is
    /// no usable year.
    #[must_use]
    pub fn issued_date(&self) -> Option<NaiveDate> {
        let parts = self.date_parts()?;
        let year = parts.first().and_then(part_number)?;
        let month = parts.get(1).and_then(part_number).unwrap_or(0);
        let day = parts.get(2).and_then(part_number).unwrap_or(0);
        calendar_date(year, month, day)
    }
}

/// Build a calendar date, rolling over out-of-range months and days.
pub(crate) fn calendar_date(year: i64, month: i64, day: i64) -> Option<NaiveDate> {
    let year = i32::try_from(year).ok()?;
    let month = if month > 0 { month } else { 1 };
    let day = if day > 0 { day } else { 1 };

    let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let months = u32::try_from(month - 1).ok()?;
    let days = u64::try_from(day - 1).ok()?;
    start
        .checked_add_months(Months::new(months))?
        .checked_add_days(Days::new(days))
}

/// Interpret a date part given as a number or a numeric string.
#[allow(clippy::cast_possible_truncation)]
fn part_number(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
