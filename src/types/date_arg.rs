use chrono::NaiveDate;
use std::fmt;

/// ISO-8601 calendar date format the API accepts for `start_date` / `end_date`.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// A start or end date as the caller supplied it.
///
/// Strings are kept verbatim and only parsed during validation, so a malformed
/// date is reported as a [`crate::ValidationError`] before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateArg {
    Text(String),
    Date(NaiveDate),
}

impl DateArg {
    /// Parses the argument into a calendar date, `None` if it is not one.
    pub fn to_date(&self) -> Option<NaiveDate> {
        match self {
            DateArg::Date(date) => Some(*date),
            DateArg::Text(text) => NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok(),
        }
    }
}

impl From<NaiveDate> for DateArg {
    fn from(value: NaiveDate) -> Self {
        DateArg::Date(value)
    }
}

impl From<&str> for DateArg {
    fn from(value: &str) -> Self {
        DateArg::Text(value.to_string())
    }
}

impl From<String> for DateArg {
    fn from(value: String) -> Self {
        DateArg::Text(value)
    }
}

impl fmt::Display for DateArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateArg::Text(text) => write!(f, "{}", text),
            DateArg::Date(date) => write!(f, "{}", date.format(DATE_FORMAT)),
        }
    }
}
