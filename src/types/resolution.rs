use std::fmt;

/// The temporal resolution of a requested variable.
///
/// Each resolution has its own variable list in the request, its own block in
/// the response and its own column prefix in the resulting table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// Hourly values, indexed by `YYYY-MM-DDTHH:MM` local timestamps.
    Hourly,
    /// Daily aggregates, indexed by `YYYY-MM-DD` dates.
    Daily,
}

impl Resolution {
    /// Query key, response block name and column prefix.
    pub fn key(&self) -> &'static str {
        match self {
            Resolution::Hourly => "hourly",
            Resolution::Daily => "daily",
        }
    }

    pub(crate) fn time_format(&self) -> &'static str {
        match self {
            Resolution::Hourly => "%Y-%m-%dT%H:%M",
            Resolution::Daily => "%Y-%m-%d",
        }
    }

    /// Name of the column holding `key` in the flattened table,
    /// e.g. `hourly_temperature_2m_member03`.
    pub fn column_name(&self, key: &str) -> String {
        format!("{}_{}", self.key(), key)
    }
}

/// Allows formatting a `Resolution` variant using its `key`.
///
/// # Examples
///
/// ```
/// use openmeteo::Resolution;
///
/// assert_eq!(Resolution::Hourly.to_string(), "hourly");
/// assert_eq!(Resolution::Daily.column_name("precipitation_sum"), "daily_precipitation_sum");
/// ```
impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
