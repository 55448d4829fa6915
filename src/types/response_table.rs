//! Contains the `ResponseTable` returned by every endpoint.

use crate::types::resolution::Resolution;
use chrono::NaiveDateTime;
use polars::prelude::{col, lit, DataFrame, DataType, Expr, IntoLazy, LazyFrame, TimeUnit};
use std::collections::BTreeMap;

/// Name of the timestamp column of tables holding hourly data.
pub const DATETIME_COLUMN: &str = "datetime";
/// Name of the timestamp column of tables holding only daily data.
pub const DATE_COLUMN: &str = "date";

/// What the API reported about the grid cell and time zone it answered for.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseMetadata {
    /// Latitude of the grid cell the data was taken from (not the requested one).
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: Option<f64>,
    /// IANA name, e.g. `America/Indiana/Indianapolis`. With `timezone=auto`
    /// this is the zone of the location.
    pub timezone: Option<String>,
    pub timezone_abbreviation: Option<String>,
    pub utc_offset_seconds: i32,
    pub generation_time_ms: Option<f64>,
}

/// A flattened API response: one row per timestamp, one column per
/// requested variable and forecast member.
///
/// The first column is the time index: `datetime` (local wall-clock time of
/// [`ResponseMetadata::timezone`], millisecond `Datetime`) when hourly data was
/// requested, otherwise `date`. Data columns are named `<resolution>_<key>`,
/// e.g. `hourly_temperature_2m` for the control run and
/// `hourly_temperature_2m_member07` for member 7. Missing values are nulls.
///
/// Units are kept next to the frame rather than as extra columns; see
/// [`ResponseTable::unit`].
///
/// # Example
///
/// ```no_run
/// # use openmeteo::{OpenMeteo, OpenMeteoError, LatLon};
/// # fn main() -> Result<(), OpenMeteoError> {
/// let client = OpenMeteo::new()?;
/// let table = client
///     .ensemble_forecast()
///     .location(LatLon(39.0, -86.0))
///     .hourly(&["temperature_2m"])
///     .call()?;
///
/// println!("{}", table.frame);
/// println!("{:?}", table.unit("hourly_temperature_2m")); // Some("°C")
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ResponseTable {
    /// The underlying Polars DataFrame.
    pub frame: DataFrame,
    pub metadata: ResponseMetadata,
    units: BTreeMap<String, String>,
}

impl ResponseTable {
    pub(crate) fn new(
        frame: DataFrame,
        metadata: ResponseMetadata,
        units: BTreeMap<String, String>,
    ) -> Self {
        Self {
            frame,
            metadata,
            units,
        }
    }

    /// Number of rows (timestamps).
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Number of columns, including the time index.
    pub fn width(&self) -> usize {
        self.frame.width()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    /// Unit of a data column as reported by the API, e.g. `°F` or `inch`.
    pub fn unit(&self, column: &str) -> Option<&str> {
        self.units.get(column).map(String::as_str)
    }

    /// All column units, keyed by column name.
    pub fn units(&self) -> &BTreeMap<String, String> {
        &self.units
    }

    /// Name of the time index column, `datetime` or `date`.
    pub fn time_column(&self) -> &'static str {
        if self.frame.get_column_index(DATETIME_COLUMN).is_some() {
            DATETIME_COLUMN
        } else {
            DATE_COLUMN
        }
    }

    /// The columns holding `variable` at `resolution`: the control run first,
    /// then every member in member order.
    ///
    /// ```no_run
    /// # use openmeteo::{OpenMeteo, OpenMeteoError, LatLon, Resolution};
    /// # fn main() -> Result<(), OpenMeteoError> {
    /// # let client = OpenMeteo::new()?;
    /// let table = client
    ///     .ensemble_forecast()
    ///     .location(LatLon(39.0, -86.0))
    ///     .hourly(&["temperature_2m"])
    ///     .model("gfs_seamless")
    ///     .call()?;
    /// let members = table.member_columns(Resolution::Hourly, "temperature_2m");
    /// assert_eq!(members[0], "hourly_temperature_2m");
    /// assert_eq!(members[1], "hourly_temperature_2m_member01");
    /// # Ok(())
    /// # }
    /// ```
    pub fn member_columns(&self, resolution: Resolution, variable: &str) -> Vec<String> {
        let control = resolution.column_name(variable);
        let member_prefix = format!("{}_member", control);
        self.column_names()
            .into_iter()
            .filter(|name| *name == control || name.starts_with(&member_prefix))
            .collect()
    }

    /// A `LazyFrame` over the table, for further Polars processing.
    pub fn lazy(&self) -> LazyFrame {
        self.frame.clone().lazy()
    }

    /// Filters the rows based on a Polars predicate expression.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use openmeteo::{OpenMeteo, LatLon};
    /// use polars::prelude::{col, lit};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = OpenMeteo::new()?;
    /// let table = client
    ///     .ensemble_forecast()
    ///     .location(LatLon(52.52, 13.41))
    ///     .hourly(&["temperature_2m"])
    ///     .call()?;
    ///
    /// // Hours where the control run is below freezing
    /// let freezing = table.filter(col("hourly_temperature_2m").lt(lit(0.0f64))).collect()?;
    /// println!("{}", freezing);
    /// # Ok(())
    /// # }
    /// ```
    pub fn filter(&self, predicate: Expr) -> LazyFrame {
        self.lazy().filter(predicate)
    }

    /// Keeps the rows whose time index lies within `start..=end`.
    ///
    /// For daily-only tables the bounds are truncated to their dates.
    pub fn get_range(&self, start: NaiveDateTime, end: NaiveDateTime) -> LazyFrame {
        let time = col(self.time_column());
        let (start, end) = if self.time_column() == DATETIME_COLUMN {
            let unit = DataType::Datetime(TimeUnit::Milliseconds, None);
            (lit(start).cast(unit.clone()), lit(end).cast(unit))
        } else {
            (lit(start.date()), lit(end.date()))
        };
        self.filter(time.clone().gt_eq(start).and(time.lt_eq(end)))
    }
}
