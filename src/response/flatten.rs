//! Flattens the per-variable arrays of a response into a [`ResponseTable`].
//!
//! A response block looks like
//!
//! ```json
//! "hourly": {
//!     "time": ["2024-06-01T00:00", "2024-06-01T01:00", ...],
//!     "temperature_2m": [18.2, 17.9, ...],
//!     "temperature_2m_member01": [18.0, null, ...],
//!     ...
//! }
//! ```
//!
//! Every array must be as long as `time`. The control run (`temperature_2m`)
//! and each member (`temperature_2m_memberNN`) become one column.

use crate::error::OpenMeteoError;
use crate::request::error::ValidationError;
use crate::response::error::MalformedResponseError;
use crate::response::model::ApiResponse;
use crate::types::resolution::Resolution;
use crate::types::response_table::{
    ResponseMetadata, ResponseTable, DATETIME_COLUMN, DATE_COLUMN,
};
use chrono::{NaiveDate, NaiveDateTime};
use log::debug;
use polars::prelude::*;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

const MEMBER_INFIX: &str = "_member";

/// Values of one column, typed by what the API sent.
#[derive(Debug, Clone, PartialEq)]
enum ColumnValues {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl ColumnValues {
    /// Picks `rows[i]` for every output row; `None` produces a null.
    fn gather(&self, rows: &[Option<usize>]) -> ColumnValues {
        match self {
            ColumnValues::Numeric(values) => ColumnValues::Numeric(
                rows.iter().map(|row| row.and_then(|i| values[i])).collect(),
            ),
            ColumnValues::Text(values) => ColumnValues::Text(
                rows.iter()
                    .map(|row| row.and_then(|i| values[i].clone()))
                    .collect(),
            ),
        }
    }

    fn into_column(self, name: &str) -> Column {
        match self {
            ColumnValues::Numeric(values) => Column::new(name.into(), values),
            ColumnValues::Text(values) => Column::new(name.into(), values),
        }
    }
}

#[derive(Debug)]
struct FlatColumn {
    name: String,
    unit: Option<String>,
    values: ColumnValues,
}

/// One resolution block, checked and split into columns.
#[derive(Debug)]
struct Block {
    times: Vec<String>,
    columns: Vec<FlatColumn>,
}

/// Builds the table for a response to a request for `hourly` and `daily` variables.
pub(crate) fn flatten_response(
    body: Value,
    hourly: &[String],
    daily: &[String],
) -> Result<ResponseTable, OpenMeteoError> {
    let response: ApiResponse =
        serde_json::from_value(body).map_err(MalformedResponseError::Envelope)?;

    let hourly_block = if hourly.is_empty() {
        None
    } else {
        Some(extract_block(
            Resolution::Hourly,
            response.hourly.as_ref(),
            &response.hourly_units,
            hourly,
        )?)
    };
    let daily_block = if daily.is_empty() {
        None
    } else {
        Some(extract_block(
            Resolution::Daily,
            response.daily.as_ref(),
            &response.daily_units,
            daily,
        )?)
    };

    let (time_column, columns) = match (hourly_block, daily_block) {
        (Some(hourly), daily) => hourly_columns(hourly, daily)?,
        (None, Some(daily)) => daily_columns(daily)?,
        (None, None) => return Err(ValidationError::NoVariables.into()),
    };

    let mut units = BTreeMap::new();
    let mut frame_columns = Vec::with_capacity(columns.len() + 1);
    frame_columns.push(time_column);
    for column in columns {
        if let Some(unit) = column.unit {
            units.insert(column.name.clone(), unit);
        }
        frame_columns.push(column.values.into_column(&column.name));
    }
    let frame = DataFrame::new(frame_columns)?;
    debug!(
        "Flattened response into {} rows and {} columns",
        frame.height(),
        frame.width()
    );

    let metadata = ResponseMetadata {
        latitude: response.latitude,
        longitude: response.longitude,
        elevation: response.elevation,
        timezone: response.timezone,
        timezone_abbreviation: response.timezone_abbreviation,
        utc_offset_seconds: response.utc_offset_seconds,
        generation_time_ms: response.generation_time_ms,
    };
    Ok(ResponseTable::new(frame, metadata, units))
}

impl ResponseTable {
    /// Builds a table from an already downloaded response body, e.g. one
    /// saved to disk. `hourly` and `daily` are the variables that were requested.
    ///
    /// ```
    /// use openmeteo::ResponseTable;
    /// use serde_json::json;
    ///
    /// let body = json!({
    ///     "latitude": 39.0,
    ///     "longitude": -86.0,
    ///     "daily": {
    ///         "time": ["2024-06-01", "2024-06-02"],
    ///         "temperature_2m_max": [27.1, null],
    ///         "temperature_2m_max_member01": [26.4, 25.0]
    ///     }
    /// });
    /// let table = ResponseTable::from_json(body, &[], &["temperature_2m_max"]).unwrap();
    /// assert_eq!(table.column_names(), ["date", "daily_temperature_2m_max", "daily_temperature_2m_max_member01"]);
    /// ```
    pub fn from_json(
        body: Value,
        hourly: &[&str],
        daily: &[&str],
    ) -> Result<ResponseTable, OpenMeteoError> {
        let owned = |variables: &[&str]| -> Vec<String> {
            variables.iter().map(|v| v.trim().to_string()).collect()
        };
        flatten_response(body, &owned(hourly), &owned(daily))
    }
}

/// Time index plus hourly columns, with daily columns broadcast to every hour
/// of their date.
fn hourly_columns(
    hourly: Block,
    daily: Option<Block>,
) -> Result<(Column, Vec<FlatColumn>), MalformedResponseError> {
    let datetimes = hourly
        .times
        .iter()
        .map(|t| parse_datetime(t))
        .collect::<Result<Vec<_>, _>>()?;
    let mut columns = hourly.columns;

    if let Some(daily) = daily {
        let day_rows: HashMap<NaiveDate, usize> = daily
            .times
            .iter()
            .enumerate()
            .map(|(row, t)| parse_date(t).map(|date| (date, row)))
            .collect::<Result<_, _>>()?;
        let rows: Vec<Option<usize>> = datetimes
            .iter()
            .map(|dt| day_rows.get(&dt.date()).copied())
            .collect();
        columns.extend(daily.columns.into_iter().map(|column| FlatColumn {
            values: column.values.gather(&rows),
            ..column
        }));
    }

    let time: Column = DatetimeChunked::from_naive_datetime(
        DATETIME_COLUMN.into(),
        datetimes,
        TimeUnit::Milliseconds,
    )
    .into_series()
    .into();
    Ok((time, columns))
}

fn daily_columns(daily: Block) -> Result<(Column, Vec<FlatColumn>), MalformedResponseError> {
    let dates = daily
        .times
        .iter()
        .map(|t| parse_date(t))
        .collect::<Result<Vec<_>, _>>()?;
    let time: Column = DateChunked::from_naive_date(DATE_COLUMN.into(), dates)
        .into_series()
        .into();
    Ok((time, daily.columns))
}

fn parse_datetime(value: &str) -> Result<NaiveDateTime, MalformedResponseError> {
    NaiveDateTime::parse_from_str(value, Resolution::Hourly.time_format()).map_err(|_| {
        MalformedResponseError::InvalidTimestamp {
            resolution: Resolution::Hourly,
            value: value.to_string(),
        }
    })
}

fn parse_date(value: &str) -> Result<NaiveDate, MalformedResponseError> {
    NaiveDate::parse_from_str(value, Resolution::Daily.time_format()).map_err(|_| {
        MalformedResponseError::InvalidTimestamp {
            resolution: Resolution::Daily,
            value: value.to_string(),
        }
    })
}

fn extract_block(
    resolution: Resolution,
    block: Option<&Map<String, Value>>,
    units: &HashMap<String, String>,
    variables: &[String],
) -> Result<Block, MalformedResponseError> {
    let block = block.ok_or(MalformedResponseError::MissingBlock(resolution))?;
    let times = match block.get("time") {
        Some(Value::Array(times)) => times
            .iter()
            .map(|t| match t {
                Value::String(t) => Ok(t.clone()),
                other => Err(MalformedResponseError::InvalidTimestamp {
                    resolution,
                    value: other.to_string(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?,
        _ => return Err(MalformedResponseError::MissingTime(resolution)),
    };

    let mut columns = Vec::new();
    for variable in variables {
        let keys = member_keys(resolution, block, variable)?;
        if keys.is_empty() {
            return Err(MalformedResponseError::MissingVariable {
                resolution,
                variable: variable.clone(),
            });
        }
        for key in keys {
            let values = match &block[key] {
                Value::Array(values) => values,
                _ => {
                    return Err(MalformedResponseError::NotAnArray {
                        resolution,
                        key: key.to_string(),
                    })
                }
            };
            if values.len() != times.len() {
                return Err(MalformedResponseError::LengthMismatch {
                    resolution,
                    key: key.to_string(),
                    expected: times.len(),
                    found: values.len(),
                });
            }
            columns.push(FlatColumn {
                name: resolution.column_name(key),
                unit: units.get(key).cloned(),
                values: column_values(resolution, key, values)?,
            });
        }
    }

    Ok(Block { times, columns })
}

/// Keys of `block` holding `variable`, control run first, then members by index.
/// Equal indices (`_member00` next to the control run) are ordered by key.
fn member_keys<'a>(
    resolution: Resolution,
    block: &'a Map<String, Value>,
    variable: &str,
) -> Result<Vec<&'a str>, MalformedResponseError> {
    let mut keys = Vec::new();
    for key in block.keys() {
        if let Some(index) = member_index(resolution, key, variable)? {
            keys.push((index, key.as_str()));
        }
    }
    keys.sort();
    Ok(keys.into_iter().map(|(_, key)| key).collect())
}

/// `Some(0)` for the control run `variable`, `Some(n)` for `variable_memberNN`,
/// `None` for keys of other variables.
fn member_index(
    resolution: Resolution,
    key: &str,
    variable: &str,
) -> Result<Option<u32>, MalformedResponseError> {
    let Some(rest) = key.strip_prefix(variable) else {
        return Ok(None);
    };
    if rest.is_empty() {
        return Ok(Some(0));
    }
    let Some(digits) = rest.strip_prefix(MEMBER_INFIX) else {
        return Ok(None);
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(None);
    }
    digits
        .parse()
        .map(Some)
        .map_err(|_| MalformedResponseError::InvalidMemberKey {
            resolution,
            key: key.to_string(),
        })
}

fn column_values(
    resolution: Resolution,
    key: &str,
    values: &[Value],
) -> Result<ColumnValues, MalformedResponseError> {
    let unsupported = |value: &Value| MalformedResponseError::UnsupportedValue {
        resolution,
        key: key.to_string(),
        value: value.to_string(),
    };

    let is_text = values.iter().any(Value::is_string);
    if is_text {
        values
            .iter()
            .map(|value| match value {
                Value::Null => Ok(None),
                Value::String(text) => Ok(Some(text.clone())),
                other => Err(unsupported(other)),
            })
            .collect::<Result<_, _>>()
            .map(ColumnValues::Text)
    } else {
        values
            .iter()
            .map(|value| match value {
                Value::Null => Ok(None),
                Value::Number(number) => number.as_f64().map(Some).ok_or_else(|| unsupported(value)),
                other => Err(unsupported(other)),
            })
            .collect::<Result<_, _>>()
            .map(ColumnValues::Numeric)
    }
}
