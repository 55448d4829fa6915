//! Local checks every request passes before the network is touched.

use crate::request::error::ValidationError;
use crate::types::date_arg::DateArg;
use crate::types::endpoint::EndpointConfig;
use crate::types::location::LatLon;
use crate::types::resolution::Resolution;
use crate::types::units::{ResponseUnits, UnitCategory};
use chrono::NaiveDate;
use log::debug;
use std::collections::HashSet;

/// The caller's arguments as they arrive from an endpoint builder.
#[derive(Debug, Clone, Default)]
pub(crate) struct RawRequest<'a> {
    pub start: Option<DateArg>,
    pub end: Option<DateArg>,
    pub hourly: &'a [&'a str],
    pub daily: &'a [&'a str],
    pub response_units: Option<ResponseUnits>,
    pub model: Option<String>,
    pub timezone: Option<String>,
    pub downscaling: Option<bool>,
}

/// A request that passed validation. Blank optional strings have been dropped.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ValidatedRequest {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub hourly: Vec<String>,
    pub daily: Vec<String>,
    pub units: Vec<(UnitCategory, &'static str)>,
    pub model: Option<String>,
    pub timezone: Option<String>,
    pub downscaling: Option<bool>,
}

/// Checks `raw` and normalizes it for the query builder.
///
/// Only a request without variables or with an unparseable date is rejected
/// here. Whether the endpoint accepts a parameter, unit or resolution is
/// left to the server, which answers with an error status.
pub(crate) fn validate(
    endpoint: &EndpointConfig,
    raw: &RawRequest<'_>,
) -> Result<ValidatedRequest, ValidationError> {
    let hourly = clean_variables(Resolution::Hourly, raw.hourly);
    let daily = clean_variables(Resolution::Daily, raw.daily);
    if hourly.is_empty() && daily.is_empty() {
        return Err(ValidationError::NoVariables);
    }

    let start = parse_date("start", raw.start.as_ref())?;
    let end = parse_date("end", raw.end.as_ref())?;

    let units = raw
        .response_units
        .map(|units| units.specified())
        .unwrap_or_default();

    debug!(
        "Validated {} request: {} hourly, {} daily, {} units",
        endpoint.endpoint,
        hourly.len(),
        daily.len(),
        units.len()
    );
    Ok(ValidatedRequest {
        start,
        end,
        hourly,
        daily,
        units,
        model: non_blank(raw.model.as_deref()),
        timezone: non_blank(raw.timezone.as_deref()),
        downscaling: raw.downscaling,
    })
}

pub(crate) fn validate_coordinates(coordinates: LatLon) -> Result<LatLon, ValidationError> {
    if coordinates.is_valid() {
        Ok(coordinates)
    } else {
        Err(ValidationError::InvalidCoordinates {
            latitude: coordinates.latitude(),
            longitude: coordinates.longitude(),
        })
    }
}

/// Trims names and drops blanks. A name repeated within one list is kept once,
/// at its first position.
fn clean_variables(resolution: Resolution, variables: &[&str]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(variables.len());
    let mut cleaned = Vec::with_capacity(variables.len());
    for variable in variables.iter().map(|v| v.trim()).filter(|v| !v.is_empty()) {
        if seen.insert(variable) {
            cleaned.push(variable.to_string());
        } else {
            debug!("Ignoring repeated {} variable '{}'", resolution, variable);
        }
    }
    cleaned
}

fn parse_date(
    field: &'static str,
    arg: Option<&DateArg>,
) -> Result<Option<NaiveDate>, ValidationError> {
    arg.map(|arg| {
        arg.to_date().ok_or_else(|| ValidationError::InvalidDate {
            field,
            value: arg.to_string(),
        })
    })
    .transpose()
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::endpoint::Endpoint;
    use crate::types::units::{LengthUnit, TemperatureUnit};

    fn hourly_request<'a>(hourly: &'a [&'a str]) -> RawRequest<'a> {
        RawRequest {
            hourly,
            timezone: Some("auto".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_variables_is_rejected() {
        let err = validate(&EndpointConfig::public(Endpoint::Ensemble), &RawRequest::default()).unwrap_err();
        assert_eq!(err, ValidationError::NoVariables);
        assert!(err.to_string().contains("No measurement variables supplied"));
    }

    #[test]
    fn test_blank_variables_count_as_none() {
        let raw = RawRequest {
            hourly: &["", "  "],
            daily: &[],
            ..Default::default()
        };
        assert_eq!(
            validate(&EndpointConfig::public(Endpoint::Ensemble), &raw),
            Err(ValidationError::NoVariables)
        );
    }

    #[test]
    fn test_daily_only_is_accepted() {
        let raw = RawRequest {
            daily: &["temperature_2m_max"],
            ..Default::default()
        };
        let validated = validate(&EndpointConfig::public(Endpoint::Ensemble), &raw).unwrap();
        assert!(validated.hourly.is_empty());
        assert_eq!(validated.daily, vec!["temperature_2m_max"]);
    }

    #[test]
    fn test_invalid_dates_are_rejected() {
        let raw = RawRequest {
            start: Some("2024-02-30".into()),
            ..hourly_request(&["temperature_2m"])
        };
        let err = validate(&EndpointConfig::public(Endpoint::Ensemble), &raw).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidDate {
                field: "start",
                value: "2024-02-30".to_string()
            }
        );
        assert!(err.to_string().contains("Invalid date format"));

        let raw = RawRequest {
            start: Some("2024-02-01".into()),
            end: Some("tomorrow".into()),
            ..hourly_request(&["temperature_2m"])
        };
        assert!(matches!(
            validate(&EndpointConfig::public(Endpoint::Ensemble), &raw),
            Err(ValidationError::InvalidDate { field: "end", .. })
        ));
    }

    #[test]
    fn test_valid_request_is_normalized() {
        let raw = RawRequest {
            start: Some("2024-06-01".into()),
            end: Some(NaiveDate::from_ymd_opt(2024, 6, 7).unwrap().into()),
            model: Some("  ".to_string()),
            response_units: Some(
                ResponseUnits::builder()
                    .temperature(TemperatureUnit::Fahrenheit)
                    .build(),
            ),
            ..hourly_request(&[" temperature_2m ", "precipitation"])
        };
        let validated = validate(&EndpointConfig::public(Endpoint::Ensemble), &raw).unwrap();
        assert_eq!(validated.start, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(validated.end, NaiveDate::from_ymd_opt(2024, 6, 7));
        assert_eq!(validated.hourly, vec!["temperature_2m", "precipitation"]);
        assert_eq!(validated.model, None);
        assert_eq!(validated.timezone.as_deref(), Some("auto"));
        assert_eq!(
            validated.units,
            vec![(UnitCategory::Temperature, "fahrenheit")]
        );
    }

    #[test]
    fn test_repeated_variables_are_sent_once() {
        let raw = hourly_request(&["temperature_2m", "precipitation", " temperature_2m", "precipitation"]);
        let validated = validate(&EndpointConfig::public(Endpoint::Ensemble), &raw).unwrap();
        assert_eq!(validated.hourly, vec!["temperature_2m", "precipitation"]);
    }

    #[test]
    fn test_endpoint_capabilities_are_left_to_the_server() {
        let raw = RawRequest {
            hourly: &["temperature_2m"],
            daily: &["temperature_2m_max"],
            downscaling: Some(false),
            ..Default::default()
        };
        let validated = validate(&EndpointConfig::public(Endpoint::Climate), &raw).unwrap();
        assert_eq!(validated.hourly, vec!["temperature_2m"]);
        assert_eq!(validated.downscaling, Some(false));

        let raw = RawRequest {
            response_units: Some(ResponseUnits::builder().length(LengthUnit::Imperial).build()),
            ..hourly_request(&["temperature_2m"])
        };
        let validated = validate(&EndpointConfig::public(Endpoint::Ensemble), &raw).unwrap();
        assert_eq!(validated.units, vec![(UnitCategory::Length, "imperial")]);
    }

    #[test]
    fn test_coordinates_range() {
        assert_eq!(validate_coordinates(LatLon(39.0, -86.0)), Ok(LatLon(39.0, -86.0)));
        assert!(matches!(
            validate_coordinates(LatLon(-91.0, 0.0)),
            Err(ValidationError::InvalidCoordinates { .. })
        ));
    }
}
