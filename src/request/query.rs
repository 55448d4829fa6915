//! Turns a validated request into the query string of one endpoint.

use crate::error::OpenMeteoError;
use crate::request::validate::ValidatedRequest;
use crate::types::date_arg::DATE_FORMAT;
use crate::types::endpoint::EndpointConfig;
use crate::types::location::LatLon;
use crate::types::resolution::Resolution;
use reqwest::Url;

/// Query key the downscaling switch is sent under. The API names the inverse.
const DOWNSCALING_KEY: &str = "disable_bias_correction";

/// Builds the ordered query pairs for `request` at `coordinates`.
///
/// Optional parameters that were not supplied produce no pair at all, so the
/// server-side defaults apply. Everything supplied is sent; the server decides
/// whether the endpoint accepts it.
pub(crate) fn build_query(
    request: &ValidatedRequest,
    coordinates: LatLon,
) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("latitude", coordinates.latitude().to_string()),
        ("longitude", coordinates.longitude().to_string()),
    ];

    if let Some(start) = request.start {
        query.push(("start_date", start.format(DATE_FORMAT).to_string()));
    }
    if let Some(end) = request.end {
        query.push(("end_date", end.format(DATE_FORMAT).to_string()));
    }
    if !request.hourly.is_empty() {
        query.push((Resolution::Hourly.key(), request.hourly.join(",")));
    }
    if !request.daily.is_empty() {
        query.push((Resolution::Daily.key(), request.daily.join(",")));
    }
    for (category, unit) in &request.units {
        query.push((category.query_key(), unit.to_string()));
    }
    if let Some(model) = &request.model {
        query.push(("models", model.clone()));
    }
    if let Some(timezone) = &request.timezone {
        query.push(("timezone", timezone.clone()));
    }
    if let Some(downscaling) = request.downscaling {
        query.push((DOWNSCALING_KEY, (!downscaling).to_string()));
    }

    query
}

/// Appends `query` to the endpoint's base URL.
pub(crate) fn build_url(
    endpoint: &EndpointConfig,
    query: &[(&'static str, String)],
) -> Result<Url, OpenMeteoError> {
    build_raw_url(&endpoint.base_url, query)
}

pub(crate) fn build_raw_url(
    base_url: &str,
    query: &[(&'static str, String)],
) -> Result<Url, OpenMeteoError> {
    Url::parse_with_params(base_url, query).map_err(|e| OpenMeteoError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::validate::{validate, RawRequest};
    use crate::types::units::{
        LengthUnit, PrecipitationUnit, ResponseUnits, TemperatureUnit, UnitCategory, WindSpeedUnit,
    };
    use crate::types::endpoint::Endpoint;
    use chrono::NaiveDate;

    fn keys(query: &[(&'static str, String)]) -> Vec<&'static str> {
        query.iter().map(|(key, _)| *key).collect()
    }

    fn value<'a>(query: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        query
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_full_ensemble_query() {
        let endpoint = EndpointConfig::public(Endpoint::Ensemble);
        let raw = RawRequest {
            start: Some("2024-06-01".into()),
            end: Some("2024-06-07".into()),
            hourly: &["temperature_2m", "precipitation"],
            daily: &["temperature_2m_max"],
            response_units: Some(
                ResponseUnits::builder()
                    .temperature(TemperatureUnit::Fahrenheit)
                    .precipitation(PrecipitationUnit::Inch)
                    .build(),
            ),
            model: Some("gfs_seamless".to_string()),
            timezone: Some("auto".to_string()),
            downscaling: None,
        };
        let request = validate(&endpoint, &raw).unwrap();
        let query = build_query(&request, LatLon(39.0, -86.0));

        assert_eq!(
            keys(&query),
            [
                "latitude",
                "longitude",
                "start_date",
                "end_date",
                "hourly",
                "daily",
                "temperature_unit",
                "precipitation_unit",
                "models",
                "timezone",
            ]
        );
        assert_eq!(value(&query, "latitude"), Some("39"));
        assert_eq!(value(&query, "longitude"), Some("-86"));
        assert_eq!(value(&query, "hourly"), Some("temperature_2m,precipitation"));
        assert_eq!(value(&query, "temperature_unit"), Some("fahrenheit"));
        assert_eq!(value(&query, "precipitation_unit"), Some("inch"));
        assert_eq!(value(&query, "models"), Some("gfs_seamless"));
    }

    #[test]
    fn test_omitted_options_leave_no_keys() {
        let endpoint = EndpointConfig::public(Endpoint::Ensemble);
        let request = ValidatedRequest {
            start: None,
            end: None,
            hourly: vec!["temperature_2m".to_string()],
            daily: vec![],
            units: vec![],
            model: None,
            timezone: Some("auto".to_string()),
            downscaling: None,
        };
        let query = build_query(&request, LatLon(52.52, 13.41));
        assert_eq!(keys(&query), ["latitude", "longitude", "hourly", "timezone"]);
        assert_eq!(value(&query, "timezone"), Some("auto"));

        let url = build_url(&endpoint, &query).unwrap();
        let url = url.as_str();
        assert!(url.starts_with("https://ensemble-api.open-meteo.com/v1/ensemble?"));
        for absent in ["daily", "models", "start_date", "end_date", "_unit", "disable_bias_correction", "null"] {
            assert!(!url.contains(absent), "{absent} should not be in {url}");
        }
    }

    #[test]
    fn test_downscaling_is_sent_inverted() {
        let request = ValidatedRequest {
            start: NaiveDate::from_ymd_opt(2050, 1, 1),
            end: NaiveDate::from_ymd_opt(2050, 12, 31),
            hourly: vec![],
            daily: vec!["temperature_2m_max".to_string()],
            units: vec![(UnitCategory::Temperature, "celsius")],
            model: Some("EC_Earth3P_HR".to_string()),
            timezone: None,
            downscaling: Some(true),
        };
        let query = build_query(&request, LatLon(52.52, 13.41));
        assert_eq!(value(&query, "disable_bias_correction"), Some("false"));
        assert_eq!(value(&query, "timezone"), None);

        let request = ValidatedRequest {
            downscaling: None,
            ..request
        };
        let query = build_query(&request, LatLon(52.52, 13.41));
        assert_eq!(value(&query, "disable_bias_correction"), None);
    }

    #[test]
    fn test_every_unit_category_is_sent() {
        let raw = RawRequest {
            hourly: &["temperature_2m", "wind_speed_10m", "snow_depth"],
            response_units: Some(
                ResponseUnits::builder()
                    .temperature(TemperatureUnit::Celsius)
                    .wind_speed(WindSpeedUnit::Knots)
                    .precipitation(PrecipitationUnit::Millimetres)
                    .length(LengthUnit::Imperial)
                    .build(),
            ),
            ..Default::default()
        };
        let request = validate(&EndpointConfig::public(Endpoint::Forecast), &raw).unwrap();
        let query = build_query(&request, LatLon(39.0, -86.0));
        assert_eq!(
            &keys(&query)[3..],
            [
                "temperature_unit",
                "wind_speed_unit",
                "precipitation_unit",
                "length_unit"
            ]
        );
        assert_eq!(value(&query, "wind_speed_unit"), Some("kn"));
        assert_eq!(value(&query, "length_unit"), Some("imperial"));
    }

    #[test]
    fn test_url_round_trips_query_values() {
        let endpoint = EndpointConfig::public(Endpoint::Ensemble);
        let query = vec![
            ("latitude", "39".to_string()),
            ("longitude", "-86".to_string()),
            ("hourly", "temperature_2m,precipitation".to_string()),
            ("timezone", "America/Indiana/Indianapolis".to_string()),
        ];
        let url = build_url(&endpoint, &query).unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            query
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let endpoint = EndpointConfig {
            base_url: "not a url".to_string(),
            ..EndpointConfig::public(Endpoint::Ensemble)
        };
        assert!(matches!(
            build_url(&endpoint, &[]),
            Err(OpenMeteoError::InvalidBaseUrl { .. })
        ));
    }
}
