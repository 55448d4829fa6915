//! Describes one Open-Meteo endpoint family.
//!
//! All families share the same query builder and response flattener; an
//! [`EndpointConfig`] tells them which base URL to call.

use std::fmt;

pub const ENSEMBLE_URL: &str = "https://ensemble-api.open-meteo.com/v1/ensemble";
pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const HISTORY_URL: &str = "https://archive-api.open-meteo.com/v1/archive";
pub const CLIMATE_URL: &str = "https://climate-api.open-meteo.com/v1/climate";

/// The endpoint families this crate talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Ensemble forecasts, one column per forecast member.
    Ensemble,
    /// Deterministic forecasts.
    Forecast,
    /// Historical reanalysis (archive).
    History,
    /// Downscaled CMIP6 climate projections. Daily data only.
    Climate,
}

impl Endpoint {
    pub fn default_url(&self) -> &'static str {
        match self {
            Endpoint::Ensemble => ENSEMBLE_URL,
            Endpoint::Forecast => FORECAST_URL,
            Endpoint::History => HISTORY_URL,
            Endpoint::Climate => CLIMATE_URL,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Endpoint::Ensemble => "ensemble",
            Endpoint::Forecast => "forecast",
            Endpoint::History => "history",
            Endpoint::Climate => "climate",
        };
        write!(f, "{}", name)
    }
}

/// One endpoint family and the URL it is reached at.
///
/// Every family goes through the same validator, query builder and flattener;
/// the endpoint builders on [`crate::OpenMeteo`] only differ in the arguments
/// they expose. Parameters the family does not understand are rejected by the
/// server, not locally.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointConfig {
    pub endpoint: Endpoint,
    pub base_url: String,
}

impl EndpointConfig {
    pub fn new(endpoint: Endpoint, base_url: impl Into<String>) -> Self {
        Self {
            endpoint,
            base_url: base_url.into(),
        }
    }

    /// The family at its public Open-Meteo URL.
    pub fn public(endpoint: Endpoint) -> Self {
        Self::new(endpoint, endpoint.default_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_urls() {
        assert_eq!(
            EndpointConfig::public(Endpoint::Ensemble).base_url,
            "https://ensemble-api.open-meteo.com/v1/ensemble"
        );
        assert_eq!(
            EndpointConfig::public(Endpoint::History).base_url,
            "https://archive-api.open-meteo.com/v1/archive"
        );
        assert_eq!(Endpoint::Climate.to_string(), "climate");
    }

    #[test]
    fn test_base_url_override() {
        let config = EndpointConfig::new(Endpoint::Ensemble, "http://127.0.0.1:8080/v1/ensemble");
        assert_eq!(config.base_url, "http://127.0.0.1:8080/v1/ensemble");
        assert_eq!(config.endpoint, Endpoint::Ensemble);
    }
}
