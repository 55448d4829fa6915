//! The main entry point: an [`OpenMeteo`] client with one builder per endpoint family.

use crate::error::OpenMeteoError;
use crate::geocoding::geocoder::{Geocoder, OpenMeteoGeocoder, GEOCODING_URL};
use crate::request::query::{build_query, build_url};
use crate::request::validate::{validate, validate_coordinates, RawRequest};
use crate::response::flatten::flatten_response;
use crate::transport::get_json;
use crate::types::date_arg::DateArg;
use crate::types::endpoint::{Endpoint, EndpointConfig};
use crate::types::location::Location;
use crate::types::response_table::ResponseTable;
use crate::types::units::ResponseUnits;
use bon::bon;
use log::debug;
use reqwest::blocking::Client;

const DEFAULT_TIMEZONE: &str = "auto";

/// Base URLs and HTTP settings of an [`OpenMeteo`] client.
///
/// The defaults point at the public Open-Meteo services. Override single
/// fields to target a self-hosted instance or a mock server:
///
/// ```
/// use openmeteo::OpenMeteoConfig;
///
/// let config = OpenMeteoConfig {
///     ensemble_url: "http://localhost:8080/v1/ensemble".to_string(),
///     ..OpenMeteoConfig::default()
/// };
/// assert_eq!(config.geocoding_url, "https://geocoding-api.open-meteo.com/v1/search");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OpenMeteoConfig {
    pub ensemble_url: String,
    pub forecast_url: String,
    pub history_url: String,
    pub climate_url: String,
    pub geocoding_url: String,
    pub user_agent: String,
}

impl Default for OpenMeteoConfig {
    fn default() -> Self {
        Self {
            ensemble_url: Endpoint::Ensemble.default_url().to_string(),
            forecast_url: Endpoint::Forecast.default_url().to_string(),
            history_url: Endpoint::History.default_url().to_string(),
            climate_url: Endpoint::Climate.default_url().to_string(),
            geocoding_url: GEOCODING_URL.to_string(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"))
                .to_string(),
        }
    }
}

/// Client for the Open-Meteo APIs.
///
/// Every call is a single blocking GET; the client keeps no state between
/// calls and can be shared across threads. Do not create or call it from
/// inside an async runtime without `spawn_blocking`, as with any
/// `reqwest::blocking` client.
///
/// # Examples
///
/// ```no_run
/// # use openmeteo::{OpenMeteo, OpenMeteoError};
/// # fn main() -> Result<(), OpenMeteoError> {
/// let client = OpenMeteo::new()?;
/// let table = client
///     .ensemble_forecast()
///     .location((52.52, 13.41))
///     .hourly(&["temperature_2m"])
///     .call()?;
/// println!("{}", table.frame);
/// # Ok(())
/// # }
/// ```
pub struct OpenMeteo {
    http: Client,
    config: OpenMeteoConfig,
    geocoder: Box<dyn Geocoder>,
}

#[bon]
impl OpenMeteo {
    /// Creates a client for the public Open-Meteo services.
    ///
    /// # Errors
    ///
    /// Returns [`OpenMeteoError::HttpClient`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, OpenMeteoError> {
        Self::with_config(OpenMeteoConfig::default())
    }

    /// Creates a client with custom base URLs or user agent. Place names are
    /// resolved with an [`OpenMeteoGeocoder`] at `config.geocoding_url`.
    pub fn with_config(config: OpenMeteoConfig) -> Result<Self, OpenMeteoError> {
        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(OpenMeteoError::HttpClient)?;
        let geocoder = OpenMeteoGeocoder::new(http.clone(), config.geocoding_url.clone());
        Ok(Self {
            http,
            config,
            geocoder: Box::new(geocoder),
        })
    }

    /// Replaces the geocoder used for [`Location::PlaceName`] locations.
    pub fn with_geocoder(mut self, geocoder: impl Geocoder + 'static) -> Self {
        self.geocoder = Box::new(geocoder);
        self
    }

    pub fn config(&self) -> &OpenMeteoConfig {
        &self.config
    }

    /// Fetches an ensemble forecast: one column per variable and ensemble member.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.location(impl Into<Location>)`: **Required.** Coordinates ([`crate::LatLon`] or
    ///   `(lat, lon)`) or a place name, which is resolved through the geocoder.
    /// * `.start(impl Into<DateArg>)` / `.end(..)`: Optional. `YYYY-MM-DD` text or a `NaiveDate`.
    ///   When absent the service picks its default window.
    /// * `.hourly(&[&str])`: Optional. Hourly variables, e.g. `temperature_2m`.
    /// * `.daily(&[&str])`: Optional. Daily variables. At least one of `hourly`
    ///   and `daily` must be non-empty.
    /// * `.response_units(ResponseUnits)`: Optional. Unit preferences per category.
    /// * `.model(impl Into<String>)`: Optional. Ensemble model, e.g. `gfs_seamless`.
    /// * `.timezone(impl Into<String>)`: Optional. IANA name; defaults to `auto`
    ///   (the location's own timezone).
    ///
    /// # Errors
    ///
    /// [`OpenMeteoError::Validation`] before any network activity,
    /// [`OpenMeteoError::Geocoding`] if a place name cannot be resolved,
    /// [`OpenMeteoError::Transport`] for a non-success status,
    /// [`OpenMeteoError::Network`] if the server cannot be reached, and
    /// [`OpenMeteoError::MalformedResponse`] if the body is not the expected shape.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use openmeteo::{OpenMeteo, OpenMeteoError, LatLon, ResponseUnits, TemperatureUnit};
    /// # fn main() -> Result<(), OpenMeteoError> {
    /// let client = OpenMeteo::new()?;
    /// let table = client
    ///     .ensemble_forecast()
    ///     .location(LatLon(39.0, -86.0))
    ///     .start("2024-06-01")
    ///     .end("2024-06-07")
    ///     .hourly(&["temperature_2m", "precipitation"])
    ///     .model("gfs_seamless")
    ///     .response_units(
    ///         ResponseUnits::builder()
    ///             .temperature(TemperatureUnit::Fahrenheit)
    ///             .build(),
    ///     )
    ///     .call()?;
    ///
    /// // datetime + 2 variables x 31 members
    /// assert_eq!(table.width(), 63);
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub fn ensemble_forecast(
        &self,
        #[builder(into)] location: Location,
        #[builder(into)] start: Option<DateArg>,
        #[builder(into)] end: Option<DateArg>,
        hourly: Option<&[&str]>,
        daily: Option<&[&str]>,
        response_units: Option<ResponseUnits>,
        #[builder(into)] model: Option<String>,
        #[builder(into)] timezone: Option<String>,
    ) -> Result<ResponseTable, OpenMeteoError> {
        let endpoint = EndpointConfig::new(Endpoint::Ensemble, &self.config.ensemble_url);
        let raw = RawRequest {
            start,
            end,
            hourly: hourly.unwrap_or_default(),
            daily: daily.unwrap_or_default(),
            response_units,
            model,
            timezone: Some(timezone.unwrap_or_else(|| DEFAULT_TIMEZONE.to_string())),
            // The ensemble API has no bias-correction switch.
            downscaling: None,
        };
        self.fetch(&endpoint, location, &raw)
    }

    /// Fetches a deterministic forecast. Same arguments as
    /// [`OpenMeteo::ensemble_forecast`]; `model` selects the weather model.
    #[builder]
    pub fn weather_forecast(
        &self,
        #[builder(into)] location: Location,
        #[builder(into)] start: Option<DateArg>,
        #[builder(into)] end: Option<DateArg>,
        hourly: Option<&[&str]>,
        daily: Option<&[&str]>,
        response_units: Option<ResponseUnits>,
        #[builder(into)] model: Option<String>,
        #[builder(into)] timezone: Option<String>,
    ) -> Result<ResponseTable, OpenMeteoError> {
        let endpoint = EndpointConfig::new(Endpoint::Forecast, &self.config.forecast_url);
        let raw = RawRequest {
            start,
            end,
            hourly: hourly.unwrap_or_default(),
            daily: daily.unwrap_or_default(),
            response_units,
            model,
            timezone: Some(timezone.unwrap_or_else(|| DEFAULT_TIMEZONE.to_string())),
            downscaling: None,
        };
        self.fetch(&endpoint, location, &raw)
    }

    /// Fetches reanalysis history from the archive API. Same arguments as
    /// [`OpenMeteo::ensemble_forecast`]; the archive expects `start` and `end`.
    #[builder]
    pub fn weather_history(
        &self,
        #[builder(into)] location: Location,
        #[builder(into)] start: Option<DateArg>,
        #[builder(into)] end: Option<DateArg>,
        hourly: Option<&[&str]>,
        daily: Option<&[&str]>,
        response_units: Option<ResponseUnits>,
        #[builder(into)] model: Option<String>,
        #[builder(into)] timezone: Option<String>,
    ) -> Result<ResponseTable, OpenMeteoError> {
        let endpoint = EndpointConfig::new(Endpoint::History, &self.config.history_url);
        let raw = RawRequest {
            start,
            end,
            hourly: hourly.unwrap_or_default(),
            daily: daily.unwrap_or_default(),
            response_units,
            model,
            timezone: Some(timezone.unwrap_or_else(|| DEFAULT_TIMEZONE.to_string())),
            downscaling: None,
        };
        self.fetch(&endpoint, location, &raw)
    }

    /// Fetches downscaled climate projections (daily only).
    ///
    /// `downscaling(false)` asks for raw model output; when omitted the
    /// service default (downscaled) applies.
    #[builder]
    pub fn climate_forecast(
        &self,
        #[builder(into)] location: Location,
        #[builder(into)] start: Option<DateArg>,
        #[builder(into)] end: Option<DateArg>,
        daily: Option<&[&str]>,
        response_units: Option<ResponseUnits>,
        #[builder(into)] model: Option<String>,
        downscaling: Option<bool>,
    ) -> Result<ResponseTable, OpenMeteoError> {
        let endpoint = EndpointConfig::new(Endpoint::Climate, &self.config.climate_url);
        let raw = RawRequest {
            start,
            end,
            hourly: &[],
            daily: daily.unwrap_or_default(),
            response_units,
            model,
            timezone: None,
            downscaling,
        };
        self.fetch(&endpoint, location, &raw)
    }

    /// validate -> resolve -> build -> transport -> flatten
    fn fetch(
        &self,
        endpoint: &EndpointConfig,
        location: Location,
        raw: &RawRequest<'_>,
    ) -> Result<ResponseTable, OpenMeteoError> {
        let request = validate(endpoint, raw)?;

        let coordinates = match location {
            Location::Coordinates(coordinates) => validate_coordinates(coordinates)?,
            Location::PlaceName(name) => validate_coordinates(self.geocoder.resolve(&name)?)?,
        };

        let query = build_query(&request, coordinates);
        let url = build_url(endpoint, &query)?;
        debug!(
            "{} request for {} with {} hourly and {} daily variables",
            endpoint.endpoint,
            coordinates,
            request.hourly.len(),
            request.daily.len()
        );

        let body = get_json(&self.http, url)?;
        flatten_response(body, &request.hourly, &request.daily)
    }
}
