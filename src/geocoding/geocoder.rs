//! Resolution of place names into coordinates.

use crate::error::OpenMeteoError;
use crate::geocoding::error::GeocodingError;
use crate::request::query::build_raw_url;
use crate::response::error::MalformedResponseError;
use crate::transport::get_json;
use crate::types::location::LatLon;
use log::debug;
use reqwest::blocking::Client;
use serde::Deserialize;

pub const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

/// Turns a place name into coordinates.
///
/// The client calls this only for [`crate::Location::PlaceName`] locations, after
/// the request passed validation. Any closure with the right signature is a
/// geocoder too:
///
/// ```
/// use openmeteo::{GeocodingError, Geocoder, LatLon};
///
/// let fixed = |name: &str| match name {
///     "Indianapolis" => Ok(LatLon(39.77, -86.16)),
///     other => Err(GeocodingError::NotFound(other.to_string())),
/// };
/// assert_eq!(fixed.resolve("Indianapolis").unwrap(), LatLon(39.77, -86.16));
/// ```
pub trait Geocoder: Send + Sync {
    fn resolve(&self, name: &str) -> Result<LatLon, GeocodingError>;
}

impl<F> Geocoder for F
where
    F: Fn(&str) -> Result<LatLon, GeocodingError> + Send + Sync,
{
    fn resolve(&self, name: &str) -> Result<LatLon, GeocodingError> {
        self(name)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Place>,
}

#[derive(Debug, Deserialize)]
struct Place {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
}

/// Geocoder backed by the Open-Meteo geocoding API. Takes the best match.
#[derive(Debug, Clone)]
pub struct OpenMeteoGeocoder {
    client: Client,
    base_url: String,
    language: String,
}

impl OpenMeteoGeocoder {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            language: "en".to_string(),
        }
    }

    /// Language used to match place names, `en` by default.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    fn search(&self, name: &str) -> Result<Option<Place>, OpenMeteoError> {
        let url = build_raw_url(
            &self.base_url,
            &[
                ("name", name.to_string()),
                ("count", "1".to_string()),
                ("language", self.language.clone()),
                ("format", "json".to_string()),
            ],
        )?;
        let body = get_json(&self.client, url)?;
        let response: SearchResponse =
            serde_json::from_value(body).map_err(MalformedResponseError::Envelope)?;
        Ok(response.results.into_iter().next())
    }
}

impl Geocoder for OpenMeteoGeocoder {
    fn resolve(&self, name: &str) -> Result<LatLon, GeocodingError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GeocodingError::NotFound(name.to_string()));
        }

        let place = self
            .search(name)
            .map_err(|e| GeocodingError::Lookup {
                name: name.to_string(),
                source: Box::new(e),
            })?
            .ok_or_else(|| GeocodingError::NotFound(name.to_string()))?;

        debug!(
            "Resolved '{}' to {}, {} ({}, {})",
            name,
            place.name,
            place.country.as_deref().unwrap_or("-"),
            place.latitude,
            place.longitude
        );
        Ok(LatLon(place.latitude, place.longitude))
    }
}
