use crate::geocoding::error::GeocodingError;
use crate::request::error::ValidationError;
use crate::response::error::MalformedResponseError;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpenMeteoError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Geocoding(#[from] GeocodingError),

    #[error("HTTP request failed for {url} with status {status}: {body}")]
    Transport {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Network request failed for {url}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error(transparent)]
    MalformedResponse(#[from] MalformedResponseError),

    #[error("Failed to assemble the response DataFrame")]
    DataFrame(#[from] PolarsError),

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Failed to build the HTTP client")]
    HttpClient(#[source] reqwest::Error),
}
