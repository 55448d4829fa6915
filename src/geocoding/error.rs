use crate::error::OpenMeteoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeocodingError {
    #[error("No coordinates found for place '{0}'")]
    NotFound(String),

    #[error("Geocoding lookup for '{name}' failed")]
    Lookup {
        name: String,
        #[source]
        source: Box<OpenMeteoError>,
    },
}
