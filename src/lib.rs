mod error;
mod geocoding;
mod open_meteo;
mod request;
mod response;
mod transport;
mod types;

pub use error::OpenMeteoError;
pub use open_meteo::*;

pub use geocoding::error::GeocodingError;
pub use geocoding::geocoder::{Geocoder, OpenMeteoGeocoder, GEOCODING_URL};
pub use request::error::ValidationError;
pub use response::error::MalformedResponseError;

pub use types::date_arg::DateArg;
pub use types::endpoint::*;
pub use types::location::{LatLon, Location};
pub use types::resolution::Resolution;
pub use types::response_table::*;
pub use types::units::*;
