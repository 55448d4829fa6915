//! Location types accepted by every endpoint builder.

use std::fmt;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
/// Both values are represented as `f64`.
///
/// # Examples
///
/// ```
/// use openmeteo::LatLon;
///
/// let indianapolis = LatLon(39.0, -86.0);
/// assert_eq!(indianapolis.0, 39.0); // Latitude
/// assert_eq!(indianapolis.1, -86.0); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    pub fn latitude(&self) -> f64 {
        self.0
    }

    pub fn longitude(&self) -> f64 {
        self.1
    }

    /// Returns `true` when both components lie within the WGS84 ranges
    /// (latitude -90..=90, longitude -180..=180).
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.0) && (-180.0..=180.0).contains(&self.1)
    }
}

impl From<(f64, f64)> for LatLon {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        LatLon(latitude, longitude)
    }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

/// Where to fetch weather for.
///
/// Either explicit coordinates or a place name. A place name is resolved to
/// coordinates by the client's [`crate::Geocoder`] before the request is built.
///
/// Every builder takes `impl Into<Location>`, so coordinates, tuples and strings
/// can be passed directly:
///
/// ```
/// use openmeteo::{LatLon, Location};
///
/// assert_eq!(Location::from(LatLon(39.0, -86.0)), Location::Coordinates(LatLon(39.0, -86.0)));
/// assert_eq!(Location::from((39.0, -86.0)), Location::Coordinates(LatLon(39.0, -86.0)));
/// assert_eq!(Location::from("Indianapolis"), Location::PlaceName("Indianapolis".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    Coordinates(LatLon),
    PlaceName(String),
}

impl From<LatLon> for Location {
    fn from(value: LatLon) -> Self {
        Location::Coordinates(value)
    }
}

impl From<(f64, f64)> for Location {
    fn from(value: (f64, f64)) -> Self {
        Location::Coordinates(value.into())
    }
}

impl From<&str> for Location {
    fn from(value: &str) -> Self {
        Location::PlaceName(value.to_string())
    }
}

impl From<String> for Location {
    fn from(value: String) -> Self {
        Location::PlaceName(value)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Coordinates(coordinates) => write!(f, "{}", coordinates),
            Location::PlaceName(name) => write!(f, "'{}'", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_lon_validity() {
        assert!(LatLon(39.0, -86.0).is_valid());
        assert!(LatLon(90.0, 180.0).is_valid());
        assert!(LatLon(-90.0, -180.0).is_valid());
        assert!(!LatLon(90.5, 0.0).is_valid());
        assert!(!LatLon(0.0, -180.1).is_valid());
        assert!(!LatLon(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_location_display() {
        assert_eq!(Location::from((52.52, 13.4)).to_string(), "(52.52, 13.4)");
        assert_eq!(Location::from("Berlin").to_string(), "'Berlin'");
    }
}
