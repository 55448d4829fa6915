use crate::types::units::UnitCategory;
use thiserror::Error;

/// A request that was rejected locally, before any network activity.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("No measurement variables supplied: request at least one hourly or daily variable")]
    NoVariables,

    #[error("Invalid date format for {field}: '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { field: &'static str, value: String },

    #[error("Invalid coordinates ({latitude}, {longitude}): latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    #[error("Unknown {category} value '{value}'")]
    UnknownUnit {
        category: UnitCategory,
        value: String,
    },
}
