use crate::types::resolution::Resolution;
use thiserror::Error;

/// The API answered with a success status, but the body does not have the
/// shape the flattener relies on.
#[derive(Debug, Error)]
pub enum MalformedResponseError {
    #[error("Response body from {url} is not valid JSON")]
    InvalidJson {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Response body does not match the expected structure")]
    Envelope(#[source] serde_json::Error),

    #[error("Response has no '{0}' block although {0} variables were requested")]
    MissingBlock(Resolution),

    #[error("The {0} block has no 'time' array")]
    MissingTime(Resolution),

    #[error("Invalid {resolution} timestamp '{value}'")]
    InvalidTimestamp { resolution: Resolution, value: String },

    #[error("Requested {resolution} variable '{variable}' is missing from the response")]
    MissingVariable {
        resolution: Resolution,
        variable: String,
    },

    #[error("The {resolution} key '{key}' has a member number that cannot be read")]
    InvalidMemberKey { resolution: Resolution, key: String },

    #[error("The {resolution} entry '{key}' is not an array")]
    NotAnArray { resolution: Resolution, key: String },

    #[error("The {resolution} array '{key}' has {found} values but the time index has {expected}")]
    LengthMismatch {
        resolution: Resolution,
        key: String,
        expected: usize,
        found: usize,
    },

    #[error("The {resolution} array '{key}' holds an unsupported value: {value}")]
    UnsupportedValue {
        resolution: Resolution,
        key: String,
        value: String,
    },
}
