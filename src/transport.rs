use crate::error::OpenMeteoError;
use crate::response::error::MalformedResponseError;
use log::{info, warn};
use reqwest::blocking::Client;
use reqwest::Url;
use serde_json::Value;

/// Performs one blocking GET and parses the body as JSON.
///
/// Non-success statuses are returned as [`OpenMeteoError::Transport`] with the
/// body verbatim (Open-Meteo explains rejected parameters in it). There are no
/// retries and no timeout beyond the client's defaults.
pub(crate) fn get_json(client: &Client, url: Url) -> Result<Value, OpenMeteoError> {
    info!("Requesting {}", url);
    let url_string = url.to_string();

    let response = client
        .get(url)
        .send()
        .map_err(|e| OpenMeteoError::Network {
            url: url_string.clone(),
            source: e,
        })?;

    let status = response.status();
    let body = response.text().map_err(|e| OpenMeteoError::Network {
        url: url_string.clone(),
        source: e,
    })?;

    if !status.is_success() {
        warn!("HTTP {} for {}: {}", status, url_string, body);
        return Err(OpenMeteoError::Transport {
            url: url_string,
            status,
            body,
        });
    }

    serde_json::from_str(&body).map_err(|e| {
        MalformedResponseError::InvalidJson {
            url: url_string,
            source: e,
        }
        .into()
    })
}
