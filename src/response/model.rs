use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Top level of every single-location Open-Meteo response.
///
/// The `hourly` / `daily` blocks stay dynamic: their keys depend on the
/// requested variables and, for ensembles, on the members the model has.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: Option<f64>,
    #[serde(rename = "generationtime_ms")]
    pub generation_time_ms: Option<f64>,
    #[serde(default)]
    pub utc_offset_seconds: i32,
    pub timezone: Option<String>,
    pub timezone_abbreviation: Option<String>,
    pub hourly: Option<Map<String, Value>>,
    #[serde(default)]
    pub hourly_units: HashMap<String, String>,
    pub daily: Option<Map<String, Value>>,
    #[serde(default)]
    pub daily_units: HashMap<String, String>,
}
