use serde::{Deserialize, Serialize};

/// One station-day as it appears in a GSOD member file. Temperatures are in
/// Fahrenheit and may hold the 9999.9 sentinel; empty cells are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawStationDay {
    #[serde(rename = "DATE")]
    pub date: String,

    #[serde(rename = "TEMP")]
    pub temp: Option<f64>,

    #[serde(rename = "MAX")]
    pub max: Option<f64>,

    #[serde(rename = "MIN")]
    pub min: Option<f64>,

    #[serde(rename = "PRCP")]
    pub prcp: Option<f64>,

    #[serde(rename = "WDSP")]
    pub wdsp: Option<f64>,
}

impl RawStationDay {
    /// Columns every member file must carry
    pub const REQUIRED_COLUMNS: [&'static str; 6] = ["DATE", "TEMP", "MAX", "MIN", "PRCP", "WDSP"];

    pub fn new(
        date: impl Into<String>,
        temp: f64,
        max: f64,
        min: f64,
        prcp: f64,
        wdsp: f64,
    ) -> Self {
        Self {
            date: date.into(),
            temp: Some(temp),
            max: Some(max),
            min: Some(min),
            prcp: Some(prcp),
            wdsp: Some(wdsp),
        }
    }
}
