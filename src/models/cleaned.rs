use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A station-day after sentinel removal and conversion to Celsius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedStationDay {
    #[serde(rename = "DATE")]
    pub date: NaiveDate,

    #[serde(rename = "Mean_Temp")]
    pub mean_temp: Option<f64>,

    #[serde(rename = "Max_Temp")]
    pub max_temp: Option<f64>,

    #[serde(rename = "Min_Temp")]
    pub min_temp: Option<f64>,

    #[serde(rename = "Mean_Precip")]
    pub mean_precip: Option<f64>,

    #[serde(rename = "Mean_WindSpeed")]
    pub mean_wind_speed: Option<f64>,
}
