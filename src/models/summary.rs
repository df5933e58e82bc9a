use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Cross-station reduction of one region's readings for one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionDaySummary {
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

impl RegionDaySummary {
    pub fn has_temperature_data(&self) -> bool {
        self.mean_temp.is_some() || self.max_temp.is_some() || self.min_temp.is_some()
    }
}

/// A row of the combined table: a region summary tagged with its region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocatedSummary {
    #[serde(flatten)]
    pub summary: RegionDaySummary,

    #[serde(rename = "Location")]
    pub location: String,
}

impl LocatedSummary {
    pub fn new(location: impl Into<String>, summary: RegionDaySummary) -> Self {
        Self {
            summary,
            location: location.into(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.summary.date
    }
}
