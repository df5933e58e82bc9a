use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use validator::Validate;

/// The stations belonging to one analyst-defined region.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StationAllowlist {
    #[validate(length(min = 1))]
    pub region: String,

    pub station_ids: HashSet<String>,
}

impl StationAllowlist {
    pub fn new<I, S>(region: impl Into<String>, station_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            region: region.into(),
            station_ids: station_ids
                .into_iter()
                .map(|id| id.into().trim().to_string())
                .collect(),
        }
    }

    pub fn contains(&self, station_id: &str) -> bool {
        self.station_ids.contains(station_id)
    }

    pub fn len(&self) -> usize {
        self.station_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.station_ids.is_empty()
    }
}
