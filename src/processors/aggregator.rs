use crate::models::{CleanedStationDay, RegionDaySummary};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Running mean over the non-missing values of one field
#[derive(Debug, Default, Clone, Copy)]
struct MeanAccumulator {
    sum: f64,
    count: usize,
}

impl MeanAccumulator {
    fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.count += 1;
        }
    }

    fn finish(self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

#[derive(Debug, Default)]
struct DayAccumulator {
    mean_temp: MeanAccumulator,
    max_temp: Option<f64>,
    min_temp: Option<f64>,
    mean_precip: MeanAccumulator,
    mean_wind_speed: MeanAccumulator,
}

impl DayAccumulator {
    fn push(&mut self, record: &CleanedStationDay) {
        self.mean_temp.push(record.mean_temp);
        self.max_temp = max_skip_missing(self.max_temp, record.max_temp);
        self.min_temp = min_skip_missing(self.min_temp, record.min_temp);
        self.mean_precip.push(record.mean_precip);
        self.mean_wind_speed.push(record.mean_wind_speed);
    }

    fn finish(self, date: NaiveDate) -> RegionDaySummary {
        RegionDaySummary {
            date,
            mean_temp: self.mean_temp.finish(),
            max_temp: self.max_temp,
            min_temp: self.min_temp,
            mean_precip: self.mean_precip.finish(),
            mean_wind_speed: self.mean_wind_speed.finish(),
        }
    }
}

fn max_skip_missing(current: Option<f64>, value: Option<f64>) -> Option<f64> {
    match (current, value) {
        (Some(c), Some(v)) => Some(c.max(v)),
        (c, v) => c.or(v),
    }
}

fn min_skip_missing(current: Option<f64>, value: Option<f64>) -> Option<f64> {
    match (current, value) {
        (Some(c), Some(v)) => Some(c.min(v)),
        (c, v) => c.or(v),
    }
}

/// Collapses many stations' cleaned records into one summary per date.
pub struct YearlyAggregator;

impl YearlyAggregator {
    pub fn new() -> Self {
        Self
    }

    /// One summary per distinct date in `records`, in ascending date order.
    pub fn aggregate(&self, records: &[CleanedStationDay]) -> Vec<RegionDaySummary> {
        let mut days: BTreeMap<NaiveDate, DayAccumulator> = BTreeMap::new();

        for record in records {
            days.entry(record.date).or_default().push(record);
        }

        days.into_iter()
            .map(|(date, accumulator)| accumulator.finish(date))
            .collect()
    }
}

impl Default for YearlyAggregator {
    fn default() -> Self {
        Self::new()
    }
}
