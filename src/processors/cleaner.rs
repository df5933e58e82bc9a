use crate::error::Result;
use crate::models::{CleanedStationDay, RawStationDay};
use crate::utils::constants::{
    GSOD_COMPACT_DATE_FORMAT, GSOD_DATE_FORMAT, PRECIPITATION_SENTINEL, TEMPERATURE_SENTINEL,
    WIND_SPEED_SENTINEL,
};
use crate::utils::units::f2c_opt;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawField {
    Temp,
    Max,
    Min,
    Prcp,
    Wdsp,
}

/// Value each raw field uses to mean "no observation"
pub const SENTINELS: [(RawField, f64); 5] = [
    (RawField::Wdsp, WIND_SPEED_SENTINEL),
    (RawField::Prcp, PRECIPITATION_SENTINEL),
    (RawField::Temp, TEMPERATURE_SENTINEL),
    (RawField::Max, TEMPERATURE_SENTINEL),
    (RawField::Min, TEMPERATURE_SENTINEL),
];

impl RawField {
    pub fn sentinel(self) -> f64 {
        SENTINELS
            .iter()
            .find(|(field, _)| *field == self)
            .map(|(_, sentinel)| *sentinel)
            .unwrap_or(f64::NAN)
    }

    fn value_mut(self, record: &mut RawStationDay) -> &mut Option<f64> {
        match self {
            RawField::Temp => &mut record.temp,
            RawField::Max => &mut record.max,
            RawField::Min => &mut record.min,
            RawField::Prcp => &mut record.prcp,
            RawField::Wdsp => &mut record.wdsp,
        }
    }
}

/// Replace a field's sentinel with `None`, leaving every other value alone
pub fn sentinel_to_missing(value: Option<f64>, sentinel: f64) -> Option<f64> {
    value.filter(|v| *v != sentinel)
}

/// Parse a GSOD DATE cell (`2020-01-31`, or the compact `20200131`)
pub fn parse_gsod_date(value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    match NaiveDate::parse_from_str(value, GSOD_DATE_FORMAT) {
        Ok(date) => Ok(date),
        Err(e) => NaiveDate::parse_from_str(value, GSOD_COMPACT_DATE_FORMAT).map_err(|_| e.into()),
    }
}

/// Turns raw station-day records into cleaned Celsius records, one for one.
pub struct StationRecordCleaner;

impl StationRecordCleaner {
    pub fn new() -> Self {
        Self
    }

    pub fn clean(&self, records: &[RawStationDay]) -> Result<Vec<CleanedStationDay>> {
        records.iter().map(|r| self.clean_record(r)).collect()
    }

    pub fn clean_record(&self, record: &RawStationDay) -> Result<CleanedStationDay> {
        let mut record = record.clone();
        for (field, sentinel) in SENTINELS {
            let value = field.value_mut(&mut record);
            *value = sentinel_to_missing(*value, sentinel);
        }

        let date = parse_gsod_date(&record.date)?;

        Ok(CleanedStationDay {
            date,
            mean_temp: f2c_opt(record.temp),
            max_temp: f2c_opt(record.max),
            min_temp: f2c_opt(record.min),
            mean_precip: record.prcp,
            mean_wind_speed: record.wdsp,
        })
    }
}

impl Default for StationRecordCleaner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProcessingError;
    use crate::utils::units::f2c;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_sentinel_table() {
        assert_eq!(RawField::Wdsp.sentinel(), 999.9);
        assert_eq!(RawField::Prcp.sentinel(), 99.99);
        assert_eq!(RawField::Temp.sentinel(), 9999.9);
        assert_eq!(RawField::Max.sentinel(), 9999.9);
        assert_eq!(RawField::Min.sentinel(), 9999.9);
    }

    #[test]
    fn test_sentinel_to_missing_only_touches_sentinel() {
        assert_eq!(sentinel_to_missing(Some(999.9), 999.9), None);
        assert_eq!(sentinel_to_missing(Some(999.8), 999.9), Some(999.8));
        assert_eq!(sentinel_to_missing(Some(0.0), 99.99), Some(0.0));
        assert_eq!(sentinel_to_missing(None, 99.99), None);
    }

    #[test]
    fn test_clean_record_converts_and_renames() {
        let raw = RawStationDay::new("2020-07-04", 77.0, 86.0, 68.0, 0.12, 5.4);
        let cleaned = StationRecordCleaner::new().clean_record(&raw).unwrap();

        assert_eq!(
            cleaned,
            CleanedStationDay {
                date: date(2020, 7, 4),
                mean_temp: Some(25.0),
                max_temp: Some(30.0),
                min_temp: Some(20.0),
                mean_precip: Some(0.12),
                mean_wind_speed: Some(5.4),
            }
        );
    }

    #[test]
    fn test_temperature_sentinels_become_missing() {
        let raw = RawStationDay::new("2020-01-01", 9999.9, 50.0, 9999.9, 0.0, 3.0);
        let cleaned = StationRecordCleaner::new().clean_record(&raw).unwrap();

        assert_eq!(cleaned.mean_temp, None);
        assert_eq!(cleaned.max_temp, Some(f2c(50.0)));
        assert_eq!(cleaned.min_temp, None);
    }

    #[test]
    fn test_precipitation_and_wind_sentinels_become_missing() {
        let raw = RawStationDay::new("2020-01-01", 50.0, 60.0, 40.0, 99.99, 999.9);
        let cleaned = StationRecordCleaner::new().clean_record(&raw).unwrap();

        assert_eq!(cleaned.mean_precip, None);
        assert_eq!(cleaned.mean_wind_speed, None);
        assert_eq!(cleaned.mean_temp, Some(10.0));
    }

    #[test]
    fn test_sentinels_are_field_specific() {
        // 999.9 is only a sentinel for wind speed
        let raw = RawStationDay::new("2020-01-01", 999.9, 60.0, 40.0, 999.9, 99.99);
        let cleaned = StationRecordCleaner::new().clean_record(&raw).unwrap();

        assert_eq!(cleaned.mean_temp, Some(f2c(999.9)));
        assert_eq!(cleaned.mean_precip, Some(999.9));
        assert_eq!(cleaned.mean_wind_speed, Some(99.99));
    }

    #[test]
    fn test_clean_preserves_row_count() {
        let raw: Vec<RawStationDay> = (1..=31)
            .map(|d| RawStationDay::new(format!("2021-01-{:02}", d), 9999.9, 40.0, 30.0, 99.99, 4.0))
            .collect();
        let cleaned = StationRecordCleaner::new().clean(&raw).unwrap();

        assert_eq!(cleaned.len(), raw.len());
        assert_eq!(cleaned[30].date, date(2021, 1, 31));
    }

    #[test]
    fn test_parse_gsod_date_formats() {
        assert_eq!(parse_gsod_date("2020-02-29").unwrap(), date(2020, 2, 29));
        assert_eq!(parse_gsod_date("20200229").unwrap(), date(2020, 2, 29));
        assert!(matches!(
            parse_gsod_date("29/02/2020"),
            Err(ProcessingError::DateParse(_))
        ));
    }
}
