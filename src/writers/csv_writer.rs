use crate::error::Result;
use crate::models::LocatedSummary;
use std::path::Path;

pub const CSV_HEADER: [&str; 7] = [
    "DATE",
    "Mean_Temp",
    "Max_Temp",
    "Min_Temp",
    "Mean_Precip",
    "Mean_WindSpeed",
    "Location",
];

/// Writes the combined region table as CSV. Missing readings are empty cells.
pub struct CsvWriter;

impl CsvWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write_records(&self, records: &[LocatedSummary], path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(CSV_HEADER)?;

        for record in records {
            let summary = &record.summary;
            writer.write_record([
                summary.date.to_string(),
                format_reading(summary.mean_temp),
                format_reading(summary.max_temp),
                format_reading(summary.min_temp),
                format_reading(summary.mean_precip),
                format_reading(summary.mean_wind_speed),
                record.location.clone(),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn format_reading(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RegionDaySummary;
    use chrono::NaiveDate;
    use tempfile::NamedTempFile;

    #[test]
    fn test_write_csv() -> Result<()> {
        let temp_file = NamedTempFile::new()?;
        let records = vec![LocatedSummary::new(
            "coastal",
            RegionDaySummary {
                date: NaiveDate::from_ymd_opt(2020, 1, 2).unwrap(),
                mean_temp: Some(-1.5),
                max_temp: Some(3.0),
                min_temp: None,
                mean_precip: Some(0.12),
                mean_wind_speed: None,
            },
        )];

        CsvWriter::new().write_records(&records, temp_file.path())?;

        let content = std::fs::read_to_string(temp_file.path())?;
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines[0],
            "DATE,Mean_Temp,Max_Temp,Min_Temp,Mean_Precip,Mean_WindSpeed,Location"
        );
        assert_eq!(lines[1], "2020-01-02,-1.5,3,,0.12,,coastal");

        Ok(())
    }
}
