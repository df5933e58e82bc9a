use crate::error::{ProcessingError, Result};
use crate::models::RawStationDay;
use crate::utils::constants::DEFAULT_BUFFER_SIZE;
use csv::{ReaderBuilder, Trim};
use std::io::{BufReader, Read};
use std::path::Path;

/// Parses GSOD per-station CSV content into raw station-day records.
/// Cells are trimmed, so GSOD's space-padded numbers parse as-is.
pub struct RecordReader;

impl RecordReader {
    pub fn new() -> Self {
        Self
    }

    /// Read every record from `reader`. `source` names the input in errors.
    pub fn read_records<R: Read>(&self, reader: R, source: &Path) -> Result<Vec<RawStationDay>> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .from_reader(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, reader));

        let headers = csv_reader.headers()?.clone();
        for column in RawStationDay::REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(ProcessingError::MissingColumn {
                    column: column.to_string(),
                    path: source.to_path_buf(),
                });
            }
        }

        let mut records = Vec::new();
        for record in csv_reader.deserialize::<RawStationDay>() {
            records.push(record?);
        }

        Ok(records)
    }
}

impl Default for RecordReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GSOD_SAMPLE: &str = "\
\"STATION\",\"DATE\",\"LATITUDE\",\"TEMP\",\"TEMP_ATTRIBUTES\",\"MAX\",\"MAX_ATTRIBUTES\",\"MIN\",\"MIN_ATTRIBUTES\",\"PRCP\",\"PRCP_ATTRIBUTES\",\"WDSP\",\"WDSP_ATTRIBUTES\"
\"01001099999\",\"2020-01-01\",\"70.93\",\"  28.4\",\" 24\",\"  33.8\",\"*\",\"  24.1\",\" \",\" 0.00\",\"G\",\"  14.2\",\" 24\"
\"01001099999\",\"2020-01-02\",\"70.93\",\"9999.9\",\"  0\",\"  35.6\",\"*\",\"9999.9\",\" \",\"99.99\",\" \",\"999.9\",\"  0\"
";

    #[test]
    fn test_read_gsod_records() -> Result<()> {
        let reader = RecordReader::new();
        let records = reader.read_records(GSOD_SAMPLE.as_bytes(), Path::new("01001099999.csv"))?;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, "2020-01-01");
        assert_eq!(records[0].temp, Some(28.4));
        assert_eq!(records[0].max, Some(33.8));
        assert_eq!(records[0].min, Some(24.1));
        assert_eq!(records[0].prcp, Some(0.0));
        assert_eq!(records[0].wdsp, Some(14.2));
        assert_eq!(records[1].temp, Some(9999.9));
        assert_eq!(records[1].wdsp, Some(999.9));

        Ok(())
    }

    #[test]
    fn test_empty_cells_are_missing() -> Result<()> {
        let content = "DATE,TEMP,MAX,MIN,PRCP,WDSP\n2020-01-01,50.0,,40.0,,3.1\n";
        let records = RecordReader::new().read_records(content.as_bytes(), Path::new("x.csv"))?;

        assert_eq!(records[0].max, None);
        assert_eq!(records[0].prcp, None);
        assert_eq!(records[0].wdsp, Some(3.1));

        Ok(())
    }

    #[test]
    fn test_missing_required_column() {
        let content = "DATE,TEMP,MAX,MIN,PRCP\n2020-01-01,50.0,55.0,40.0,0.1\n";
        let result = RecordReader::new().read_records(content.as_bytes(), Path::new("x.csv"));

        assert!(matches!(
            result,
            Err(ProcessingError::MissingColumn { ref column, .. }) if column == "WDSP"
        ));
    }

    #[test]
    fn test_malformed_value_is_error() {
        let content = "DATE,TEMP,MAX,MIN,PRCP,WDSP\n2020-01-01,warm,55.0,40.0,0.1,2.0\n";
        let result = RecordReader::new().read_records(content.as_bytes(), Path::new("x.csv"));

        assert!(matches!(result, Err(ProcessingError::Csv(_))));
    }
}
