use crate::error::{ProcessingError, Result};
use crate::models::{LocatedSummary, RegionDaySummary};
use crate::utils::constants::{
    COMPRESSION_GZIP, COMPRESSION_LZ4, COMPRESSION_NONE, COMPRESSION_SNAPPY, COMPRESSION_ZSTD,
    DEFAULT_ROW_GROUP_SIZE,
};
use arrow::array::*;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, NaiveDate};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, GzipLevel, ZstdLevel};
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

/// Days from 0001-01-01 (CE day 1) to 1970-01-01
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

fn date_to_date32(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

fn date32_to_date(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days + UNIX_EPOCH_DAYS_FROM_CE)
}

pub struct ParquetWriter {
    compression: Compression,
    row_group_size: usize,
}

impl ParquetWriter {
    pub fn new() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
        }
    }

    pub fn with_compression(mut self, compression: &str) -> Result<Self> {
        self.compression = match compression.to_lowercase().as_str() {
            COMPRESSION_SNAPPY => Compression::SNAPPY,
            COMPRESSION_GZIP => Compression::GZIP(GzipLevel::default()),
            COMPRESSION_LZ4 => Compression::LZ4,
            COMPRESSION_ZSTD => Compression::ZSTD(ZstdLevel::default()),
            COMPRESSION_NONE => Compression::UNCOMPRESSED,
            _ => {
                return Err(ProcessingError::Config(format!(
                    "Unsupported compression: {}",
                    compression
                )))
            }
        };
        Ok(self)
    }

    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Write the combined region table to a Parquet file
    pub fn write_records(&self, records: &[LocatedSummary], path: &Path) -> Result<()> {
        self.write_records_batched(records, path, records.len().max(1))
    }

    /// Write records in batches for memory efficiency
    pub fn write_records_batched(
        &self,
        records: &[LocatedSummary],
        path: &Path,
        batch_size: usize,
    ) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let schema = self.create_schema();
        let file = File::create(path)?;
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;

        for chunk in records.chunks(batch_size.max(1)) {
            let batch = self.records_to_batch(chunk, schema.clone())?;
            writer.write(&batch)?;
        }

        writer.close()?;
        Ok(())
    }

    /// Arrow schema of the combined region table; readings are nullable
    fn create_schema(&self) -> Arc<Schema> {
        let fields = vec![
            Field::new("date", DataType::Date32, false),
            Field::new("mean_temp", DataType::Float64, true),
            Field::new("max_temp", DataType::Float64, true),
            Field::new("min_temp", DataType::Float64, true),
            Field::new("mean_precip", DataType::Float64, true),
            Field::new("mean_wind_speed", DataType::Float64, true),
            Field::new("location", DataType::Utf8, false),
        ];

        Arc::new(Schema::new(fields))
    }

    fn records_to_batch(
        &self,
        records: &[LocatedSummary],
        schema: Arc<Schema>,
    ) -> Result<RecordBatch> {
        let dates: Vec<i32> = records.iter().map(|r| date_to_date32(r.date())).collect();
        let mean_temps: Vec<Option<f64>> = records.iter().map(|r| r.summary.mean_temp).collect();
        let max_temps: Vec<Option<f64>> = records.iter().map(|r| r.summary.max_temp).collect();
        let min_temps: Vec<Option<f64>> = records.iter().map(|r| r.summary.min_temp).collect();
        let mean_precips: Vec<Option<f64>> =
            records.iter().map(|r| r.summary.mean_precip).collect();
        let mean_wind_speeds: Vec<Option<f64>> =
            records.iter().map(|r| r.summary.mean_wind_speed).collect();
        let locations: Vec<&str> = records.iter().map(|r| r.location.as_str()).collect();

        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Date32Array::from(dates)) as ArrayRef,
                Arc::new(Float64Array::from(mean_temps)),
                Arc::new(Float64Array::from(max_temps)),
                Arc::new(Float64Array::from(min_temps)),
                Arc::new(Float64Array::from(mean_precips)),
                Arc::new(Float64Array::from(mean_wind_speeds)),
                Arc::new(StringArray::from(locations)),
            ],
        )?;

        Ok(batch)
    }

    /// Read up to `limit` records back from a Parquet file written by this writer
    pub fn read_records(&self, path: &Path, limit: usize) -> Result<Vec<LocatedSummary>> {
        let file = File::open(path)?;
        let parquet_reader = ParquetRecordBatchReaderBuilder::try_new(file)?
            .with_batch_size(limit.clamp(1, 8192))
            .build()?;

        let mut records = Vec::new();

        for batch_result in parquet_reader {
            let batch = batch_result?;

            let dates = batch
                .column_by_name("date")
                .and_then(|c| c.as_any().downcast_ref::<Date32Array>())
                .ok_or_else(|| ProcessingError::InvalidFormat("Invalid date column type".to_string()))?;
            let mean_temps = float_column(&batch, "mean_temp")?;
            let max_temps = float_column(&batch, "max_temp")?;
            let min_temps = float_column(&batch, "min_temp")?;
            let mean_precips = float_column(&batch, "mean_precip")?;
            let mean_wind_speeds = float_column(&batch, "mean_wind_speed")?;
            let locations = batch
                .column_by_name("location")
                .and_then(|c| c.as_any().downcast_ref::<StringArray>())
                .ok_or_else(|| {
                    ProcessingError::InvalidFormat("Invalid location column type".to_string())
                })?;

            for i in 0..batch.num_rows() {
                if records.len() >= limit {
                    return Ok(records);
                }

                let date = date32_to_date(dates.value(i)).ok_or_else(|| {
                    ProcessingError::InvalidFormat("Invalid date in Parquet file".to_string())
                })?;

                records.push(LocatedSummary::new(
                    locations.value(i),
                    RegionDaySummary {
                        date,
                        mean_temp: optional_value(mean_temps, i),
                        max_temp: optional_value(max_temps, i),
                        min_temp: optional_value(min_temps, i),
                        mean_precip: optional_value(mean_precips, i),
                        mean_wind_speed: optional_value(mean_wind_speeds, i),
                    },
                ));
            }
        }

        Ok(records)
    }

    /// Get file statistics
    pub fn get_file_info(&self, path: &Path) -> Result<ParquetFileInfo> {
        use parquet::file::reader::{FileReader, SerializedFileReader};

        let file = File::open(path)?;
        let reader = SerializedFileReader::new(file)?;
        let metadata = reader.metadata();

        let file_metadata = metadata.file_metadata();
        let row_groups = metadata.num_row_groups();
        let total_rows = file_metadata.num_rows();
        let file_size = std::fs::metadata(path)?.len();

        let row_group_sizes = (0..row_groups)
            .map(|i| metadata.row_group(i).num_rows())
            .collect();

        Ok(ParquetFileInfo {
            total_rows,
            row_groups: row_groups as i32,
            row_group_sizes,
            file_size,
            compression: self.compression,
        })
    }
}

fn float_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Float64Array> {
    batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<Float64Array>())
        .ok_or_else(|| ProcessingError::InvalidFormat(format!("Invalid {} column type", name)))
}

fn optional_value(array: &Float64Array, index: usize) -> Option<f64> {
    (!array.is_null(index)).then(|| array.value(index))
}

impl Default for ParquetWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct ParquetFileInfo {
    pub total_rows: i64,
    pub row_groups: i32,
    pub row_group_sizes: Vec<i64>,
    pub file_size: u64,
    pub compression: Compression,
}

impl ParquetFileInfo {
    pub fn summary(&self) -> String {
        format!(
            "Parquet File Summary:\n\
            - Total rows: {}\n\
            - Row groups: {}\n\
            - File size: {:.2} MB\n\
            - Compression: {:?}\n\
            - Avg rows per group: {:.0}",
            self.total_rows,
            self.row_groups,
            self.file_size as f64 / 1_048_576.0, // Convert to MB
            self.compression,
            self.total_rows as f64 / self.row_groups.max(1) as f64
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    fn sample_record(location: &str, day: u32) -> LocatedSummary {
        LocatedSummary::new(
            location,
            RegionDaySummary {
                date: NaiveDate::from_ymd_opt(2020, 7, day).unwrap(),
                mean_temp: Some(21.5),
                max_temp: Some(28.3),
                min_temp: None,
                mean_precip: Some(0.04),
                mean_wind_speed: None,
            },
        )
    }

    #[test]
    fn test_date32_conversion() {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        assert_eq!(date_to_date32(epoch), 0);
        assert_eq!(date32_to_date(0), Some(epoch));
        assert_eq!(
            date_to_date32(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()),
            18262
        );
    }

    #[test]
    fn test_write_empty_records() {
        let writer = ParquetWriter::new();
        let temp_file = NamedTempFile::new().unwrap();

        let result = writer.write_records(&[], temp_file.path());
        assert!(result.is_ok());
    }

    #[test]
    fn test_write_and_read_back_with_nulls() -> Result<()> {
        let writer = ParquetWriter::new();
        let temp_file = NamedTempFile::new()?;
        let records = vec![sample_record("coastal", 1), sample_record("inland", 2)];

        writer.write_records(&records, temp_file.path())?;

        let info = writer.get_file_info(temp_file.path())?;
        assert_eq!(info.total_rows, 2);

        let read_back = writer.read_records(temp_file.path(), 10)?;
        assert_eq!(read_back, records);

        let limited = writer.read_records(temp_file.path(), 1)?;
        assert_eq!(limited.len(), 1);

        Ok(())
    }

    #[test]
    fn test_batched_write_keeps_all_rows() -> Result<()> {
        let writer = ParquetWriter::new().with_row_group_size(4);
        let temp_file = NamedTempFile::new()?;
        let records: Vec<LocatedSummary> = (1..=10).map(|d| sample_record("coastal", d)).collect();

        writer.write_records_batched(&records, temp_file.path(), 3)?;

        let info = writer.get_file_info(temp_file.path())?;
        assert_eq!(info.total_rows, 10);
        assert!(info.row_groups >= 3);

        Ok(())
    }

    #[test]
    fn test_different_compressions() -> Result<()> {
        let compressions = ["snappy", "gzip", "lz4", "zstd", "none"];

        for compression in &compressions {
            let writer = ParquetWriter::new().with_compression(compression)?;
            let temp_file = NamedTempFile::new().unwrap();

            let result = writer.write_records(&[sample_record("coastal", 1)], temp_file.path());
            assert!(result.is_ok(), "Failed with compression: {}", compression);
        }

        assert!(ParquetWriter::new().with_compression("brotli9").is_err());

        Ok(())
    }
}
