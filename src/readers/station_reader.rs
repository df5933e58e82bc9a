use crate::error::{ProcessingError, Result};
use crate::models::StationAllowlist;
use crate::utils::constants::{STATIONS_FILE_SUFFIX, STATION_ID_COLUMN};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads `{region}_stations.csv` allowlists from a station metadata directory.
pub struct StationReader {
    station_dir: PathBuf,
}

impl StationReader {
    pub fn new(station_dir: impl Into<PathBuf>) -> Self {
        Self {
            station_dir: station_dir.into(),
        }
    }

    pub fn allowlist_path(&self, region: &str) -> PathBuf {
        self.station_dir
            .join(format!("{}{}", region, STATIONS_FILE_SUFFIX))
    }

    /// Read the allowlist for a region. A missing file is an error.
    pub fn read_allowlist(&self, region: &str) -> Result<StationAllowlist> {
        let path = self.allowlist_path(region);
        let file = File::open(&path)?;
        let station_ids = read_station_ids(file, &path)?;

        debug!(
            region,
            stations = station_ids.len(),
            path = %path.display(),
            "Loaded station allowlist"
        );

        Ok(StationAllowlist::new(region, station_ids))
    }
}

/// Collect the STATION_ID column of a station metadata CSV
fn read_station_ids<R: Read>(reader: R, path: &Path) -> Result<Vec<String>> {
    let mut csv_reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let column = csv_reader
        .headers()?
        .iter()
        .position(|h| h == STATION_ID_COLUMN)
        .ok_or_else(|| ProcessingError::MissingColumn {
            column: STATION_ID_COLUMN.to_string(),
            path: path.to_path_buf(),
        })?;

    let mut station_ids = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        if let Some(id) = record.get(column).filter(|id| !id.is_empty()) {
            station_ids.push(id.to_string());
        }
    }

    Ok(station_ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, content: &str) -> Result<()> {
        let mut file = File::create(dir.join(name))?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }

    #[test]
    fn test_read_allowlist() -> Result<()> {
        let dir = TempDir::new()?;
        write_file(
            dir.path(),
            "coastal_stations.csv",
            "NAME,STATION_ID,ELEVATION\nHarbour,123456,4\nPier, 01001099999 ,2\nEmpty,,0\n",
        )?;

        let reader = StationReader::new(dir.path());
        let allowlist = reader.read_allowlist("coastal")?;

        assert_eq!(allowlist.region, "coastal");
        assert_eq!(allowlist.len(), 2);
        assert!(allowlist.contains("123456"));
        assert!(allowlist.contains("01001099999"));

        Ok(())
    }

    #[test]
    fn test_missing_allowlist_file_is_error() {
        let dir = TempDir::new().unwrap();
        let reader = StationReader::new(dir.path());

        let result = reader.read_allowlist("nowhere");
        assert!(matches!(result, Err(ProcessingError::Io(_))));
    }

    #[test]
    fn test_missing_station_id_column_is_error() -> Result<()> {
        let dir = TempDir::new()?;
        write_file(dir.path(), "inland_stations.csv", "NAME,ID\nFarm,1\n")?;

        let reader = StationReader::new(dir.path());
        let result = reader.read_allowlist("inland");

        match result {
            Err(ProcessingError::MissingColumn { column, .. }) => assert_eq!(column, "STATION_ID"),
            other => panic!("expected MissingColumn, got {:?}", other),
        }

        Ok(())
    }

    #[test]
    fn test_allowlist_path() {
        let reader = StationReader::new("station_id_data");
        assert_eq!(
            reader.allowlist_path("coastal"),
            Path::new("station_id_data").join("coastal_stations.csv")
        );
    }
}
