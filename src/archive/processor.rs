use crate::error::{ProcessingError, Result};
use crate::models::{CleanedStationDay, RegionDaySummary, StationAllowlist};
use crate::processors::{StationRecordCleaner, YearlyAggregator};
use crate::readers::{RecordReader, StationReader};
use crate::utils::constants::MEMBER_SUFFIX_LEN;
use flate2::read::GzDecoder;
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use tar::Archive;
use tracing::{debug, info, warn};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Open a tar archive, gzip-compressed or not
pub fn open_archive(path: &Path) -> Result<Archive<Box<dyn Read>>> {
    let mut reader = BufReader::new(File::open(path)?);
    let is_gzip = reader.fill_buf()?.starts_with(&GZIP_MAGIC);

    let inner: Box<dyn Read> = if is_gzip {
        Box::new(GzDecoder::new(reader))
    } else {
        Box::new(reader)
    };

    Ok(Archive::new(inner))
}

/// Station ID of an archive member: its file name minus the 4-character suffix
pub fn member_station_id(member_path: &Path) -> Option<String> {
    let name = member_path.file_name()?.to_str()?;
    let (cut, _) = name.char_indices().rev().nth(MEMBER_SUFFIX_LEN - 1)?;
    (cut > 0).then(|| name[..cut].to_string())
}

/// Cleaned records of one archive for one region, with member counts
#[derive(Debug, Clone, Default)]
pub struct ArchiveExtract {
    pub records: Vec<CleanedStationDay>,
    pub members_seen: usize,
    pub members_matched: usize,
}

/// Builds one region's daily time series from yearly GSOD archives.
pub struct RegionExtractor {
    archive_dir: PathBuf,
    station_reader: StationReader,
    record_reader: RecordReader,
    cleaner: StationRecordCleaner,
    aggregator: YearlyAggregator,
    max_workers: usize,
}

impl RegionExtractor {
    pub fn new(archive_dir: impl Into<PathBuf>, station_dir: impl Into<PathBuf>) -> Self {
        Self {
            archive_dir: archive_dir.into(),
            station_reader: StationReader::new(station_dir),
            record_reader: RecordReader::new(),
            cleaner: StationRecordCleaner::new(),
            aggregator: YearlyAggregator::new(),
            max_workers: 1,
        }
    }

    /// Process up to `max_workers` archives at once. Output order is unchanged.
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers.max(1);
        self
    }

    pub fn archive_dir(&self) -> &Path {
        &self.archive_dir
    }

    /// Daily summaries for `region`, one block per archive in `files` order.
    pub fn extract(&self, files: &[String], region: &str) -> Result<Vec<RegionDaySummary>> {
        let allowlist = self.station_reader.read_allowlist(region)?;
        if allowlist.is_empty() {
            warn!(region, "Station allowlist is empty");
        }

        info!(
            region,
            stations = allowlist.len(),
            archives = files.len(),
            "Extracting region data"
        );

        let per_archive: Vec<Vec<RegionDaySummary>> = if self.max_workers > 1 && files.len() > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.max_workers)
                .build()
                .map_err(|e| ProcessingError::Config(e.to_string()))?;

            pool.install(|| {
                files
                    .par_iter()
                    .map(|file| self.extract_year(file, &allowlist))
                    .collect::<Result<Vec<_>>>()
            })?
        } else {
            files
                .iter()
                .map(|file| self.extract_year(file, &allowlist))
                .collect::<Result<Vec<_>>>()?
        };

        Ok(per_archive.into_iter().flatten().collect())
    }

    /// Aggregated summaries for a single archive
    pub fn extract_year(
        &self,
        file: &str,
        allowlist: &StationAllowlist,
    ) -> Result<Vec<RegionDaySummary>> {
        let path = self.archive_dir.join(file);
        let extract = self.read_archive(&path, allowlist)?;
        let summaries = self.aggregator.aggregate(&extract.records);

        if extract.members_matched == 0 {
            warn!(
                archive = file,
                region = %allowlist.region,
                "No allowlisted stations found in archive"
            );
        }

        info!(
            archive = file,
            region = %allowlist.region,
            members = extract.members_seen,
            matched = extract.members_matched,
            days = summaries.len(),
            "Archive processed"
        );

        Ok(summaries)
    }

    /// Clean every allowlisted member of the archive at `path`. Members not on
    /// the allowlist are skipped without being read.
    pub fn read_archive(&self, path: &Path, allowlist: &StationAllowlist) -> Result<ArchiveExtract> {
        let mut archive = open_archive(path)?;
        let mut extract = ArchiveExtract::default();

        for entry in archive.entries()? {
            let mut entry = entry?;
            if !entry.header().entry_type().is_file() {
                continue;
            }

            let member_path = entry.path()?.into_owned();
            let Some(station_id) = member_station_id(&member_path) else {
                continue;
            };
            extract.members_seen += 1;

            if !allowlist.contains(&station_id) {
                continue;
            }
            extract.members_matched += 1;

            let raw = self
                .record_reader
                .read_records(&mut entry, &path.join(&member_path))?;
            debug!(station = %station_id, rows = raw.len(), "Parsed station member");

            extract.records.extend(self.cleaner.clean(&raw)?);
        }

        Ok(extract)
    }
}
