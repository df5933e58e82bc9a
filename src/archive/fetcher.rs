use crate::config::FetchSettings;
use crate::error::{ProcessingError, Result};
use crate::utils::filename::archive_filename;
use crate::utils::progress::ProgressReporter;
use reqwest::{Client, StatusCode};
use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Result of asking the remote source for one year's archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Downloaded { path: PathBuf, bytes: u64 },
    Unavailable { status: StatusCode },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearOutcome {
    pub year: i32,
    pub outcome: DownloadOutcome,
}

#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    pub outcomes: Vec<YearOutcome>,
}

impl FetchReport {
    pub fn downloaded(&self) -> impl Iterator<Item = &YearOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.outcome, DownloadOutcome::Downloaded { .. }))
    }

    pub fn unavailable(&self) -> impl Iterator<Item = &YearOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.outcome, DownloadOutcome::Unavailable { .. }))
    }

    pub fn total_bytes(&self) -> u64 {
        self.outcomes
            .iter()
            .map(|o| match o.outcome {
                DownloadOutcome::Downloaded { bytes, .. } => bytes,
                DownloadOutcome::Unavailable { .. } => 0,
            })
            .sum()
    }

    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Fetch Summary:\n  Years requested: {}\n  Downloaded: {} ({} bytes)\n  Unavailable: {}\n",
            self.outcomes.len(),
            self.downloaded().count(),
            self.total_bytes(),
            self.unavailable().count()
        );

        for outcome in self.unavailable() {
            if let DownloadOutcome::Unavailable { status } = outcome.outcome {
                summary.push_str(&format!("    {}: HTTP {}\n", outcome.year, status));
            }
        }

        summary
    }
}

/// Scan a listing page for four-digit numbers not directly preceded by `>`.
///
/// Matches are taken left to right without overlap, so `>2020` contributes
/// nothing while `"2020.tar.gz"` contributes 2020. Years come back sorted and
/// de-duplicated.
pub fn parse_listing_years(listing: &str) -> Vec<i32> {
    let bytes = listing.as_bytes();
    let mut years = BTreeSet::new();
    let mut i = 0;

    while i + 4 <= bytes.len() {
        let window = &bytes[i..i + 4];
        let preceded_by_tag_close = i > 0 && bytes[i - 1] == b'>';

        if !preceded_by_tag_close && window.iter().all(u8::is_ascii_digit) {
            let year = window
                .iter()
                .fold(0i32, |acc, b| acc * 10 + i32::from(b - b'0'));
            years.insert(year);
            i += 4;
        } else {
            i += 1;
        }
    }

    years.into_iter().collect()
}

/// Downloads yearly GSOD bulk archives into the configured target directory.
pub struct ArchiveFetcher {
    client: Client,
    settings: FetchSettings,
}

impl ArchiveFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.request_timeout)
            .connect_timeout(settings.connect_timeout)
            .build()?;

        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    /// Years advertised on the archive listing page
    pub async fn discover_years(&self) -> Result<Vec<i32>> {
        let url = self.settings.normalized_base_url();
        info!(url = %url, "Fetching archive listing");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProcessingError::HttpStatus { url, status });
        }

        let listing = response.text().await?;
        let years = parse_listing_years(&listing);
        info!(count = years.len(), "Discovered archive years");

        Ok(years)
    }

    /// Stream one year's archive to `{target_dir}/{year}.tar.gz`.
    ///
    /// Anything other than 200 is reported as unavailable and leaves no file.
    pub async fn download_year(&self, year: i32) -> Result<DownloadOutcome> {
        let filename = archive_filename(year);
        let url = format!("{}{}", self.settings.normalized_base_url(), filename);

        let mut response = self.client.get(&url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            warn!(year, %status, url = %url, "Archive unavailable, skipping");
            return Ok(DownloadOutcome::Unavailable { status });
        }

        fs::create_dir_all(&self.settings.target_dir)?;

        // The destination only ever holds a complete archive
        let mut temp_file = NamedTempFile::new_in(&self.settings.target_dir)?;
        let mut bytes = 0u64;
        while let Some(chunk) = response.chunk().await? {
            temp_file.write_all(&chunk)?;
            bytes += chunk.len() as u64;
        }
        temp_file.flush()?;

        let path = self.settings.target_dir.join(&filename);
        temp_file.persist(&path).map_err(|e| e.error)?;

        debug!(year, bytes, path = %path.display(), "Archive written");
        Ok(DownloadOutcome::Downloaded { path, bytes })
    }

    /// Download the given years in order
    pub async fn fetch_years(
        &self,
        years: &[i32],
        progress: Option<&ProgressReporter>,
    ) -> Result<FetchReport> {
        fs::create_dir_all(&self.settings.target_dir)?;

        let mut report = FetchReport::default();
        for &year in years {
            if let Some(p) = progress {
                p.set_message(&format!("Downloading {}...", archive_filename(year)));
            }

            let outcome = self.download_year(year).await?;

            if let Some(p) = progress {
                if let DownloadOutcome::Unavailable { status } = &outcome {
                    p.println(&format!("Skipped {}: HTTP {}", archive_filename(year), status));
                }
                p.increment(1);
            }
            report.outcomes.push(YearOutcome { year, outcome });
        }

        info!(
            downloaded = report.downloaded().count(),
            unavailable = report.unavailable().count(),
            target_dir = %self.settings.target_dir.display(),
            "Fetch complete"
        );

        Ok(report)
    }

    /// Discover every available year and download it
    pub async fn fetch_all(&self, progress: Option<&ProgressReporter>) -> Result<FetchReport> {
        let years = self.discover_years().await?;
        self.fetch_years(&years, progress).await
    }
}
