use crate::error::Result;
use crate::utils::constants::{
    DEFAULT_ARCHIVE_DIR, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_STATION_DIR, GSOD_BASE_URL,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use validator::Validate;

/// Name of the optional configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "gsod";
pub const ENV_PREFIX: &str = "GSOD";

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AppConfig {
    #[validate(url)]
    pub base_url: String,

    pub archive_dir: PathBuf,

    pub station_dir: PathBuf,

    #[validate(range(min = 1, max = 86400))]
    pub request_timeout_secs: u64,

    #[validate(range(min = 1, max = 600))]
    pub connect_timeout_secs: u64,

    #[validate(range(min = 1))]
    pub max_workers: usize,
}

impl AppConfig {
    /// Defaults, then `gsod.toml` (or `path`), then `GSOD_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file_source = match path {
            Some(p) => config::File::from(p.to_path_buf()).required(true),
            None => config::File::with_name(CONFIG_FILE_NAME).required(false),
        };

        let builder = config::Config::builder()
            .set_default("base_url", GSOD_BASE_URL)?
            .set_default("archive_dir", DEFAULT_ARCHIVE_DIR)?
            .set_default("station_dir", DEFAULT_STATION_DIR)?
            .set_default("request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS as i64)?
            .set_default("connect_timeout_secs", DEFAULT_CONNECT_TIMEOUT_SECS as i64)?
            .set_default("max_workers", num_cpus::get() as i64)?
            .add_source(file_source)
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings::new(&self.base_url, &self.archive_dir).with_timeouts(
            Duration::from_secs(self.request_timeout_secs),
            Duration::from_secs(self.connect_timeout_secs),
        )
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: GSOD_BASE_URL.to_string(),
            archive_dir: PathBuf::from(DEFAULT_ARCHIVE_DIR),
            station_dir: PathBuf::from(DEFAULT_STATION_DIR),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            max_workers: num_cpus::get(),
        }
    }
}

/// Everything the archive fetcher needs; the target directory is where
/// downloaded archives are written.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub base_url: String,
    pub target_dir: PathBuf,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl FetchSettings {
    pub fn new(base_url: impl Into<String>, target_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_url: base_url.into(),
            target_dir: target_dir.into(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    pub fn with_target_dir(mut self, target_dir: impl Into<PathBuf>) -> Self {
        self.target_dir = target_dir.into();
        self
    }

    pub fn with_timeouts(mut self, request_timeout: Duration, connect_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self.connect_timeout = connect_timeout;
        self
    }

    /// Base URL with exactly one trailing slash
    pub fn normalized_base_url(&self) -> String {
        format!("{}/", self.base_url.trim_end_matches('/'))
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        AppConfig::default().fetch_settings()
    }
}
