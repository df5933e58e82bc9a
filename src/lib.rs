pub mod archive;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod utils;
pub mod writers;

pub use archive::{ArchiveFetcher, ArchiveStore, RegionCombiner, RegionExtractor};
pub use config::{AppConfig, FetchSettings};
pub use error::{ProcessingError, Result};
