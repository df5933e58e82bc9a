pub mod fetcher;
pub mod multi_processor;
pub mod processor;
pub mod store;

pub use fetcher::{parse_listing_years, ArchiveFetcher, DownloadOutcome, FetchReport, YearOutcome};
pub use multi_processor::{DatasetComposition, RegionCombiner};
pub use processor::{member_station_id, open_archive, ArchiveExtract, RegionExtractor};
pub use store::{ArchiveStore, YearSelection};
