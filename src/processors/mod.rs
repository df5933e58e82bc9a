pub mod aggregator;
pub mod cleaner;

pub use aggregator::YearlyAggregator;
pub use cleaner::{parse_gsod_date, sentinel_to_missing, RawField, StationRecordCleaner, SENTINELS};
