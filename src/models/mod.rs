pub mod cleaned;
pub mod raw;
pub mod station;
pub mod summary;

pub use cleaned::CleanedStationDay;
pub use raw::RawStationDay;
pub use station::StationAllowlist;
pub use summary::{LocatedSummary, RegionDaySummary};
