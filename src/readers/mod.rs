pub mod record_reader;
pub mod station_reader;

pub use record_reader::RecordReader;
pub use station_reader::StationReader;
