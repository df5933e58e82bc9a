pub mod constants;
pub mod filename;
pub mod progress;
pub mod units;

pub use constants::*;
pub use filename::{archive_filename, generate_default_output_filename, leading_year};
pub use progress::ProgressReporter;
pub use units::{c2f, f2c};
