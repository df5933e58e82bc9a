use chrono::{Datelike, Local};
use std::path::PathBuf;

/// Generate default output filename with format: gsod-regions-{YYMMDD}.parquet
pub fn generate_default_output_filename() -> PathBuf {
    let now = Local::now();
    let year = now.year() % 100; // Get last 2 digits of year
    let month = now.month();
    let day = now.day();

    let filename = format!("gsod-regions-{:02}{:02}{:02}.parquet", year, month, day);
    PathBuf::from("output").join(filename)
}

/// Archive filename for a year on the remote source and in the local store
pub fn archive_filename(year: i32) -> String {
    format!("{}{}", year, super::constants::ARCHIVE_EXTENSION)
}

/// Leading year of an archive filename: the first run of digits in the name
pub fn leading_year(filename: &str) -> Option<i32> {
    let start = filename.find(|c: char| c.is_ascii_digit())?;
    let digits: String = filename[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_default_output_filename() {
        let filename = generate_default_output_filename();
        let filename_str = filename.to_string_lossy();

        assert!(filename_str.contains("gsod-regions-"));
        assert!(filename_str.ends_with(".parquet"));
        assert!(filename_str.starts_with("output/"));

        let parts: Vec<&str> = filename_str.split('/').collect();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0], "output");
    }

    #[test]
    fn test_archive_filename() {
        assert_eq!(archive_filename(2020), "2020.tar.gz");
    }

    #[test]
    fn test_leading_year() {
        assert_eq!(leading_year("2020.tar.gz"), Some(2020));
        assert_eq!(leading_year("gsod_1999_v2.tar"), Some(1999));
        assert_eq!(leading_year("archive.tar.gz"), None);
    }
}
