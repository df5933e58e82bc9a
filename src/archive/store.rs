use crate::error::{ProcessingError, Result};
use crate::utils::filename::leading_year;
use std::fs;
use std::path::{Path, PathBuf};

/// The most recent archives in a store, with the year each one covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearSelection {
    pub years: Vec<i32>,
    pub files: Vec<String>,
}

impl YearSelection {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, &str)> {
        self.years
            .iter()
            .copied()
            .zip(self.files.iter().map(String::as_str))
    }
}

/// A local directory of year-prefixed archives such as `2020.tar.gz`.
pub struct ArchiveStore {
    dir: PathBuf,
}

impl ArchiveStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Names of the regular files in the store, sorted lexicographically
    pub fn list_archives(&self) -> Result<Vec<String>> {
        let mut files = Vec::new();

        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                files.push(name.to_string());
            }
        }

        files.sort();
        Ok(files)
    }

    /// The last `count` archives in sorted order and their leading years.
    ///
    /// Asking for more archives than the store holds is an error rather than
    /// a shorter selection.
    pub fn latest(&self, count: usize) -> Result<YearSelection> {
        if count == 0 {
            return Err(ProcessingError::Config(
                "Number of years must be at least 1".to_string(),
            ));
        }

        let files = self.list_archives()?;
        if files.is_empty() {
            return Err(ProcessingError::EmptyArchiveStore {
                dir: self.dir.clone(),
            });
        }
        if files.len() < count {
            return Err(ProcessingError::NotEnoughArchives {
                requested: count,
                available: files.len(),
            });
        }

        let files = files[files.len() - count..].to_vec();
        let years = files
            .iter()
            .map(|file| {
                leading_year(file).ok_or_else(|| {
                    ProcessingError::InvalidFormat(format!(
                        "Archive filename has no leading year: {}",
                        file
                    ))
                })
            })
            .collect::<Result<Vec<i32>>>()?;

        Ok(YearSelection { years, files })
    }
}
