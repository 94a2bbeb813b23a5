//! Locating the CSV files a lookup needs.
//!
//! A path that exists as given is used unchanged. Otherwise the same file
//! name is tried inside the fallback directory, which is the directory
//! holding the dataset's locations table. Every file that is still missing
//! is reported in one [`GeoRangeError::MissingFiles`] before any table is
//! read.

use std::env;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{GeoRangeError, Result};

/// The three tables backing one dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub locations: PathBuf,
    pub blocks_v4: PathBuf,
    pub blocks_v6: PathBuf,
}

impl DatasetPaths {
    pub fn new(
        locations: impl Into<PathBuf>,
        blocks_v4: impl Into<PathBuf>,
        blocks_v6: impl Into<PathBuf>,
    ) -> Self {
        DatasetPaths {
            locations: locations.into(),
            blocks_v4: blocks_v4.into(),
            blocks_v6: blocks_v6.into(),
        }
    }

    /// Directory holding the locations table, made absolute so a bare file
    /// name falls back to the current directory.
    pub fn fallback_dir(&self) -> PathBuf {
        let locations = if self.locations.is_absolute() {
            self.locations.clone()
        } else {
            env::current_dir()
                .map(|cwd| cwd.join(&self.locations))
                .unwrap_or_else(|_| self.locations.clone())
        };
        locations
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }
}

/// Returns `path` if it is a file, else `fallback_dir/<file name>` if that
/// is a file, else `None`.
pub fn resolve_path(path: &Path, fallback_dir: &Path) -> Option<PathBuf> {
    if path.is_file() {
        return Some(path.to_path_buf());
    }
    let alt = fallback_dir.join(path.file_name()?);
    alt.is_file().then_some(alt)
}

/// Resolves every table of every dataset, failing with the full list of
/// unresolved paths if any is missing.
pub fn resolve_all(datasets: &[DatasetPaths]) -> Result<Vec<DatasetPaths>> {
    let mut missing = Vec::new();
    let mut resolved = Vec::with_capacity(datasets.len());

    for dataset in datasets {
        let fallback = dataset.fallback_dir();
        let mut pick = |path: &PathBuf| match resolve_path(path, &fallback) {
            Some(found) => {
                debug!("Resolved {} -> {}", path.display(), found.display());
                found
            }
            None => {
                missing.push(path.clone());
                path.clone()
            }
        };
        resolved.push(DatasetPaths {
            locations: pick(&dataset.locations),
            blocks_v4: pick(&dataset.blocks_v4),
            blocks_v6: pick(&dataset.blocks_v6),
        });
    }

    if missing.is_empty() {
        Ok(resolved)
    } else {
        Err(GeoRangeError::MissingFiles(missing))
    }
}
