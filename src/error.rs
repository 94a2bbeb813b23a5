//! Error types for dataset loading and scanning.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeoRangeError {
    /// One or more required CSV files could not be located.
    #[error("Missing required CSV file(s): {}", join_paths(.0))]
    MissingFiles(Vec<PathBuf>),

    /// A CSV header lacks columns the table type needs.
    #[error("{} is missing required column(s): {}", .path.display(), .columns.join(", "))]
    MissingColumns { path: PathBuf, columns: Vec<String> },

    /// Reading or decoding a CSV file failed.
    #[error("Failed to read {}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl GeoRangeError {
    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        GeoRangeError::Csv {
            path: path.into(),
            source,
        }
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, GeoRangeError>;
