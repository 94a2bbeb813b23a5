use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::DeserializeRecordsIntoIter;
use log::debug;

use crate::error::{GeoRangeError, Result};
use crate::model::{BlockRecord, JoinColumn, NETWORK};
use crate::utils::csv_reader_builder;

/// Streams the `network` column of every blocks-table row whose join
/// column holds one of `ids`, in file order.
///
/// Single pass: once exhausted (or after the first error) it yields
/// nothing more. Networks are passed through as written.
pub struct BlockScanner<'a, R: Read = File> {
    rows: DeserializeRecordsIntoIter<R, BlockRecord>,
    join: JoinColumn,
    ids: &'a HashSet<String>,
    path: PathBuf,
    scanned: usize,
    done: bool,
}

impl<'a> BlockScanner<'a, File> {
    pub fn open(path: &Path, join: JoinColumn, ids: &'a HashSet<String>) -> Result<Self> {
        let rdr = csv_reader_builder()
            .from_path(path)
            .map_err(|e| GeoRangeError::csv(path, e))?;
        Self::from_csv(rdr, path, join, ids)
    }
}

impl<'a, R: Read> BlockScanner<'a, R> {
    /// Checks the header for `network` and the join column, pinning
    /// [`JoinColumn::Auto`] to whichever identifier column is present.
    pub fn from_csv(
        mut rdr: csv::Reader<R>,
        path: &Path,
        join: JoinColumn,
        ids: &'a HashSet<String>,
    ) -> Result<Self> {
        let headers = rdr.headers().map_err(|e| GeoRangeError::csv(path, e))?;

        let mut missing = Vec::new();
        if !headers.iter().any(|h| h == NETWORK) {
            missing.push(NETWORK.to_string());
        }
        let resolved = join.resolve(headers.iter());
        if resolved.is_none() {
            missing.push(join.column().to_string());
        }
        let join = match resolved {
            Some(join) if missing.is_empty() => join,
            _ => {
                return Err(GeoRangeError::MissingColumns {
                    path: path.to_path_buf(),
                    columns: missing,
                })
            }
        };
        debug!("Scanning {} on {}", path.display(), join.column());

        Ok(BlockScanner {
            rows: rdr.into_deserialize(),
            join,
            ids,
            path: path.to_path_buf(),
            scanned: 0,
            done: false,
        })
    }

    /// The identifier column actually matched against.
    pub fn join_column(&self) -> JoinColumn {
        self.join
    }

    /// Rows read so far.
    pub fn rows_scanned(&self) -> usize {
        self.scanned
    }
}

impl<R: Read> Iterator for BlockScanner<'_, R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        for result in self.rows.by_ref() {
            self.scanned += 1;
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    self.done = true;
                    return Some(Err(GeoRangeError::csv(&self.path, e)));
                }
            };
            let matched = self
                .join
                .value(&record)
                .is_some_and(|id| self.ids.contains(id));
            if matched {
                if let Some(network) = record.network {
                    return Some(Ok(network));
                }
            }
        }
        self.done = true;
        debug!("Scanned {} rows of {}", self.scanned, self.path.display());
        None
    }
}
