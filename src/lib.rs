//! Resolve city and country names to the IPv4/IPv6 CIDR ranges listed in
//! local MaxMind GeoLite2 CSV databases.
//!
//! A lookup loads a locations table into a [`NameIndex`], then streams the
//! dataset's two blocks tables through a [`BlockScanner`] for each name.

pub mod block_scan;
pub mod config;
pub mod error;
pub mod logger;
pub mod model;
pub mod name_index;
pub mod paths;
pub mod query;
pub mod utils;

use std::io::Write;

use anyhow::Result;
use log::debug;

pub use block_scan::BlockScanner;
pub use config::{Cli, OutputFormat};
pub use error::GeoRangeError;
pub use model::{Dataset, JoinColumn};
pub use name_index::NameIndex;
pub use paths::DatasetPaths;
pub use query::{QueryReport, RangeSection};

/// Runs every lookup requested by `cli`.
///
/// All files of all requested datasets are resolved before any table is
/// read; if any is missing the run fails with
/// [`GeoRangeError::MissingFiles`] and nothing is written to `out`.
pub fn run<W: Write, E: Write>(cli: &Cli, out: &mut W, err: &mut E) -> Result<QueryReport> {
    let targets = cli.targets();
    let configured: Vec<DatasetPaths> = targets
        .iter()
        .map(|(dataset, _)| cli.dataset_paths(*dataset))
        .collect();
    let resolved = paths::resolve_all(&configured)?;

    let mut report = QueryReport::default();
    for ((dataset, names), dataset_paths) in targets.iter().zip(&resolved) {
        debug!("Querying {} {} name(s)", names.len(), dataset);
        let partial = query::query_dataset(*dataset, dataset_paths, names, cli.format, out, err)?;
        report.sections.extend(partial.sections);
        report.unresolved.extend(partial.unresolved);
    }
    Ok(report)
}
