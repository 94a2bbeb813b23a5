use std::path::{Path, PathBuf};

use clap::{ArgGroup, Parser, ValueEnum};
use log::LevelFilter;

use crate::model::Dataset;
use crate::paths::DatasetPaths;

// default file names, as unpacked from the GeoLite2 CSV archives
pub const CITY_LOCATIONS_CSV: &str = "GeoLite2-City-Locations-en.csv";
pub const CITY_BLOCKS_V4_CSV: &str = "GeoLite2-City-Blocks-IPv4.csv";
pub const CITY_BLOCKS_V6_CSV: &str = "GeoLite2-City-Blocks-IPv6.csv";
pub const COUNTRY_LOCATIONS_CSV: &str = "GeoLite2-Country-Locations-en.csv";
pub const COUNTRY_BLOCKS_V4_CSV: &str = "GeoLite2-Country-Blocks-IPv4.csv";
pub const COUNTRY_BLOCKS_V6_CSV: &str = "GeoLite2-Country-Blocks-IPv6.csv";

pub const DATA_DIR_ENV: &str = "GEO_IP_RANGES_DATA_DIR";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Labeled sections, one CIDR per line
    Text,
    /// One JSON object per line per name
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Print IPv4 and IPv6 CIDR ranges for cities and/or countries using local
/// GeoLite2 CSV databases.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("targets").required(true).multiple(true)))]
pub struct Cli {
    /// City name(s), e.g. Kyiv "New York"
    #[arg(group = "targets", value_name = "CITY")]
    pub names: Vec<String>,

    /// City names (e.g. Kyiv London)
    #[arg(long, group = "targets", num_args = 1.., value_name = "CITY")]
    pub cities: Vec<String>,

    /// Country ISO codes or names (e.g. US Ukraine)
    #[arg(long, group = "targets", num_args = 1.., value_name = "COUNTRY")]
    pub countries: Vec<String>,

    /// Path to the City locations CSV
    #[arg(long, alias = "locations-csv")]
    pub city_loc: Option<PathBuf>,

    /// Path to the City IPv4 blocks CSV
    #[arg(long, alias = "blocks4-csv")]
    pub city_b4: Option<PathBuf>,

    /// Path to the City IPv6 blocks CSV
    #[arg(long, alias = "blocks6-csv")]
    pub city_b6: Option<PathBuf>,

    /// Path to the Country locations CSV
    #[arg(long)]
    pub country_loc: Option<PathBuf>,

    /// Path to the Country IPv4 blocks CSV
    #[arg(long)]
    pub country_b4: Option<PathBuf>,

    /// Path to the Country IPv6 blocks CSV
    #[arg(long)]
    pub country_b6: Option<PathBuf>,

    /// Directory holding the default-named CSV files
    #[arg(long, env = DATA_DIR_ENV)]
    pub data_dir: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Overrides RUST_LOG
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,
}

impl Cli {
    /// Positional names followed by `--cities`.
    pub fn city_names(&self) -> Vec<String> {
        self.names.iter().chain(&self.cities).cloned().collect()
    }

    pub fn country_names(&self) -> Vec<String> {
        self.countries.clone()
    }

    /// Datasets with at least one requested name, in lookup order.
    pub fn targets(&self) -> Vec<(Dataset, Vec<String>)> {
        [
            (Dataset::City, self.city_names()),
            (Dataset::Country, self.country_names()),
        ]
        .into_iter()
        .filter(|(_, names)| !names.is_empty())
        .collect()
    }

    /// Configured paths for `dataset`, before resolution.
    pub fn dataset_paths(&self, dataset: Dataset) -> DatasetPaths {
        let (loc, b4, b6, defaults) = match dataset {
            Dataset::City => (
                &self.city_loc,
                &self.city_b4,
                &self.city_b6,
                [CITY_LOCATIONS_CSV, CITY_BLOCKS_V4_CSV, CITY_BLOCKS_V6_CSV],
            ),
            Dataset::Country => (
                &self.country_loc,
                &self.country_b4,
                &self.country_b6,
                [COUNTRY_LOCATIONS_CSV, COUNTRY_BLOCKS_V4_CSV, COUNTRY_BLOCKS_V6_CSV],
            ),
        };
        DatasetPaths::new(
            self.path_or_default(loc, defaults[0]),
            self.path_or_default(b4, defaults[1]),
            self.path_or_default(b6, defaults[2]),
        )
    }

    fn path_or_default(&self, path: &Option<PathBuf>, default: &str) -> PathBuf {
        match (path, &self.data_dir) {
            (Some(path), _) => path.clone(),
            (None, Some(dir)) => dir.join(default),
            (None, None) => Path::new(default).to_path_buf(),
        }
    }
}
