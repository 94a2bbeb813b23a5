//! Logger initialization.

use std::io::Write;

use log::LevelFilter;

/// Initializes `env_logger` writing to stderr.
///
/// `RUST_LOG` is read first; `level` (from `--log-level`) overrides it for
/// this crate and as the global default.
pub fn init_logger_with(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    builder.filter_module("geo_ip_ranges", level);
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} [{}] {}",
            record.level(),
            record.target(),
            record.args()
        )
    });
    builder.try_init()
}
