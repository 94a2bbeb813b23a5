use std::io;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use geo_ip_ranges::logger::init_logger_with;
use geo_ip_ranges::{run, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger_with(cli.log_level.into()).context("Failed to initialize logger")?;

    let stdout = io::stdout();
    let stderr = io::stderr();
    if let Err(e) = run(&cli, &mut stdout.lock(), &mut stderr.lock()) {
        eprintln!("[ERROR] {:#}", e);
        process::exit(1);
    }
    Ok(())
}
