//! nm-tray l10n - main entry point

use anyhow::{Context, Result};
use clap::Parser;
use nmtray_common::init_logging;
use nmtray_config::ConfigLoader;
use nmtray_l10n::{run, Cli};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::{debug, error};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
    .context("Failed to load configuration")?;

    cli.apply_logging_overrides(&mut settings.logging);
    init_logging(&settings.logging).context("Failed to initialize logging")?;
    debug!("Starting nmtray-l10n {}", env!("CARGO_PKG_VERSION"));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let succeeded = match run(&cli.command, &settings, &mut out) {
        Ok(succeeded) => succeeded,
        Err(e) => {
            error!("{}", e);
            return Err(e.into());
        }
    };
    out.flush()?;

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
