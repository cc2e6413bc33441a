//! label-station CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use label_station::alert::Alert;
use label_station::cli::Cli;
use label_station::config::StationConfig;
use label_station::{app, logger};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => StationConfig::load_from(path),
        None => StationConfig::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logger::init_logger(&config.logging, cli.verbose) {
        eprintln!("error: failed to initialize logging: {:#}", e);
        return ExitCode::FAILURE;
    }

    match app::run(&cli, &config.printers).await {
        Ok(fields) => {
            if cli.increment && !cli.dry_run {
                // Next value in the sequence, to start the following run from
                println!("{}", fields.join(" | "));
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Print run failed");
            match Alert::for_error(&e) {
                Some(alert) => eprintln!("{}\n{:#}", alert, e),
                None => eprintln!("error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}
