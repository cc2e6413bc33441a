//! Command-line interface definition.

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use zpl_printer::LabelSize;

/// label-station - Create and print Data Matrix labels on a Zebra printer
#[derive(Debug, Parser)]
#[command(name = "label-station")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Label text, one value per line on the label
    pub text: Vec<String>,

    /// Label size: medium (4 lines) or large (5 lines)
    #[arg(long, short, default_value = "medium")]
    pub size: LabelSize,

    /// Printer address, overrides the configured default for the size
    #[arg(long)]
    pub ip: Option<String>,

    /// Number of labels to print
    #[arg(long, short = 'n', default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub copies: u32,

    /// Increase the numbers in the fourth line on every label
    #[arg(long)]
    pub increment: bool,

    /// Put today's date on the first line
    #[arg(long)]
    pub date: bool,

    /// Put a test text on the second line
    #[arg(long)]
    pub test: bool,

    /// Write the ZPL to stdout instead of sending it
    #[arg(long)]
    pub dry_run: bool,

    /// Path to configuration file
    #[arg(long, short, env = "LABEL_STATION_CONFIG")]
    pub config: Option<PathBuf>,

    /// More log output (repeat for more)
    #[arg(long, short, action = ArgAction::Count)]
    pub verbose: u8,
}
