//! Command line interface.

pub mod command;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Contains the commands
pub struct Cli {
    /// TOML configuration file overriding the built-in defaults
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build min/max temperature series
    Temperature(RunArgs),
    /// Build wind speed series
    Wind(RunArgs),
    /// List the stations found in the legend files
    Stations {
        /// Directory holding the legend files
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Write the `.cli` file-name index of an output directory
    Index {
        /// Directory holding the series files
        #[arg(short, long)]
        output: PathBuf,
        /// Series file extension, e.g. `tmp` or `wnd`
        #[arg(short, long)]
        parameter: String,
    },
}

#[derive(Args)]
pub struct RunArgs {
    /// Directory holding the legend and data files
    #[arg(short, long)]
    pub input: PathBuf,
    /// Directory receiving the series files
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Creates a progress bar.
pub fn create_progress_bar(size: u64, message: String) -> ProgressBar {
    let style = ProgressStyle::with_template("[{eta_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");

    ProgressBar::new(size).with_message(message).with_style(style)
}
