mod cli;
mod config;
mod error;
mod files;
mod reading;
mod series;

use anyhow::{Error, Result};
use clap::Parser;
use cli::{command, Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = config::Config::load(cli.config.as_deref())?;

    let outcome = match &cli.command {
        Commands::Temperature(args) => {
            command::temperature(&args.input, &args.output, &config).map(|s| s.to_string())
        }
        Commands::Wind(args) => {
            command::wind(&args.input, &args.output, &config).map(|s| s.to_string())
        }
        Commands::Stations { input } => command::stations(input, &config),
        Commands::Index { output, parameter } => command::index(output, parameter, &config)
            .map(|path| format!("File saved to `{}`", path)),
    };

    match outcome {
        Ok(message) => println!("{}", message),
        Err(e) => {
            match e.downcast_ref::<error::Error>() {
                Some(format_error) if format_error.is_format_error() => {
                    eprintln!("Input format error: {:#}", e)
                }
                _ => eprintln!("Error: {:#}", e),
            }
            std::process::exit(1);
        }
    }

    Ok(())
}
