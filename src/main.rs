//! Command-line interface for the LAS / drillhole converter.
//!
//! Each conversion is driven by a UI-JSON input file; `templates` writes
//! blank ones to fill in.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use las_drillhole::{config, driver};
use log::{info, LevelFilter};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Convert between LAS files and drillhole groups",
    long_about = "Imports directories of LAS 2.0 well logs into drillhole groups and exports \
                  drillhole groups back to LAS files, one per property group."
)]
struct Args {
    /// Log per-curve decisions
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import a directory of LAS files into a drillhole group
    Import {
        /// Import UI-JSON file
        #[arg(value_name = "UI_JSON")]
        config: PathBuf,
    },
    /// Export a drillhole group to LAS files
    Export {
        /// Export UI-JSON file
        #[arg(value_name = "UI_JSON")]
        config: PathBuf,
    },
    /// Write blank import/export UI-JSON files
    Templates {
        /// Directory receiving the templates
        #[arg(value_name = "DIR", default_value = ".")]
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .format_timestamp(None)
        .init();

    let start = Instant::now();

    match args.command {
        Command::Import { config } => {
            driver::run_import(&config)
                .with_context(|| format!("importing with {}", config.display()))?;
        }
        Command::Export { config } => {
            driver::run_export(&config)
                .with_context(|| format!("exporting with {}", config.display()))?;
        }
        Command::Templates { dir } => {
            for path in config::write_uijson(&dir)? {
                info!("Wrote {}", path.display());
            }
        }
    }

    info!("Done in {:.2?}", start.elapsed());
    Ok(())
}
