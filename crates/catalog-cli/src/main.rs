//! Catalog CLI
//!
//! Command-line interface for the course catalog

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "catalog")]
#[command(about = "Course catalog - courses and their prerequisites", long_about = None)]
struct Cli {
    /// Database file; takes precedence over the config file and CATALOG_DB
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Store config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Course operations
    Course(commands::course::CourseArgs),
}

fn main() {
    let cli = Cli::parse();

    catalog_core::logging_facility::init(if cli.log_json {
        catalog_core::logging_facility::Profile::Production
    } else {
        catalog_core::logging_facility::Profile::Development
    });

    let store = commands::StoreArgs {
        db: cli.db,
        config: cli.config,
    };

    let result = match cli.command {
        Commands::Course(args) => commands::course::execute(&store, args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
