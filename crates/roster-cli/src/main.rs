//! Roster CLI
//!
//! Command-line interface for the student roster

use clap::{Parser, Subcommand};
use roster_core::logging_facility::{self, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "roster")]
#[command(about = "Roster - student records in SQLite", long_about = None)]
struct Cli {
    /// Store target: `sqlite::memory:` for a transient store, or a database path
    #[arg(long, global = true, env = "ROSTER_DB", default_value = "sqlite::memory:")]
    db: String,

    /// Log output profile (development or production)
    #[arg(long, global = true, default_value = "development")]
    log: Profile,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the roster walkthrough: insert, query, update, delete
    Demo(commands::demo::DemoArgs),
    /// Show the materialized students schema
    Schema(commands::schema::SchemaArgs),
}

fn main() {
    let cli = Cli::parse();

    logging_facility::init(cli.log);

    let result = match cli.command {
        Commands::Demo(args) => commands::demo::execute(&cli.db, args),
        Commands::Schema(args) => commands::schema::execute(&cli.db, args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
