//! DocCompare CLI
//!
//! Command-line interface for comparing two documents

use clap::{Parser, Subcommand};
use doccompare_core::logging_facility::{self, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "doccompare")]
#[command(about = "DocCompare - See exactly what changed between two documents", long_about = None)]
struct Cli {
    /// Emit logs to stderr using this profile (dev or prod)
    #[arg(long, global = true)]
    log_profile: Option<Profile>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare two documents and list the changes
    Compare(commands::compare::CompareArgs),
    /// Compare two documents and correlate changes with rendered layouts
    Highlight(commands::highlight::HighlightArgs),
    /// Print the effective configuration as TOML
    Config(commands::config::ConfigArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Some(profile) = cli.log_profile {
        logging_facility::init(profile);
    }

    let result = match cli.command {
        Commands::Compare(args) => commands::compare::execute(args).await,
        Commands::Highlight(args) => commands::highlight::execute(args).await,
        Commands::Config(args) => commands::config::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
