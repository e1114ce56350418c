//! Compare command
//!
//! Usage: doccompare compare <ORIGINAL> <UPDATED> [--format text|json] [--config <FILE>]

use clap::{Args, ValueEnum};
use doccompare_core::diff::render_human_summary;
use doccompare_engine::ComparisonSession;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable change list
    Text,
    /// The full comparison result as JSON
    Json,
}

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// The earlier version of the document
    pub original: PathBuf,

    /// The later version of the document
    pub updated: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Execute compare command
pub async fn execute(args: CompareArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(args.config.as_ref())?;
    let original = super::read_document(&args.original)?;
    let updated = super::read_document(&args.updated)?;

    let session = ComparisonSession::with_default_extractor(config);
    let result = session.compare(original, updated).await?;

    match args.format {
        OutputFormat::Text => print!("{}", render_human_summary(&result)),
        OutputFormat::Json => println!("{}", super::to_json(&*result)?),
    }

    Ok(())
}
