//! Config command
//!
//! Usage: doccompare config [--config <FILE>]

use clap::Args;
use doccompare_core::errors::DocCompareError;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// TOML configuration file to layer over the defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Execute config command
pub fn execute(args: ConfigArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(args.config.as_ref())?;
    let rendered = toml::to_string_pretty(&config).map_err(|e| DocCompareError::Serialization {
        message: e.to_string(),
    })?;
    print!("{}", rendered);
    Ok(())
}
