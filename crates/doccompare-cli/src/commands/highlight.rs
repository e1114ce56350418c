//! Highlight command
//!
//! Usage: doccompare highlight <ORIGINAL> <UPDATED> [--original-layout <FILE>]
//!        [--updated-layout <FILE>] [--select <CHANGE_ID>] [--config <FILE>]
//!
//! Layout files are JSON arrays of text fragments
//! (`{"page", "rect": {"x", "y", "width", "height"}, "text"}`), as a page
//! renderer would report them. Prints the comparison and the highlights of
//! both documents as JSON.

use clap::Args;
use doccompare_core::core_types::ChangeId;
use doccompare_core::model::DocumentSide;
use doccompare_engine::ComparisonSession;
use serde_json::json;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct HighlightArgs {
    /// The earlier version of the document
    pub original: PathBuf,

    /// The later version of the document
    pub updated: PathBuf,

    /// Rendered layout of the original document
    #[arg(long)]
    pub original_layout: Option<PathBuf>,

    /// Rendered layout of the updated document
    #[arg(long)]
    pub updated_layout: Option<PathBuf>,

    /// Change to emphasize (e.g. change-0)
    #[arg(long)]
    pub select: Option<String>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Execute highlight command
pub async fn execute(args: HighlightArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(args.config.as_ref())?;
    let original = super::read_document(&args.original)?;
    let updated = super::read_document(&args.updated)?;

    let session = ComparisonSession::with_default_extractor(config);
    let result = session.compare(original, updated).await?;

    let layouts = [
        (DocumentSide::Original, args.original_layout),
        (DocumentSide::Updated, args.updated_layout),
    ];
    for (side, path) in layouts {
        let Some(path) = path else { continue };
        let fragments = super::read_layout(&path)?;
        let outcome = session.layout_ready(&result.id, side, fragments).await?;
        if !outcome.is_applied() {
            return Err(format!("layout for {} document was not applied", side).into());
        }
    }

    if let Some(id) = args.select {
        let id = ChangeId::from_string(id);
        if result.change(&id).is_none() {
            return Err(format!("no change with id '{}'", id).into());
        }
        session.select(Some(id));
    }

    let original_highlights: Vec<_> = session.highlights(DocumentSide::Original).iter().cloned().collect();
    let updated_highlights: Vec<_> = session.highlights(DocumentSide::Updated).iter().cloned().collect();
    let output = json!({
        "comparison": &*result,
        "highlights": {
            "original": original_highlights,
            "updated": updated_highlights,
        },
    });
    println!("{}", super::to_json(&output)?);

    Ok(())
}
