//! Init command handler.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;

use crate::index::SearchIndex;

/// Create the search index schema.
#[derive(Parser)]
pub struct InitCommand {
    /// Docset index database to create or upgrade
    #[arg(long)]
    pub db: PathBuf,
}

impl InitCommand {
    /// Run the init command to initialize the database schema.
    pub fn run(self) -> Result<()> {
        tracing::info!("Opening search index {}", self.db.display());
        let index = SearchIndex::open(&self.db)?;
        tracing::info!(
            "Search index ready at schema version {} ({} entries)",
            index.schema_version()?,
            index.count()?
        );
        Ok(())
    }
}
