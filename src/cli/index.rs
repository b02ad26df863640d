//! Index command handler.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;

use crate::config::IndexConfig;
use crate::index::SearchIndex;
use crate::plist::{self, PlistUpdate};
use crate::services::IndexService;
use crate::tagfile::TagFile;

use super::NamingArgs;

/// Convert a tag file into a docset search index.
#[derive(Parser)]
pub struct IndexCommand {
    /// Doxygen tag file to read
    #[arg(long)]
    pub tag: PathBuf,

    /// Docset index database (usually X.docset/Contents/Resources/docSet.dsidx)
    #[arg(long)]
    pub db: PathBuf,

    #[command(flatten)]
    pub naming: NamingArgs,

    /// Leave the docset's Info.plist untouched
    #[arg(long)]
    pub dont_update_info_plist: bool,

    /// Drop existing index rows before writing
    #[arg(long)]
    pub fresh: bool,
}

impl IndexCommand {
    /// Run the index command.
    pub fn run(self, config: &IndexConfig) -> Result<()> {
        let options = self.naming.resolve(config);
        tracing::debug!("Classifier options: {:?}", options);

        // Input errors must surface before the database is touched.
        tracing::info!("Reading tag file {}", self.tag.display());
        let tagfile = TagFile::read(&self.tag)?;

        tracing::info!("Opening search index {}", self.db.display());
        let mut index = SearchIndex::open(&self.db)?;

        let service = IndexService::new(options);
        let report = if self.fresh || config.fresh {
            tracing::info!("Replacing existing search index entries");
            service.rebuild(&tagfile, &mut index)?
        } else {
            service.index(&tagfile, &mut index)?
        };
        tracing::info!("Search index now holds {} entries", index.count()?);
        if report.write.written == 0 {
            tracing::warn!("No entries found in {}", self.tag.display());
        }

        if self.dont_update_info_plist || !config.update_info_plist {
            tracing::debug!("Skipping Info.plist update");
            return Ok(());
        }
        self.update_info_plist()
    }

    fn update_info_plist(&self) -> Result<()> {
        let Some(plist_path) = plist::info_plist_path(&self.db) else {
            tracing::warn!(
                "Cannot locate Info.plist for {}, not a docset layout",
                self.db.display()
            );
            return Ok(());
        };

        if !plist_path.is_file() {
            tracing::warn!("Info.plist not found at {}, skipping", plist_path.display());
            return Ok(());
        }

        match plist::mark_dash_docset(&plist_path)? {
            PlistUpdate::Inserted => {
                tracing::info!("Added {} to {}", plist::DASH_DOCSET_KEY, plist_path.display())
            }
            PlistUpdate::Replaced => {
                tracing::info!("Set {} in {}", plist::DASH_DOCSET_KEY, plist_path.display())
            }
            PlistUpdate::Unchanged => {
                tracing::debug!("{} already set in {}", plist::DASH_DOCSET_KEY, plist_path.display())
            }
        }
        Ok(())
    }
}
