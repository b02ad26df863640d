//! Dump command handler.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;

use crate::config::IndexConfig;
use crate::models::ResolvedEntry;
use crate::services::IndexService;
use crate::tagfile::TagFile;

use super::NamingArgs;

/// Print the entries a tag file yields.
#[derive(Parser)]
pub struct DumpCommand {
    /// Doxygen tag file to read
    #[arg(long)]
    pub tag: PathBuf,

    #[command(flatten)]
    pub naming: NamingArgs,

    /// Emit one JSON object per line instead of tab-separated columns
    #[arg(long)]
    pub json: bool,
}

impl DumpCommand {
    /// Run the dump command.
    pub fn run(self, config: &IndexConfig) -> Result<()> {
        let tagfile = TagFile::read(&self.tag)?;
        let service = IndexService::new(self.naming.resolve(config));

        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        let mut count = 0;
        for entry in service.entries(&tagfile) {
            write_entry(&mut out, &entry, self.json)?;
            count += 1;
        }
        out.flush()?;

        tracing::info!("{} entries from {} nodes", count, tagfile.node_count());
        Ok(())
    }
}

fn write_entry(out: &mut impl Write, entry: &ResolvedEntry, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer(&mut *out, entry)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}\t{}\t{}", entry.entry_type, entry.name, entry.path)?;
    }
    Ok(())
}
