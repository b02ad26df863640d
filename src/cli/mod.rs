//! CLI module for doxyindex.
//!
//! Subcommands:
//! - `index`: Convert a tag file into a docset search index
//! - `init`: Create the search index schema
//! - `dump`: Print the entries a tag file would produce

mod dump;
mod index;
mod init;

use clap::{Args, Parser, Subcommand};

use crate::config::{Config, IndexConfig};
use crate::models::ClassifierOptions;

pub use dump::DumpCommand;
pub use index::IndexCommand;
pub use init::InitCommand;

/// doxyindex - Doxygen tag file to docset index converter
#[derive(Parser)]
#[command(name = "doxyindex")]
#[command(about = "Convert a Doxygen tag file into a Dash/Zeal docset search index")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Index a tag file into a docset database
    Index(IndexCommand),

    /// Create the searchIndex schema without indexing anything
    Init(InitCommand),

    /// Print the entries a tag file yields, without writing a database
    Dump(DumpCommand),
}

impl App {
    /// Run the CLI application.
    pub fn run(self) -> color_eyre::Result<()> {
        let config = Config::load()?;
        match self.command {
            Command::Index(cmd) => cmd.run(&config.index),
            Command::Init(cmd) => cmd.run(),
            Command::Dump(cmd) => cmd.run(&config.index),
        }
    }
}

/// Naming switches shared by `index` and `dump`.
///
/// Switches only turn behaviour on; the configured value applies otherwise.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct NamingArgs {
    /// Include function arguments and return types in entry names
    #[arg(long)]
    pub include_function_signatures: bool,

    /// Qualify entry names with their enclosing scopes (Outer::Inner::name)
    #[arg(long)]
    pub include_parent_scopes: bool,
}

impl NamingArgs {
    pub fn resolve(&self, config: &IndexConfig) -> ClassifierOptions {
        let configured = config.classifier_options();
        ClassifierOptions::new(
            self.include_function_signatures || configured.include_function_signatures,
            self.include_parent_scopes || configured.include_parent_scopes,
        )
    }
}
