//! Domain models for tag files and docset index entries.

mod entry;
mod options;
mod scope;
mod tag;

pub use entry::{EntryType, ResolvedEntry};
pub use options::ClassifierOptions;
pub use scope::{ScopeChain, SCOPE_SEPARATOR};
pub use tag::{TagElement, TagNode};
