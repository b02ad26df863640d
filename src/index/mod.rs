//! Docset search index persistence.

mod store;

pub use store::{SearchIndex, WriteSummary};
