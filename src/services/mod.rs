//! Orchestration of the parse → classify → write pipeline.

mod indexer;

pub use indexer::{IndexReport, IndexService};
