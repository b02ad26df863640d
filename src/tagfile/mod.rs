//! Tag file classification engine.
//!
//! Parses a Doxygen tag file into [`TagNode`](crate::models::TagNode)s and
//! walks them through a [`Register`] of classifiers, yielding one
//! [`ResolvedEntry`](crate::models::ResolvedEntry) per indexable symbol.

mod classifiers;
mod format;
mod parser;
mod register;
mod walker;

pub use classifiers::{
    CompoundClassifier, Descent, DocumentClassifier, FallbackClassifier, FunctionClassifier,
    MemberClassifier, TagClassifier,
};
pub use format::{format_name, Signature};
pub use parser::{TagFile, TAGFILE_ROOT};
pub use register::Register;
pub use walker::{walk, WalkStats, Walker};
