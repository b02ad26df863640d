//! Classifier options threaded through a whole walk.

use serde::{Deserialize, Serialize};

/// Naming options applied by every classifier.
///
/// Built once per run and passed by reference; never mutated mid-walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierOptions {
    /// Append `(params) -> return` to callable entries.
    #[serde(default)]
    pub include_function_signatures: bool,
    /// Prefix members with their enclosing scopes (`Outer::member`).
    #[serde(default)]
    pub include_parent_scopes: bool,
}

impl ClassifierOptions {
    pub fn new(include_function_signatures: bool, include_parent_scopes: bool) -> Self {
        Self {
            include_function_signatures,
            include_parent_scopes,
        }
    }
}
