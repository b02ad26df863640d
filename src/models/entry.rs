//! Docset entry categories and resolved index entries.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Fixed vocabulary of docset entry types.
///
/// The string form is what Dash and Zeal expect in the `type` column of
/// `searchIndex`, so `Display` and `FromStr` must round-trip exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntryType {
    Class,
    Struct,
    Union,
    Interface,
    Protocol,
    Exception,
    Namespace,
    File,
    Guide,
    Module,
    Function,
    Method,
    Variable,
    Property,
    Enum,
    Value,
    Type,
    Macro,
}

impl EntryType {
    /// Returns the docset category string for this entry type.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Class => "Class",
            EntryType::Struct => "Struct",
            EntryType::Union => "Union",
            EntryType::Interface => "Interface",
            EntryType::Protocol => "Protocol",
            EntryType::Exception => "Exception",
            EntryType::Namespace => "Namespace",
            EntryType::File => "File",
            EntryType::Guide => "Guide",
            EntryType::Module => "Module",
            EntryType::Function => "Function",
            EntryType::Method => "Method",
            EntryType::Variable => "Variable",
            EntryType::Property => "Property",
            EntryType::Enum => "Enum",
            EntryType::Value => "Value",
            EntryType::Type => "Type",
            EntryType::Macro => "Macro",
        }
    }

    /// Returns a static slice of all entry types.
    pub fn all() -> &'static [EntryType] {
        &[
            EntryType::Class,
            EntryType::Struct,
            EntryType::Union,
            EntryType::Interface,
            EntryType::Protocol,
            EntryType::Exception,
            EntryType::Namespace,
            EntryType::File,
            EntryType::Guide,
            EntryType::Module,
            EntryType::Function,
            EntryType::Method,
            EntryType::Variable,
            EntryType::Property,
            EntryType::Enum,
            EntryType::Value,
            EntryType::Type,
            EntryType::Macro,
        ]
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntryType::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Invalid entry type '{}'", s))
    }
}

/// One row of the docset search index.
///
/// Only produced once name, type and path are all known; a node that
/// cannot supply all three yields no entry at all.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedEntry {
    /// Display name after scope qualification and signature annotation.
    pub name: String,
    /// Docset category.
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Documentation file, optionally with a `#fragment`.
    pub path: String,
}

impl ResolvedEntry {
    pub fn new(name: impl Into<String>, entry_type: EntryType, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entry_type,
            path: path.into(),
        }
    }
}
