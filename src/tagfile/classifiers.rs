//! Entry classifiers: one rule per tag kind.
//!
//! A classifier decides whether it handles a node, turns the node into at
//! most one [`ResolvedEntry`] and says how the walker should treat the
//! node's children. Classifiers are registered in a
//! [`Register`](super::Register); the first one that matches a node wins.

use crate::models::{ClassifierOptions, EntryType, ResolvedEntry, ScopeChain, TagNode};

use super::format::{format_name, Signature};

/// How the walker dispatches a node's children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Descent {
    /// Children are not visited.
    Skip,
    /// Children are visited with the parent's scope chain unchanged.
    Inherit,
    /// Children are visited with this name pushed onto the scope chain.
    Push(String),
}

/// Classification rule for one family of tag nodes.
pub trait TagClassifier: Send + Sync {
    /// Short identifier, used in logs.
    fn name(&self) -> &'static str;

    fn matches(&self, node: &TagNode) -> bool;

    /// Resolve the node into an index entry.
    ///
    /// Returns `None` when the node lacks a usable name or path; such nodes
    /// are skipped without affecting their siblings.
    fn classify(
        &self,
        node: &TagNode,
        options: &ClassifierOptions,
        scope: &ScopeChain,
    ) -> Option<ResolvedEntry>;

    fn descent(&self, _node: &TagNode) -> Descent {
        Descent::Skip
    }
}

// =============================================================================
// Compounds
// =============================================================================

/// Type-like and namespace compounds. Members are qualified with the
/// compound's name.
#[derive(Debug, Clone)]
pub struct CompoundClassifier {
    kind: &'static str,
    entry_type: EntryType,
}

impl CompoundClassifier {
    pub const fn new(kind: &'static str, entry_type: EntryType) -> Self {
        Self { kind, entry_type }
    }

    pub const fn class() -> Self {
        Self::new("class", EntryType::Class)
    }

    pub const fn structure() -> Self {
        Self::new("struct", EntryType::Struct)
    }

    pub const fn union() -> Self {
        Self::new("union", EntryType::Union)
    }

    pub const fn interface() -> Self {
        Self::new("interface", EntryType::Interface)
    }

    pub const fn protocol() -> Self {
        Self::new("protocol", EntryType::Protocol)
    }

    pub const fn exception() -> Self {
        Self::new("exception", EntryType::Exception)
    }

    pub const fn namespace() -> Self {
        Self::new("namespace", EntryType::Namespace)
    }
}

impl TagClassifier for CompoundClassifier {
    fn name(&self) -> &'static str {
        self.kind
    }

    fn matches(&self, node: &TagNode) -> bool {
        node.is_compound() && node.kind == self.kind
    }

    fn classify(
        &self,
        node: &TagNode,
        options: &ClassifierOptions,
        scope: &ScopeChain,
    ) -> Option<ResolvedEntry> {
        let name = node.identifier()?;
        let path = node.doc_path()?;
        Some(ResolvedEntry::new(
            format_name(name, scope, None, options),
            self.entry_type,
            path,
        ))
    }

    fn descent(&self, node: &TagNode) -> Descent {
        match node.identifier() {
            Some(name) => Descent::Push(name.to_string()),
            // Members of anonymous compounds keep the enclosing scope.
            None => Descent::Inherit,
        }
    }
}

// =============================================================================
// Callables
// =============================================================================

/// Functions, and the Qt `slot`/`signal` member kinds.
///
/// Nested callables are Methods, top-level ones Functions.
#[derive(Debug, Clone)]
pub struct FunctionClassifier {
    kinds: &'static [&'static str],
}

impl FunctionClassifier {
    pub const fn new() -> Self {
        Self {
            kinds: &["function", "slot", "signal"],
        }
    }
}

impl Default for FunctionClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl TagClassifier for FunctionClassifier {
    fn name(&self) -> &'static str {
        "function"
    }

    fn matches(&self, node: &TagNode) -> bool {
        node.is_member() && self.kinds.contains(&node.kind.as_str())
    }

    fn classify(
        &self,
        node: &TagNode,
        options: &ClassifierOptions,
        scope: &ScopeChain,
    ) -> Option<ResolvedEntry> {
        let name = node.identifier()?;
        let path = node.doc_path()?;
        let signature =
            Signature::from_arglist(node.arglist.as_deref(), node.return_type.as_deref());

        let entry_type = if scope.is_empty() {
            EntryType::Function
        } else {
            EntryType::Method
        };

        Some(ResolvedEntry::new(
            format_name(name, scope, Some(&signature), options),
            entry_type,
            path,
        ))
    }
}

// =============================================================================
// Plain members
// =============================================================================

/// Members with a fixed category and no signature: variables, enums, enum
/// values, typedefs, macros and properties.
#[derive(Debug, Clone)]
pub struct MemberClassifier {
    kind: &'static str,
    entry_type: EntryType,
}

impl MemberClassifier {
    pub const fn new(kind: &'static str, entry_type: EntryType) -> Self {
        Self { kind, entry_type }
    }

    pub const fn variable() -> Self {
        Self::new("variable", EntryType::Variable)
    }

    pub const fn enumeration() -> Self {
        Self::new("enumeration", EntryType::Enum)
    }

    pub const fn enum_value() -> Self {
        Self::new("enumvalue", EntryType::Value)
    }

    pub const fn typedef() -> Self {
        Self::new("typedef", EntryType::Type)
    }

    /// `#define` macros; function-like macros keep their bare name.
    pub const fn define() -> Self {
        Self::new("define", EntryType::Macro)
    }

    pub const fn property() -> Self {
        Self::new("property", EntryType::Property)
    }
}

impl TagClassifier for MemberClassifier {
    fn name(&self) -> &'static str {
        self.kind
    }

    fn matches(&self, node: &TagNode) -> bool {
        node.is_member() && node.kind == self.kind
    }

    fn classify(
        &self,
        node: &TagNode,
        options: &ClassifierOptions,
        scope: &ScopeChain,
    ) -> Option<ResolvedEntry> {
        let name = node.identifier()?;
        let path = node.doc_path()?;
        Some(ResolvedEntry::new(
            format_name(name, scope, None, options),
            self.entry_type,
            path,
        ))
    }
}

// =============================================================================
// Documents
// =============================================================================

/// Files, pages and groups.
#[derive(Debug, Clone)]
pub struct DocumentClassifier {
    kind: &'static str,
    entry_type: EntryType,
    prefer_title: bool,
    visit_members: bool,
    html_suffix: bool,
}

impl DocumentClassifier {
    /// Source files. Members are visited without a scope so free functions,
    /// globals and macros are indexed. Older Doxygen releases wrote file
    /// filenames without the `.html` extension; it is restored here.
    pub const fn file() -> Self {
        Self {
            kind: "file",
            entry_type: EntryType::File,
            prefer_title: false,
            visit_members: true,
            html_suffix: true,
        }
    }

    /// Related pages, indexed under their title.
    pub const fn page() -> Self {
        Self {
            kind: "page",
            entry_type: EntryType::Guide,
            prefer_title: true,
            visit_members: false,
            html_suffix: false,
        }
    }

    /// Groups (modules). Their member lists repeat members documented
    /// elsewhere, so they are not visited.
    pub const fn group() -> Self {
        Self {
            kind: "group",
            entry_type: EntryType::Module,
            prefer_title: true,
            visit_members: false,
            html_suffix: false,
        }
    }
}

impl TagClassifier for DocumentClassifier {
    fn name(&self) -> &'static str {
        self.kind
    }

    fn matches(&self, node: &TagNode) -> bool {
        node.is_compound() && node.kind == self.kind
    }

    fn classify(
        &self,
        node: &TagNode,
        options: &ClassifierOptions,
        scope: &ScopeChain,
    ) -> Option<ResolvedEntry> {
        let identifier = node.identifier()?;
        let name = if self.prefer_title {
            node.display_title().unwrap_or(identifier)
        } else {
            identifier
        };

        let mut path = node.doc_path()?;
        if self.html_suffix && node.filename.is_some() && !has_extension(&path) {
            path.push_str(".html");
        }

        Some(ResolvedEntry::new(
            format_name(name, scope, None, options),
            self.entry_type,
            path,
        ))
    }

    fn descent(&self, _node: &TagNode) -> Descent {
        if self.visit_members {
            Descent::Inherit
        } else {
            Descent::Skip
        }
    }
}

fn has_extension(path: &str) -> bool {
    let file = path.rsplit('/').next().unwrap_or(path);
    file.contains('.')
}

// =============================================================================
// Fallback
// =============================================================================

/// Handles every node no registered classifier claims.
///
/// Emits nothing but keeps walking so recognized members below an unknown
/// compound are still indexed.
#[derive(Debug, Clone, Default)]
pub struct FallbackClassifier;

impl TagClassifier for FallbackClassifier {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn matches(&self, _node: &TagNode) -> bool {
        true
    }

    fn classify(
        &self,
        _node: &TagNode,
        _options: &ClassifierOptions,
        _scope: &ScopeChain,
    ) -> Option<ResolvedEntry> {
        None
    }

    fn descent(&self, _node: &TagNode) -> Descent {
        Descent::Inherit
    }
}
