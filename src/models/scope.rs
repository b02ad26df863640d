//! Enclosing scope chain for nested tag members.

/// Member-access separator used when qualifying names.
pub const SCOPE_SEPARATOR: &str = "::";

/// Ordered enclosing scope names, outermost first.
///
/// A chain is never modified in place; descending into a compound yields a
/// new chain with one more segment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeChain(Vec<String>);

impl ScopeChain {
    /// The empty chain used for top-level nodes.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new chain with `name` appended as the innermost scope.
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(name.to_string());
        Self(segments)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for ScopeChain {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl std::fmt::Display for ScopeChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join(SCOPE_SEPARATOR))
    }
}
