//! Tag file node model.

use serde::Serialize;

/// The XML element a [`TagNode`] was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagElement {
    /// `<compound kind="...">`: classes, namespaces, files, pages, groups.
    Compound,
    /// `<member kind="...">`: functions, variables, enum values, defines.
    Member,
}

impl TagElement {
    /// Element name as it appears in the tag file.
    pub fn tag_name(&self) -> &'static str {
        match self {
            TagElement::Compound => "compound",
            TagElement::Member => "member",
        }
    }

    pub fn from_tag_name(name: &str) -> Option<Self> {
        match name {
            "compound" => Some(TagElement::Compound),
            "member" => Some(TagElement::Member),
            _ => None,
        }
    }
}

/// A compound or member read from a Doxygen tag file.
///
/// Text fields hold the raw element content as Doxygen wrote it; `None`
/// means the element was absent, `Some("")` that it was present but empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagNode {
    pub element: TagElement,
    /// The `kind` attribute; never empty.
    pub kind: String,
    pub name: Option<String>,
    /// Human title carried by pages and groups.
    pub title: Option<String>,
    pub filename: Option<String>,
    pub anchorfile: Option<String>,
    pub anchor: Option<String>,
    pub arglist: Option<String>,
    /// Return type (`<type>`) of callables, declared type of variables.
    pub return_type: Option<String>,
    pub children: Vec<TagNode>,
}

impl TagNode {
    pub fn new(element: TagElement, kind: impl Into<String>) -> Self {
        Self {
            element,
            kind: kind.into(),
            name: None,
            title: None,
            filename: None,
            anchorfile: None,
            anchor: None,
            arglist: None,
            return_type: None,
            children: Vec::new(),
        }
    }

    pub fn compound(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(TagElement::Compound, kind).with_name(name)
    }

    pub fn member(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(TagElement::Member, kind).with_name(name)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_anchor(mut self, anchorfile: impl Into<String>, anchor: impl Into<String>) -> Self {
        self.anchorfile = Some(anchorfile.into());
        self.anchor = Some(anchor.into());
        self
    }

    pub fn with_arglist(mut self, arglist: impl Into<String>) -> Self {
        self.arglist = Some(arglist.into());
        self
    }

    pub fn with_type(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }

    pub fn with_children(mut self, children: Vec<TagNode>) -> Self {
        self.children = children;
        self
    }

    pub fn is_compound(&self) -> bool {
        self.element == TagElement::Compound
    }

    pub fn is_member(&self) -> bool {
        self.element == TagElement::Member
    }

    /// Usable identifier, or `None` for missing and anonymous names.
    ///
    /// Doxygen names unnamed unions, structs and enums `@0`, `ns::@1` and so
    /// on; those never become entries.
    pub fn identifier(&self) -> Option<&str> {
        let name = self.name.as_deref()?.trim();
        if name.is_empty() {
            return None;
        }
        let last = name.rsplit("::").next().unwrap_or(name);
        if last.starts_with('@') {
            return None;
        }
        Some(name)
    }

    /// Title when present and non-blank, otherwise the identifier.
    pub fn display_title(&self) -> Option<&str> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .or_else(|| self.identifier())
    }

    /// Documentation path for this node.
    ///
    /// `<filename>` wins when present. Otherwise `<anchorfile>` is used,
    /// followed by `#anchor` when the anchor is non-empty. Returns `None` when
    /// neither yields a non-empty path.
    pub fn doc_path(&self) -> Option<String> {
        let path = if let Some(filename) = &self.filename {
            filename.trim().to_string()
        } else if let Some(anchorfile) = &self.anchorfile {
            let anchorfile = anchorfile.trim();
            match self.anchor.as_deref().map(str::trim) {
                Some(anchor) if !anchor.is_empty() => format!("{}#{}", anchorfile, anchor),
                _ => anchorfile.to_string(),
            }
        } else {
            return None;
        };

        if path.is_empty() || path.starts_with('#') {
            None
        } else {
            Some(path)
        }
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(TagNode::subtree_len).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_path_prefers_filename() {
        let node = TagNode::compound("class", "Foo")
            .with_filename("classFoo.html")
            .with_anchor("other.html", "abc");
        assert_eq!(node.doc_path().as_deref(), Some("classFoo.html"));
    }

    #[test]
    fn test_doc_path_joins_anchor() {
        let node = TagNode::member("function", "bar").with_anchor("classFoo.html", "a1b2c3");
        assert_eq!(node.doc_path().as_deref(), Some("classFoo.html#a1b2c3"));
    }

    #[test]
    fn test_doc_path_empty_anchor_uses_anchorfile() {
        let node = TagNode::member("define", "MAX").with_anchor("config_8h.html", "");
        assert_eq!(node.doc_path().as_deref(), Some("config_8h.html"));
    }

    #[test]
    fn test_doc_path_missing() {
        assert_eq!(TagNode::member("variable", "x").doc_path(), None);
        assert_eq!(
            TagNode::member("variable", "x").with_filename("  ").doc_path(),
            None
        );
        assert_eq!(
            TagNode::member("variable", "x").with_anchor("", "abc").doc_path(),
            None
        );
    }

    #[test]
    fn test_identifier_skips_anonymous() {
        assert_eq!(TagNode::compound("union", "@0").identifier(), None);
        assert_eq!(TagNode::compound("struct", "ns::@3").identifier(), None);
        assert_eq!(TagNode::compound("class", "").identifier(), None);
        assert_eq!(TagNode::new(TagElement::Member, "variable").identifier(), None);
        assert_eq!(TagNode::compound("class", "ns::Foo").identifier(), Some("ns::Foo"));
    }

    #[test]
    fn test_display_title_falls_back_to_name() {
        let page = TagNode::compound("page", "install").with_title("Installation");
        assert_eq!(page.display_title(), Some("Installation"));

        let untitled = TagNode::compound("page", "install").with_title(" ");
        assert_eq!(untitled.display_title(), Some("install"));
    }

    #[test]
    fn test_subtree_len() {
        let node = TagNode::compound("class", "Foo").with_children(vec![
            TagNode::member("function", "a"),
            TagNode::member("function", "b"),
        ]);
        assert_eq!(node.subtree_len(), 3);
    }
}
