//! Doxygen tag file parsing.
//!
//! Only `compound` and `member` elements become [`TagNode`]s; everything
//! else (`<class>` cross references, `<docanchor>`, `<enumvalue>` inside
//! enumerations, ...) is ignored. Elements without a `kind` are dropped.

use std::path::Path;

use roxmltree::{Document, Node, ParsingOptions};

use crate::error::AppError;
use crate::models::{ClassifierOptions, TagElement, TagNode};

use super::register::Register;
use super::walker::{walk, Walker};

/// Root element of every Doxygen tag file.
pub const TAGFILE_ROOT: &str = "tagfile";

/// A parsed tag file: the top-level nodes in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFile {
    nodes: Vec<TagNode>,
}

impl TagFile {
    /// Read and parse the tag file at `path`.
    pub fn read(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path).map_err(|source| AppError::TagFileRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Parse tag file text.
    pub fn parse(text: &str) -> Result<Self, AppError> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = Document::parse_with_options(text, options)?;

        let root = doc.root_element();
        if !root.has_tag_name(TAGFILE_ROOT) {
            return Err(AppError::InvalidTagFile(format!(
                "expected <{}> root element, found <{}>",
                TAGFILE_ROOT,
                root.tag_name().name()
            )));
        }

        let nodes = root.children().filter_map(parse_node).collect();
        Ok(Self { nodes })
    }

    /// Top-level nodes in document order.
    pub fn nodes(&self) -> &[TagNode] {
        &self.nodes
    }

    /// Total number of nodes, nested members included.
    pub fn node_count(&self) -> usize {
        self.nodes.iter().map(TagNode::subtree_len).sum()
    }

    /// Lazily classify every node.
    pub fn walk<'a>(&'a self, register: &'a Register, options: ClassifierOptions) -> Walker<'a> {
        walk(&self.nodes, register, options)
    }
}

fn parse_node(node: Node) -> Option<TagNode> {
    if !node.is_element() {
        return None;
    }
    let element = TagElement::from_tag_name(node.tag_name().name())?;

    let kind = match node.attribute("kind").map(str::trim) {
        Some(kind) if !kind.is_empty() => kind,
        _ => {
            tracing::trace!("Ignoring <{}> without kind attribute", element.tag_name());
            return None;
        }
    };

    let mut tag = TagNode::new(element, kind);
    for child in node.children().filter(Node::is_element) {
        let slot = match child.tag_name().name() {
            "name" => &mut tag.name,
            "title" => &mut tag.title,
            "filename" => &mut tag.filename,
            "anchorfile" => &mut tag.anchorfile,
            "anchor" => &mut tag.anchor,
            "arglist" => &mut tag.arglist,
            "type" => &mut tag.return_type,
            _ => {
                if let Some(nested) = parse_node(child) {
                    tag.children.push(nested);
                }
                continue;
            }
        };
        // First occurrence wins.
        if slot.is_none() {
            *slot = Some(text_of(child));
        }
    }

    Some(tag)
}

fn text_of(node: Node) -> String {
    node.descendants()
        .filter(Node::is_text)
        .filter_map(|n| n.text())
        .collect()
}
