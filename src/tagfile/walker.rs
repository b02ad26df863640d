//! Depth-first traversal of a tag tree into index entries.

use std::slice;

use crate::models::{ClassifierOptions, ResolvedEntry, ScopeChain, TagNode};

use super::classifiers::Descent;
use super::register::Register;

/// Counters collected while walking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Nodes handed to a classifier.
    pub visited: usize,
    /// Entries produced.
    pub emitted: usize,
    /// Nodes that produced no entry (unknown kind, anonymous, no path).
    pub skipped: usize,
}

struct Frame<'a> {
    nodes: slice::Iter<'a, TagNode>,
    scope: ScopeChain,
}

/// Lazy pre-order stream of entries for a tag tree.
///
/// A compound's entry is yielded before any of its members. The walker is
/// single pass: once exhausted it stays exhausted.
pub struct Walker<'a> {
    register: &'a Register,
    options: ClassifierOptions,
    stack: Vec<Frame<'a>>,
    stats: WalkStats,
}

/// Walk `nodes` in document order with an empty initial scope chain.
pub fn walk<'a>(
    nodes: &'a [TagNode],
    register: &'a Register,
    options: ClassifierOptions,
) -> Walker<'a> {
    Walker {
        register,
        options,
        stack: vec![Frame {
            nodes: nodes.iter(),
            scope: ScopeChain::root(),
        }],
        stats: WalkStats::default(),
    }
}

impl<'a> Walker<'a> {
    pub fn stats(&self) -> WalkStats {
        self.stats
    }
}

impl<'a> Iterator for Walker<'a> {
    type Item = ResolvedEntry;

    fn next(&mut self) -> Option<ResolvedEntry> {
        loop {
            let frame = self.stack.last_mut()?;
            let Some(node) = frame.nodes.next() else {
                self.stack.pop();
                continue;
            };

            let classifier = self.register.find(node);
            let entry = classifier.classify(node, &self.options, &frame.scope);

            let child_scope = if node.children.is_empty() {
                None
            } else {
                match classifier.descent(node) {
                    Descent::Skip => None,
                    Descent::Inherit => Some(frame.scope.clone()),
                    Descent::Push(name) => Some(frame.scope.child(&name)),
                }
            };

            if let Some(scope) = child_scope {
                self.stack.push(Frame {
                    nodes: node.children.iter(),
                    scope,
                });
            }

            self.stats.visited += 1;
            match entry {
                Some(entry) => {
                    self.stats.emitted += 1;
                    return Some(entry);
                }
                None => {
                    self.stats.skipped += 1;
                    tracing::trace!(
                        "Skipped {} kind={} name={:?} ({})",
                        node.element.tag_name(),
                        node.kind,
                        node.name,
                        classifier.name()
                    );
                }
            }
        }
    }
}
