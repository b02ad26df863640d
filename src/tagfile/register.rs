//! Ordered classifier registry.

use crate::models::TagNode;

use super::classifiers::{
    CompoundClassifier, DocumentClassifier, FallbackClassifier, FunctionClassifier,
    MemberClassifier, TagClassifier,
};

/// Classifiers in registration order.
///
/// Dispatch picks the first classifier whose `matches` accepts a node and
/// falls back to [`FallbackClassifier`] otherwise. Registering two
/// classifiers for the same kind is a configuration error: the later one is
/// never reached.
pub struct Register {
    classifiers: Vec<Box<dyn TagClassifier>>,
    fallback: FallbackClassifier,
}

impl Register {
    /// An empty register; every node goes to the fallback.
    pub fn new() -> Self {
        Self {
            classifiers: Vec::new(),
            fallback: FallbackClassifier,
        }
    }

    /// The bundled Doxygen kind mappings.
    pub fn standard() -> Self {
        Self::new()
            .register(CompoundClassifier::class())
            .register(CompoundClassifier::structure())
            .register(CompoundClassifier::union())
            .register(CompoundClassifier::interface())
            .register(CompoundClassifier::protocol())
            .register(CompoundClassifier::exception())
            .register(CompoundClassifier::namespace())
            .register(DocumentClassifier::file())
            .register(DocumentClassifier::page())
            .register(DocumentClassifier::group())
            .register(FunctionClassifier::new())
            .register(MemberClassifier::define())
            .register(MemberClassifier::enumeration())
            .register(MemberClassifier::enum_value())
            .register(MemberClassifier::typedef())
            .register(MemberClassifier::variable())
            .register(MemberClassifier::property())
    }

    pub fn register(mut self, classifier: impl TagClassifier + 'static) -> Self {
        self.classifiers.push(Box::new(classifier));
        self
    }

    /// Drop every classifier registered under `name`.
    pub fn unregister(mut self, name: &str) -> Self {
        self.classifiers.retain(|c| c.name() != name);
        self
    }

    /// Iterate over registered classifiers in dispatch order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn TagClassifier> {
        self.classifiers.iter().map(|c| c.as_ref())
    }

    pub fn len(&self) -> usize {
        self.classifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classifiers.is_empty()
    }

    /// The classifier responsible for `node`.
    pub fn find(&self, node: &TagNode) -> &dyn TagClassifier {
        self.iter()
            .find(|c| c.matches(node))
            .unwrap_or(&self.fallback as &dyn TagClassifier)
    }
}

impl Default for Register {
    fn default() -> Self {
        Self::standard()
    }
}
