// registry.rs — Ordered collection of policy rules.
//
// Rules are kept sorted by descending priority. The sort is stable, so
// rules with equal priority keep their registration order. The built-in
// rules share one priority and therefore always run in the order they are
// registered in `builtin()`.

use std::fmt;

use crate::rule::{
    AudioLengthRule, DocumentationPresentationRule, PolicyRule, ReportEvidenceRule,
    UnstructuredResponseRule,
};

/// The ordered rule list consulted by the engine.
#[derive(Default)]
pub struct PolicyRegistry {
    rules: Vec<Box<dyn PolicyRule>>,
}

impl PolicyRegistry {
    /// An empty registry (allows everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// The four built-in rules in their fixed order:
    /// report evidence, documentation presentation, audio length,
    /// unstructured long response.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(ReportEvidenceRule);
        registry.register(DocumentationPresentationRule);
        registry.register(AudioLengthRule);
        registry.register(UnstructuredResponseRule);
        registry
    }

    /// Add a rule, placing it after every rule of equal or higher priority.
    pub fn register<R: PolicyRule + 'static>(&mut self, rule: R) {
        self.rules.push(Box::new(rule));
        // Stable: equal priorities keep insertion order.
        self.rules.sort_by_key(|r| std::cmp::Reverse(r.priority()));
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> impl Iterator<Item = &dyn PolicyRule> {
        self.rules.iter().map(|r| &**r)
    }

    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for PolicyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyRegistry")
            .field("rules", &self.names())
            .finish()
    }
}
