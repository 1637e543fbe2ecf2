// evidence.rs — Checking required tool invocations.
//
// Tool names are compared case-sensitively after both sides pass through
// the alias table. The table absorbs the few names the host records under
// more than one spelling (e.g. "Write" and "write").

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::context::ToolInvocation;

/// Alias → canonical tool name table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolAliases(BTreeMap<String, String>);

impl ToolAliases {
    /// An empty table: every name is its own canonical form.
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, alias: impl Into<String>, canonical: impl Into<String>) {
        self.0.insert(alias.into(), canonical.into());
    }

    /// Canonical form of `name`; names without an alias map to themselves.
    pub fn canonical<'a>(&'a self, name: &'a str) -> &'a str {
        self.0.get(name).map(String::as_str).unwrap_or(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(a, c)| (a.as_str(), c.as_str()))
    }
}

impl Default for ToolAliases {
    fn default() -> Self {
        let mut aliases = Self::empty();
        aliases.insert("Write", "write");
        aliases
    }
}

/// Whether any invocation (after alias normalization) is one of `required`.
///
/// An empty invocation list or an empty requirement never counts as evidence.
pub fn has_any<S: AsRef<str>>(
    invocations: &[ToolInvocation],
    required: &[S],
    aliases: &ToolAliases,
) -> bool {
    invocations.iter().any(|inv| {
        let name = aliases.canonical(&inv.name);
        required
            .iter()
            .any(|req| aliases.canonical(req.as_ref()) == name)
    })
}
