//! Template store keyed by goal pattern.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One authored phrasing of a goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Utterance with `<x>`, `<y>`, `<z>` placeholders
    pub text: String,
    /// The phrasing asks for a counterfactual
    #[serde(default)]
    pub counterfactual: bool,
    /// The phrasing asks for an explanation
    #[serde(default)]
    pub explanation: bool,
}

impl Template {
    /// Create a plain template without flags.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            counterfactual: false,
            explanation: false,
        }
    }

    /// Number of positional arguments the template needs.
    pub fn arity(&self) -> usize {
        if self.text.contains("<z>") {
            3
        } else if self.text.contains("<y>") {
            2
        } else {
            1
        }
    }
}

/// Templates for every goal pattern, with a generalized index.
///
/// Patterns look like `<concept:valence:surface_form>`. Besides the exact
/// buckets the store keeps, for each pattern, the union of its own
/// templates and those of every pattern one attribute deeper, so that
/// `<concept:definition>` reaches all `<concept:definition:*>` templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    exact: HashMap<String, Vec<Template>>,
    generalized: HashMap<String, Vec<Template>>,
}

impl TemplateStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from `(pattern, template)` pairs, keeping file order
    /// within each pattern.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, Template)>) -> Self {
        let mut exact: HashMap<String, Vec<Template>> = HashMap::new();
        for (pattern, template) in entries {
            exact.entry(pattern).or_default().push(template);
        }

        let mut generalized = exact.clone();
        for (pattern, templates) in &exact {
            if let Some(parent) = parent_pattern(pattern) {
                generalized
                    .entry(parent)
                    .or_default()
                    .extend(templates.iter().cloned());
            }
        }

        Self { exact, generalized }
    }

    /// Templates stored under exactly this pattern.
    pub fn exact(&self, pattern: &str) -> &[Template] {
        self.exact.get(pattern).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Templates reachable from this pattern, including attribute-qualified ones.
    pub fn generalized(&self, pattern: &str) -> &[Template] {
        self.generalized
            .get(pattern)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Remove a template text from every bucket that holds it.
    ///
    /// Returns the number of removed occurrences.
    pub fn remove_text(&mut self, text: &str) -> usize {
        let mut removed = 0;
        for templates in self.exact.values_mut().chain(self.generalized.values_mut()) {
            let before = templates.len();
            templates.retain(|t| t.text != text);
            removed += before - templates.len();
        }
        removed
    }

    /// Number of distinct exact patterns.
    pub fn pattern_count(&self) -> usize {
        self.exact.len()
    }

    /// Total templates across exact patterns.
    pub fn template_count(&self) -> usize {
        self.exact.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.template_count() == 0
    }
}

/// `<concept:definition:surface_form>` -> `<concept:definition>`.
fn parent_pattern(pattern: &str) -> Option<String> {
    let inner = pattern.strip_prefix('<')?.strip_suffix('>')?;
    let (parent, _) = inner.rsplit_once(':')?;
    // A bare scope is not a goal.
    if !parent.contains(':') {
        return None;
    }
    Some(format!("<{}>", parent))
}
