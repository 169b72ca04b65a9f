//! Goal-to-utterance resolution.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::store::{Template, TemplateStore};

/// A rendered question together with the template it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verbalisation {
    /// Question text with arguments substituted
    pub text: String,
    /// Template before substitution
    pub template: String,
    /// The phrasing asks for a counterfactual
    pub counterfactual: bool,
    /// The phrasing asks for an explanation
    pub explanation: bool,
}

/// Query for one verbalisation.
#[derive(Debug, Clone, Default)]
pub struct VerbalisationRequest<'a> {
    /// Goal string, e.g. `valence:surface_form`
    pub goal: &'a str,
    /// Optional attribute qualifier appended to the goal
    pub attribute: Option<&'a str>,
    /// Positional arguments for `<x>`, `<y>`, `<z>`
    pub arguments: &'a [&'a str],
    /// Use the `individual:` scope instead of `concept:`
    pub individual: bool,
}

impl<'a> VerbalisationRequest<'a> {
    pub fn new(goal: &'a str, arguments: &'a [&'a str], individual: bool) -> Self {
        Self {
            goal,
            attribute: None,
            arguments,
            individual,
        }
    }

    /// Builder: qualify the goal with an attribute.
    pub fn with_attribute(mut self, attribute: &'a str) -> Self {
        self.attribute = Some(attribute);
        self
    }

    /// Store pattern for this request, e.g. `<concept:instances>`.
    pub fn pattern(&self) -> String {
        let scope = if self.individual { "individual" } else { "concept" };
        match self.attribute {
            Some(attribute) => format!("<{}:{}:{}>", scope, self.goal, attribute),
            None => format!("<{}:{}>", scope, self.goal),
        }
    }

    /// Number of non-empty arguments.
    pub fn arity(&self) -> usize {
        self.arguments.iter().filter(|a| !a.is_empty()).count()
    }
}

/// Picks and renders templates from a session-owned store.
#[derive(Debug, Clone)]
pub struct VerbalisationResolver {
    store: TemplateStore,
    disallow_repeats: bool,
}

impl VerbalisationResolver {
    /// Create a resolver over a store.
    pub fn new(store: TemplateStore, disallow_repeats: bool) -> Self {
        Self {
            store,
            disallow_repeats,
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &TemplateStore {
        &self.store
    }

    /// Templates eligible for a request, after arity filtering.
    pub fn candidates(&self, request: &VerbalisationRequest<'_>) -> Vec<&Template> {
        let pattern = request.pattern();
        let templates = match request.attribute {
            Some(_) => self.store.exact(&pattern),
            None => self.store.generalized(&pattern),
        };
        let arity = request.arity();
        let candidates: Vec<&Template> = templates
            .iter()
            .filter(|t| matches_arity(t, arity))
            .collect();
        debug!(
            %pattern,
            arity,
            available = templates.len(),
            eligible = candidates.len(),
            "Template candidates"
        );
        candidates
    }

    /// Choose a template for the request and render it.
    ///
    /// Returns `None` when no template of the right arity exists.
    pub fn resolve<R: Rng + ?Sized>(
        &mut self,
        request: &VerbalisationRequest<'_>,
        rng: &mut R,
    ) -> Option<Verbalisation> {
        let chosen = (*self.candidates(request).choose(rng)?).clone();

        if self.disallow_repeats {
            let removed = self.store.remove_text(&chosen.text);
            debug!(template = %chosen.text, removed, "Template retired");
        }

        Some(Verbalisation {
            text: substitute(&chosen.text, request.arguments),
            template: chosen.text,
            counterfactual: chosen.counterfactual,
            explanation: chosen.explanation,
        })
    }
}

/// A template needing N arguments is only offered when exactly N are known.
fn matches_arity(template: &Template, arity: usize) -> bool {
    match arity {
        1..=3 => template.arity() == arity,
        _ => true,
    }
}

/// Replace `<x>`, `<y>`, `<z>` with the positional arguments.
pub fn substitute(template: &str, arguments: &[&str]) -> String {
    ["<x>", "<y>", "<z>"]
        .iter()
        .zip(arguments)
        .fold(template.to_string(), |text, (placeholder, argument)| {
            text.replace(placeholder, argument)
        })
}
