//! Frames: what is known and still unknown about one concept.
//!
//! A frame covers a concept ("cat", "freedom"), an individual, or a
//! sub-context reached by exploration ("cat:kitten"). It tracks which
//! slots must be filled before the frame is satisfied (the core script),
//! which slots may never be asked, and which have been answered.

mod exploration;
mod slots;

pub use exploration::Exploration;
pub use slots::{Attribute, SlotKey, SlotWrite};

use std::collections::BTreeSet;

use rand::seq::IteratorRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::Result;

/// Definition, valence or prevalence knowledge about a frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeBag {
    /// The respondent's own wording
    pub surface_form: String,
    /// Numeric score derived from the surface form (valence/prevalence only)
    pub score: f64,
    /// Why the respondent holds this view
    pub explanation: String,
    /// Circumstances under which the view would not hold
    pub counterfactuals: Vec<String>,
}

/// Accumulated and missing knowledge about one concept or context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Concept name, or `parent:context` path for sub-contexts
    pub name: String,
    /// Whose perspective this frame holds; `None` is the generic holder
    pub belief_holder: Option<String>,
    /// Individuals skip valence and prevalence elicitation
    pub individual: bool,
    pub definition: AttributeBag,
    pub valence: AttributeBag,
    pub prevalence: AttributeBag,
    /// Related sub-concepts named by the respondent
    pub instances: Vec<String>,
    core_script: BTreeSet<SlotKey>,
    blocked: BTreeSet<SlotKey>,
    filled: BTreeSet<SlotKey>,
    optional: BTreeSet<SlotKey>,
}

impl Frame {
    /// Create a frame for a concept with the generic belief holder.
    pub fn new(name: impl Into<String>, individual: bool) -> Self {
        let mut core_script = BTreeSet::from([SlotKey::DefinitionSurfaceForm, SlotKey::Instances]);
        if !individual {
            core_script.insert(SlotKey::ValenceSurfaceForm);
            core_script.insert(SlotKey::PrevalenceSurfaceForm);
        }

        // Scores are derived from surface forms, never asked for directly.
        let mut blocked: BTreeSet<SlotKey> =
            SlotKey::ALL.into_iter().filter(SlotKey::is_score).collect();
        if individual {
            blocked.extend(SlotKey::ALL.into_iter().filter(|s| !core_script.contains(s)));
        }

        Self {
            name: name.into(),
            belief_holder: None,
            individual,
            definition: AttributeBag::default(),
            valence: AttributeBag::default(),
            prevalence: AttributeBag::default(),
            instances: Vec::new(),
            core_script,
            blocked,
            filled: BTreeSet::new(),
            optional: BTreeSet::new(),
        }
    }

    /// Builder: set the belief holder.
    pub fn with_belief_holder(mut self, holder: Option<String>) -> Self {
        self.belief_holder = holder;
        self
    }

    /// Every slot this frame carries.
    pub fn labels(&self) -> impl Iterator<Item = SlotKey> {
        SlotKey::ALL.into_iter()
    }

    /// Slots that must be filled before the frame is satisfied.
    pub fn core_script(&self) -> &BTreeSet<SlotKey> {
        &self.core_script
    }

    /// Slots excluded from elicitation.
    pub fn blocked(&self) -> &BTreeSet<SlotKey> {
        &self.blocked
    }

    /// Slots answered at least once.
    pub fn filled(&self) -> &BTreeSet<SlotKey> {
        &self.filled
    }

    /// Filled list slots that may be asked again.
    pub fn optional(&self) -> &BTreeSet<SlotKey> {
        &self.optional
    }

    /// Whether every core slot has been answered (or is blocked).
    pub fn is_satisfied(&self) -> bool {
        self.core_script
            .iter()
            .all(|s| self.filled.contains(s) || self.blocked.contains(s))
    }

    /// Sub-contexts are not defined on their own, and template arity
    /// rather than blocking decides which of their slots are askable.
    pub(crate) fn into_sub_context(mut self) -> Self {
        self.core_script.remove(&SlotKey::DefinitionSurfaceForm);
        self.blocked.clear();
        self
    }

    /// Store an answer in a slot.
    ///
    /// List slots append on every call; scalar slots overwrite.
    pub fn fill(&mut self, slot: SlotKey, value: impl Into<String>) {
        let value = value.into();
        match slot.write() {
            SlotWrite::Append => {
                self.list_mut(slot).push(value);
                self.optional.insert(slot);
            }
            SlotWrite::Scalar => {
                if let Some(score) = parse_score(&value) {
                    match slot {
                        SlotKey::ValenceSurfaceForm => self.valence.score = score,
                        SlotKey::PrevalenceSurfaceForm => self.prevalence.score = score,
                        _ => {}
                    }
                }
                *self.scalar_mut(slot) = value;
            }
            SlotWrite::Score => match parse_score(&value) {
                Some(score) => *self.score_mut(slot) = score,
                None => debug!(frame = %self.name, %slot, "Non-numeric score answer ignored"),
            },
        }
        self.filled.insert(slot);
    }

    /// Current value of a scalar slot.
    pub fn scalar(&self, slot: SlotKey) -> Option<&str> {
        let bag = self.bag(slot)?;
        match slot {
            SlotKey::DefinitionSurfaceForm
            | SlotKey::ValenceSurfaceForm
            | SlotKey::PrevalenceSurfaceForm => Some(&bag.surface_form),
            SlotKey::DefinitionExplanation
            | SlotKey::ValenceExplanation
            | SlotKey::PrevalenceExplanation => Some(&bag.explanation),
            _ => None,
        }
    }

    /// Current values of a list slot.
    pub fn list(&self, slot: SlotKey) -> Option<&[String]> {
        match slot {
            SlotKey::Instances => Some(&self.instances),
            s if s.is_list() => self.bag(s).map(|b| b.counterfactuals.as_slice()),
            _ => None,
        }
    }

    /// Sample one unfilled, unblocked core slot.
    pub fn sample_core_unfilled<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<SlotKey> {
        self.core_script
            .iter()
            .filter(|s| !self.filled.contains(*s) && !self.blocked.contains(*s))
            .copied()
            .choose(rng)
    }

    /// Sample one slot outside the mandatory path: an unfilled, unblocked
    /// label or a repeatable list slot.
    pub fn sample_non_core_unfilled<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<SlotKey> {
        let mut pool: BTreeSet<SlotKey> = self
            .labels()
            .filter(|s| !self.filled.contains(s) && !self.blocked.contains(s))
            .collect();
        pool.extend(self.optional.iter().copied());
        pool.into_iter().choose(rng)
    }

    /// Candidate contexts for a new sub-context frame.
    pub fn contexts(&self) -> Vec<&str> {
        self.instances
            .iter()
            .chain(&self.valence.counterfactuals)
            .chain(&self.prevalence.counterfactuals)
            .map(String::as_str)
            .collect()
    }

    /// Positional template arguments: the name split on `:` into at most
    /// three parts.
    pub fn arguments(&self) -> Vec<&str> {
        self.name.splitn(3, ':').collect()
    }

    /// Serialize the frame as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn bag(&self, slot: SlotKey) -> Option<&AttributeBag> {
        match slot.attribute()? {
            Attribute::Definition => Some(&self.definition),
            Attribute::Valence => Some(&self.valence),
            Attribute::Prevalence => Some(&self.prevalence),
        }
    }

    fn bag_mut(&mut self, attribute: Attribute) -> &mut AttributeBag {
        match attribute {
            Attribute::Definition => &mut self.definition,
            Attribute::Valence => &mut self.valence,
            Attribute::Prevalence => &mut self.prevalence,
        }
    }

    fn list_mut(&mut self, slot: SlotKey) -> &mut Vec<String> {
        match slot.attribute() {
            Some(attribute) => &mut self.bag_mut(attribute).counterfactuals,
            None => &mut self.instances,
        }
    }

    fn scalar_mut(&mut self, slot: SlotKey) -> &mut String {
        let is_explanation = matches!(
            slot,
            SlotKey::DefinitionExplanation
                | SlotKey::ValenceExplanation
                | SlotKey::PrevalenceExplanation
        );
        // Scalar slots always belong to a bag.
        let bag = self.bag_mut(slot.attribute().unwrap_or(Attribute::Definition));
        if is_explanation {
            &mut bag.explanation
        } else {
            &mut bag.surface_form
        }
    }

    fn score_mut(&mut self, slot: SlotKey) -> &mut f64 {
        if slot == SlotKey::PrevalenceScore {
            &mut self.prevalence.score
        } else {
            &mut self.valence.score
        }
    }
}

fn parse_score(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
