//! Slot keys and their write operations.
//!
//! Every elicitable piece of a frame is named by a [`SlotKey`]. The key
//! decides how an answer is written back: scalar slots overwrite, list
//! slots append and score slots take a parsed number.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::DialogueError;

/// Attribute bag a slot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Definition,
    Valence,
    Prevalence,
}

/// How an answer is written into a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotWrite {
    /// Overwrite a string field
    Scalar,
    /// Append to a list field
    Append,
    /// Parse a number into a score field
    Score,
}

/// Every slot a frame carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum SlotKey {
    DefinitionSurfaceForm,
    DefinitionExplanation,
    DefinitionCounterfactuals,
    Instances,
    ValenceSurfaceForm,
    ValenceScore,
    ValenceExplanation,
    ValenceCounterfactuals,
    PrevalenceSurfaceForm,
    PrevalenceScore,
    PrevalenceExplanation,
    PrevalenceCounterfactuals,
}

impl SlotKey {
    /// All slot keys, in schema order.
    pub const ALL: [SlotKey; 12] = [
        Self::DefinitionSurfaceForm,
        Self::DefinitionExplanation,
        Self::DefinitionCounterfactuals,
        Self::Instances,
        Self::ValenceSurfaceForm,
        Self::ValenceScore,
        Self::ValenceExplanation,
        Self::ValenceCounterfactuals,
        Self::PrevalenceSurfaceForm,
        Self::PrevalenceScore,
        Self::PrevalenceExplanation,
        Self::PrevalenceCounterfactuals,
    ];

    /// Slot key string, e.g. `valence:counterfactuals`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DefinitionSurfaceForm => "definition:surface_form",
            Self::DefinitionExplanation => "definition:explanation",
            Self::DefinitionCounterfactuals => "definition:counterfactuals",
            Self::Instances => "instances",
            Self::ValenceSurfaceForm => "valence:surface_form",
            Self::ValenceScore => "valence:score",
            Self::ValenceExplanation => "valence:explanation",
            Self::ValenceCounterfactuals => "valence:counterfactuals",
            Self::PrevalenceSurfaceForm => "prevalence:surface_form",
            Self::PrevalenceScore => "prevalence:score",
            Self::PrevalenceExplanation => "prevalence:explanation",
            Self::PrevalenceCounterfactuals => "prevalence:counterfactuals",
        }
    }

    /// Write operation used by [`Frame::fill`](super::Frame::fill).
    pub fn write(&self) -> SlotWrite {
        match self {
            Self::Instances
            | Self::DefinitionCounterfactuals
            | Self::ValenceCounterfactuals
            | Self::PrevalenceCounterfactuals => SlotWrite::Append,
            Self::ValenceScore | Self::PrevalenceScore => SlotWrite::Score,
            _ => SlotWrite::Scalar,
        }
    }

    /// Whether repeated answers accumulate.
    pub fn is_list(&self) -> bool {
        self.write() == SlotWrite::Append
    }

    /// Whether the slot holds a derived numeric score.
    pub fn is_score(&self) -> bool {
        self.write() == SlotWrite::Score
    }

    /// Attribute bag the slot lives in; `None` for `instances`.
    pub fn attribute(&self) -> Option<Attribute> {
        match self {
            Self::DefinitionSurfaceForm
            | Self::DefinitionExplanation
            | Self::DefinitionCounterfactuals => Some(Attribute::Definition),
            Self::ValenceSurfaceForm
            | Self::ValenceScore
            | Self::ValenceExplanation
            | Self::ValenceCounterfactuals => Some(Attribute::Valence),
            Self::PrevalenceSurfaceForm
            | Self::PrevalenceScore
            | Self::PrevalenceExplanation
            | Self::PrevalenceCounterfactuals => Some(Attribute::Prevalence),
            Self::Instances => None,
        }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlotKey {
    type Err = DialogueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|slot| slot.as_str() == s)
            .copied()
            .ok_or_else(|| DialogueError::InvalidSlot(s.to_string()))
    }
}

impl From<SlotKey> for String {
    fn from(slot: SlotKey) -> Self {
        slot.as_str().to_string()
    }
}

impl TryFrom<String> for SlotKey {
    type Error = DialogueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_key() {
        for slot in SlotKey::ALL {
            assert_eq!(slot.as_str().parse::<SlotKey>().unwrap(), slot);
        }
        assert!(matches!(
            "valence:mood".parse::<SlotKey>(),
            Err(DialogueError::InvalidSlot(_))
        ));
    }

    #[test]
    fn test_write_kinds() {
        assert_eq!(SlotKey::Instances.write(), SlotWrite::Append);
        assert_eq!(SlotKey::ValenceCounterfactuals.write(), SlotWrite::Append);
        assert_eq!(SlotKey::PrevalenceScore.write(), SlotWrite::Score);
        assert_eq!(SlotKey::DefinitionSurfaceForm.write(), SlotWrite::Scalar);

        // List slots are exactly the ones whose key ends in counterfactuals, plus instances
        for slot in SlotKey::ALL {
            let by_name = slot == SlotKey::Instances || slot.as_str().ends_with("counterfactuals");
            assert_eq!(slot.is_list(), by_name, "{slot}");
        }
    }

    #[test]
    fn test_attribute_grouping() {
        assert_eq!(SlotKey::Instances.attribute(), None);
        assert_eq!(SlotKey::ValenceScore.attribute(), Some(Attribute::Valence));
        assert_eq!(
            SlotKey::DefinitionCounterfactuals.attribute(),
            Some(Attribute::Definition)
        );
    }
}
