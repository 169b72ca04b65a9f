//! Core types shared across the dialogue engine.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::frame::SlotKey;

/// Goal string used when the engine wants the respondent to name another
/// belief holder.
pub const BRANCH_OUT_BELIEF_HOLDER: &str = "branchout:beliefholder";

/// Target of the next question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    /// Elicit a value for one slot of the current frame
    Slot(SlotKey),
    /// Ask for an alternative belief holder
    BranchOutBeliefHolder,
}

impl Goal {
    /// Goal string as it appears in template patterns and transcripts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slot(slot) => slot.as_str(),
            Self::BranchOutBeliefHolder => BRANCH_OUT_BELIEF_HOLDER,
        }
    }

    /// The slot this goal targets, if any.
    pub fn slot(&self) -> Option<SlotKey> {
        match self {
            Self::Slot(slot) => Some(*slot),
            Self::BranchOutBeliefHolder => None,
        }
    }
}

impl From<SlotKey> for Goal {
    fn from(slot: SlotKey) -> Self {
        Self::Slot(slot)
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error types for the dialogue engine.
#[derive(Debug, thiserror::Error)]
pub enum DialogueError {
    /// Terminal or file I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Slot key not part of the frame schema
    #[error("Unknown slot key: {0}")]
    InvalidSlot(String),

    /// Frame snapshot could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Transcript sink rejected an entry
    #[error("Transcript error: {0}")]
    Transcript(String),

    /// Template file could not be read
    #[error("Failed to load templates from {path}: {source}")]
    TemplateLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for dialogue operations.
pub type Result<T> = std::result::Result<T, DialogueError>;
