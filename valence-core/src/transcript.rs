//! Transcript entries and sinks.
//!
//! The session writes one entry per concept, question and answer. Where
//! entries end up is up to the [`TranscriptSink`]; the binary appends them
//! to a file, tests collect them in memory.

use std::fmt;

use crate::types::{Goal, Result};

/// One transcript line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptEntry {
    /// Session start for a concept
    Concept(String),
    /// Question asked by the bot
    Bot { goal: Option<Goal>, text: String },
    /// Answer given by the respondent
    Human { goal: Option<Goal>, text: String },
}

impl fmt::Display for TranscriptEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Concept(name) => write!(f, "CONCEPT: {}", name),
            Self::Bot { goal, text } => write!(f, "BOT >> {}: {}", goal_label(goal), text),
            Self::Human { goal, text } => write!(f, "HUM >> {}: {}", goal_label(goal), text),
        }
    }
}

fn goal_label(goal: &Option<Goal>) -> String {
    goal.map(|g| g.as_str().to_uppercase())
        .unwrap_or_else(|| "END".to_string())
}

/// Destination for transcript entries.
pub trait TranscriptSink {
    /// Record one entry.
    fn record(&mut self, entry: &TranscriptEntry) -> Result<()>;
}

/// Keeps the transcript in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryTranscript {
    entries: Vec<TranscriptEntry>,
}

impl MemoryTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded entries, oldest first.
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Transcript rendered as lines.
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}

impl TranscriptSink for MemoryTranscript {
    fn record(&mut self, entry: &TranscriptEntry) -> Result<()> {
        self.entries.push(entry.clone());
        Ok(())
    }
}

/// Discards every entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTranscript;

impl TranscriptSink for NullTranscript {
    fn record(&mut self, _entry: &TranscriptEntry) -> Result<()> {
        Ok(())
    }
}
