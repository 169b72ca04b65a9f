//! Configuration for a dialogue session.

use serde::{Deserialize, Serialize};

/// Tunables for the controller and session loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueConfig {
    /// Goals tried per turn before giving up on phrasing a question
    #[serde(default = "default_max_goal_attempts")]
    pub max_goal_attempts: usize,

    /// Retire templates once used
    #[serde(default = "default_true")]
    pub disallow_repeats: bool,

    /// Reply that ends the session
    #[serde(default = "default_end_sentinel")]
    pub end_sentinel: String,

    /// Said when no further question can be produced
    #[serde(default = "default_closing_message")]
    pub closing_message: String,

    /// Seed for goal, template and context sampling
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            max_goal_attempts: default_max_goal_attempts(),
            disallow_repeats: true,
            end_sentinel: default_end_sentinel(),
            closing_message: default_closing_message(),
            seed: None,
        }
    }
}

impl DialogueConfig {
    /// Builder: fix the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

fn default_max_goal_attempts() -> usize { 10 }
fn default_true() -> bool { true }
fn default_end_sentinel() -> String { "q".to_string() }
fn default_closing_message() -> String {
    "Thank you, I have no more questions for now. Goodbye!".to_string()
}
