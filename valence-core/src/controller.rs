//! Dialogue controller: goal selection, phrasing and answer recording.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::config::DialogueConfig;
use crate::frame::{Exploration, Frame};
use crate::types::Goal;
use crate::verbalisation::{TemplateStore, Verbalisation, VerbalisationRequest, VerbalisationResolver};

/// Outcome of [`Controller::get_question`].
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    /// Goal of the last attempt
    pub goal: Option<Goal>,
    /// Phrasing of that goal, if any template matched
    pub verbalisation: Option<Verbalisation>,
}

impl Prompt {
    /// Question text, if one was produced.
    pub fn text(&self) -> Option<&str> {
        self.verbalisation.as_ref().map(|v| v.text.as_str())
    }
}

/// Drives one session over a growing list of frames.
pub struct Controller {
    frames: Vec<Frame>,
    current: Option<usize>,
    resolver: VerbalisationResolver,
    rng: StdRng,
    max_goal_attempts: usize,
    /// Frame offered by the belief-holder tier, waiting for a holder name
    pending_holder: Option<Frame>,
}

impl Controller {
    /// Create a controller over a session-owned template store.
    pub fn new(store: TemplateStore, config: &DialogueConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            frames: Vec::new(),
            current: None,
            resolver: VerbalisationResolver::new(store, config.disallow_repeats),
            rng,
            max_goal_attempts: config.max_goal_attempts,
            pending_holder: None,
        }
    }

    /// Builder: replace the random source.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Append a frame and make it current.
    pub fn add_frame(&mut self, frame: Frame) {
        info!(
            frame = %frame.name,
            belief_holder = frame.belief_holder.as_deref().unwrap_or("default"),
            individual = frame.individual,
            "Adding frame"
        );
        self.frames.push(frame);
        self.current = Some(self.frames.len() - 1);
    }

    /// All frames of the session, in creation order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// The frame questions are currently about.
    pub fn current_frame(&self) -> Option<&Frame> {
        self.current.and_then(|i| self.frames.get(i))
    }

    /// The template resolver, with whatever templates remain.
    pub fn resolver(&self) -> &VerbalisationResolver {
        &self.resolver
    }

    /// Choose the next goal from the current frame.
    pub fn get_goal(&mut self) -> Option<Goal> {
        let index = self.current?;
        let frame = &self.frames[index];

        if let Some(slot) = frame.sample_core_unfilled(&mut self.rng) {
            debug!(frame = %frame.name, %slot, "Core goal");
            return Some(Goal::Slot(slot));
        }

        let exploration = frame.explore_from_frame(&mut self.rng);
        debug!(frame = %frame.name, tier = exploration.tier(), "Core script exhausted");
        match exploration {
            Exploration::SampledNonCore(slot) => Some(Goal::Slot(slot)),
            Exploration::NewContext(sub) => {
                self.add_frame(sub);
                // A fresh context only offers its own core slots this round.
                let sub = self.frames.last()?;
                sub.sample_core_unfilled(&mut self.rng).map(Goal::Slot)
            }
            Exploration::NewBeliefHolder(holder) => {
                self.pending_holder = Some(holder);
                Some(Goal::BranchOutBeliefHolder)
            }
        }
    }

    /// Find a goal that can be phrased, trying a bounded number of goals.
    pub fn get_question(&mut self) -> Prompt {
        let mut goal = None;
        for attempt in 1..=self.max_goal_attempts {
            goal = self.get_goal();
            let Some(target) = goal else {
                debug!(attempt, "No goal this attempt");
                continue;
            };
            if let Some(verbalisation) = self.verbalise(target) {
                debug!(attempt, goal = %target, question = %verbalisation.text, "Question ready");
                return Prompt {
                    goal,
                    verbalisation: Some(verbalisation),
                };
            }
            debug!(attempt, goal = %target, "No template for goal");
        }

        warn!(attempts = self.max_goal_attempts, "No phrasable goal found");
        Prompt {
            goal,
            verbalisation: None,
        }
    }

    /// Record the respondent's answer for a goal.
    ///
    /// Slot goals fill the current frame. An answer to the belief-holder
    /// prompt names the holder of the pending frame, which becomes current.
    pub fn memorise_answer(&mut self, goal: Goal, answer: &str) {
        match goal {
            Goal::Slot(slot) => {
                let Some(frame) = self.current.and_then(|i| self.frames.get_mut(i)) else {
                    warn!(%slot, "Answer received without a current frame");
                    return;
                };
                frame.fill(slot, answer);
                match frame.to_json() {
                    Ok(json) => debug!(frame = %frame.name, snapshot = %json, "Frame updated"),
                    Err(e) => warn!(error = %e, "Failed to snapshot frame"),
                }
            }
            Goal::BranchOutBeliefHolder => match self.pending_holder.take() {
                Some(frame) => {
                    let holder = (!answer.is_empty()).then(|| answer.to_string());
                    self.add_frame(frame.with_belief_holder(holder));
                }
                None => warn!("Belief holder named without a pending frame"),
            },
        }
    }

    fn verbalise(&mut self, goal: Goal) -> Option<Verbalisation> {
        let frame = self.frames.get(self.current?)?;
        let arguments = frame.arguments();
        let request = VerbalisationRequest::new(goal.as_str(), &arguments, frame.individual);
        self.resolver.resolve(&request, &mut self.rng)
    }
}
