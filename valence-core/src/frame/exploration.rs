//! Exploration from a satisfied frame.
//!
//! Once a frame's core script is exhausted the engine looks, in order, for
//! an optional slot of the same frame, a sub-context built from what the
//! respondent already said, and finally the same concept seen through
//! another belief holder. The last tier always succeeds.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::{Frame, SlotKey};

/// Outcome of [`Frame::explore_from_frame`].
#[derive(Debug, Clone, PartialEq)]
pub enum Exploration {
    /// A non-core slot of the current frame to ask about
    SampledNonCore(SlotKey),
    /// A sub-context frame built from an instance or counterfactual
    NewContext(Frame),
    /// The same concept for a yet unnamed belief holder
    NewBeliefHolder(Frame),
}

impl Exploration {
    /// Tier name used in logs.
    pub fn tier(&self) -> &'static str {
        match self {
            Self::SampledNonCore(_) => "sampled_non_core",
            Self::NewContext(_) => "new_context",
            Self::NewBeliefHolder(_) => "new_belief_holder",
        }
    }
}

impl Frame {
    /// Decide what to explore next from this frame.
    pub fn explore_from_frame<R: Rng + ?Sized>(&self, rng: &mut R) -> Exploration {
        if let Some(slot) = self.sample_non_core_unfilled(rng) {
            debug!(frame = %self.name, %slot, "Exploring non-core slot");
            return Exploration::SampledNonCore(slot);
        }

        if let Some(context) = self.pick_new_context(rng) {
            debug!(frame = %self.name, %context, "Exploring new context");
            let frame = Frame::new(format!("{}:{}", self.name, context), self.individual)
                .with_belief_holder(self.belief_holder.clone())
                .into_sub_context();
            return Exploration::NewContext(frame);
        }

        debug!(frame = %self.name, "Exploring new belief holder");
        Exploration::NewBeliefHolder(Frame::new(self.name.clone(), self.individual))
    }

    /// Pick an instance or counterfactual to open as a sub-context.
    pub fn pick_new_context<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<String> {
        self.contexts().choose(rng).map(|c| c.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeSet;

    /// Individual with both core slots marked answered and nothing repeatable.
    fn satisfied_individual(name: &str) -> Frame {
        let mut frame = Frame::new(name, true);
        frame.fill(SlotKey::DefinitionSurfaceForm, "someone");
        frame.filled.insert(SlotKey::Instances);
        frame
    }

    #[test]
    fn test_non_core_tier_first() {
        let mut frame = Frame::new("cat", false);
        for slot in frame.core_script().clone() {
            frame.fill(slot, "x");
        }
        let mut rng = StdRng::seed_from_u64(1);
        match frame.explore_from_frame(&mut rng) {
            Exploration::SampledNonCore(slot) => {
                assert!(!frame.blocked().contains(&slot));
            }
            other => panic!("expected non-core slot, got {}", other.tier()),
        }
    }

    #[test]
    fn test_new_context_tier() {
        let mut frame = satisfied_individual("Ada").with_belief_holder(Some("Charles".into()));
        frame.valence.counterfactuals.push("in 1843".to_string());

        let mut rng = StdRng::seed_from_u64(3);
        let exploration = frame.explore_from_frame(&mut rng);
        assert_eq!(exploration.tier(), "new_context");
        let Exploration::NewContext(sub) = exploration else {
            unreachable!()
        };
        assert_eq!(sub.name, "Ada:in 1843");
        assert_eq!(sub.belief_holder.as_deref(), Some("Charles"));
        assert!(sub.individual);
        assert!(!sub.core_script().contains(&SlotKey::DefinitionSurfaceForm));
        assert!(sub.blocked().is_empty());
    }

    #[test]
    fn test_new_context_draws_from_all_sources() {
        let mut frame = satisfied_individual("Ada");
        frame.instances.push("poet".to_string());
        frame.valence.counterfactuals.push("angry".to_string());
        frame.prevalence.counterfactuals.push("abroad".to_string());

        let mut rng = StdRng::seed_from_u64(11);
        let picked: BTreeSet<String> = (0..100)
            .filter_map(|_| frame.pick_new_context(&mut rng))
            .collect();
        assert_eq!(
            picked,
            BTreeSet::from(["poet".to_string(), "angry".to_string(), "abroad".to_string()])
        );
    }

    #[test]
    fn test_belief_holder_is_terminal_fallback() {
        let frame = satisfied_individual("Ada").with_belief_holder(Some("Charles".into()));
        let mut rng = StdRng::seed_from_u64(5);
        let Exploration::NewBeliefHolder(holder) = frame.explore_from_frame(&mut rng) else {
            panic!("expected belief holder tier");
        };
        assert_eq!(holder.name, "Ada");
        assert!(holder.individual);
        assert_eq!(holder.belief_holder, None);
    }

    #[test]
    fn test_fresh_sub_context_always_explores() {
        let sub = Frame::new("cat", true).into_sub_context();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..50 {
            // Blocked is cleared, so non-core slots surface; the call never fails.
            let exploration = sub.explore_from_frame(&mut rng);
            assert!(matches!(
                exploration,
                Exploration::SampledNonCore(_) | Exploration::NewBeliefHolder(_)
            ));
        }
    }
}
