use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::observation::Observation;
use crate::game::Action;

/// Action selection for an agent driving the environment
///
/// This is the seam an external learner plugs into; the core only promises
/// consistent observations, rewards and termination signals.
pub trait Policy {
    /// Pick an action index for the given observation
    fn select_action(&mut self, observation: &Observation) -> usize;
}

/// Uniform-random exploration policy
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl Policy for RandomPolicy {
    fn select_action(&mut self, _observation: &Observation) -> usize {
        self.rng.gen_range(0..Action::COUNT)
    }
}

/// Resolve the policy for a rollout
///
/// A missing checkpoint is a warning, not an error: the runner proceeds
/// with a fresh exploration policy, matching how the trainer treats a
/// first run.
pub fn resolve_policy(model_path: Option<&Path>, seed: Option<u64>) -> Box<dyn Policy> {
    if let Some(path) = model_path {
        if path.exists() {
            log::warn!(
                "checkpoint {path:?} found, but external checkpoint formats are loaded by the \
                 training harness, not this runner; using the exploration policy"
            );
        } else {
            log::warn!("checkpoint {path:?} not found; using the exploration policy");
        }
    }
    Box::new(RandomPolicy::new(seed))
}
