use gridworld_core::Action;
use gridworld_system_episode::Policy;
use gridworld_world::WorldState;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Policy that ignores the state and samples actions uniformly.
#[derive(Clone, Debug)]
pub struct RandomPolicy {
    rng: ChaCha8Rng,
}

impl RandomPolicy {
    /// Creates a policy whose choices are reproducible for `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn act(&mut self, _state: &WorldState) -> Action {
        sample_action(&mut self.rng)
    }
}

pub(crate) fn sample_action(rng: &mut ChaCha8Rng) -> Action {
    Action::from_index(rng.gen_range(0..Action::COUNT)).unwrap_or(Action::North)
}
