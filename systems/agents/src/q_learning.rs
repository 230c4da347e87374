use std::collections::HashMap;

use gridworld_core::Action;
use gridworld_system_episode::{Policy, Transition};
use gridworld_world::WorldState;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::{random::sample_action, Exploration, StateEncoder};

/// Action values for every [`Action`], indexed by [`Action::index`].
pub type ActionValues = [f64; Action::COUNT];

/// Learning parameters of a [`QLearningAgent`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QLearningConfig {
    /// Weight of future value in the update target.
    pub discount: f64,
    /// Step size applied to each temporal-difference error.
    pub learning_rate: f64,
    /// How often a random action replaces the greedy one.
    pub exploration: Exploration,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            discount: 0.95,
            learning_rate: 0.01,
            exploration: Exploration::default(),
        }
    }
}

/// Off-policy temporal-difference learner over a lookup table.
///
/// Unseen keys start with every action valued at zero. Ties resolve to the
/// lowest action index.
#[derive(Clone, Debug)]
pub struct QLearningAgent<E: StateEncoder> {
    encoder: E,
    config: QLearningConfig,
    table: HashMap<E::Key, ActionValues>,
    rng: ChaCha8Rng,
    episodes: u64,
}

impl<E: StateEncoder> QLearningAgent<E> {
    /// Creates an agent with an empty table and exploration seeded by `seed`.
    #[must_use]
    pub fn new(encoder: E, config: QLearningConfig, seed: u64) -> Self {
        Self {
            encoder,
            config,
            table: HashMap::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            episodes: 0,
        }
    }

    /// Learning parameters in use.
    #[must_use]
    pub const fn config(&self) -> &QLearningConfig {
        &self.config
    }

    /// Number of completed episodes observed so far.
    #[must_use]
    pub const fn episodes(&self) -> u64 {
        self.episodes
    }

    /// Number of distinct keys with stored values.
    #[must_use]
    pub fn table_len(&self) -> usize {
        self.table.len()
    }

    /// Exploration probability for the current episode.
    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.config.exploration.epsilon(self.episodes)
    }

    /// Current value estimates for `state`.
    #[must_use]
    pub fn action_values(&self, state: &WorldState) -> ActionValues {
        self.values_of(&self.encoder.encode(state))
    }

    /// Action with the highest estimated value in `state`.
    #[must_use]
    pub fn best_action(&self, state: &WorldState) -> Action {
        greedy(&self.action_values(state))
    }

    fn values_of(&self, key: &E::Key) -> ActionValues {
        self.table
            .get(key)
            .copied()
            .unwrap_or([0.0; Action::COUNT])
    }
}

impl<E: StateEncoder> Policy for QLearningAgent<E> {
    fn act(&mut self, state: &WorldState) -> Action {
        if self.rng.gen::<f64>() < self.epsilon() {
            sample_action(&mut self.rng)
        } else {
            self.best_action(state)
        }
    }

    fn observe(&mut self, transition: &Transition) {
        let previous = self.encoder.encode(&transition.previous);
        let future = if transition.terminated {
            0.0
        } else {
            let next = self.encoder.encode(&transition.state);
            self.values_of(&next).into_iter().fold(f64::NEG_INFINITY, f64::max)
        };

        let target = f64::from(transition.reward) + self.config.discount * future;
        let values = self
            .table
            .entry(previous)
            .or_insert([0.0; Action::COUNT]);
        let estimate = &mut values[transition.action.index()];
        *estimate += self.config.learning_rate * (target - *estimate);

        if transition.terminated || transition.truncated {
            self.episodes += 1;
            debug!(
                episodes = self.episodes,
                states = self.table.len(),
                epsilon = self.epsilon(),
                "q-learning episode observed"
            );
        }
    }
}

fn greedy(values: &ActionValues) -> Action {
    let mut best = 0;
    for (index, value) in values.iter().enumerate() {
        if *value > values[best] {
            best = index;
        }
    }
    Action::from_index(best).unwrap_or(Action::North)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greedy_prefers_first_of_equal_values() {
        assert_eq!(greedy(&[0.0; Action::COUNT]), Action::North);
        assert_eq!(greedy(&[-1.0, 2.0, 2.0, 0.0, 0.0, 0.0]), Action::East);
        assert_eq!(greedy(&[-1.0, -2.0, -3.0, -4.0, -5.0, 3.0]), Action::UnlockLock);
    }
}
