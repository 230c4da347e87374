#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Reference agents that drive episodes through the [`Policy`] seam.
//!
//! [`RandomPolicy`] samples actions uniformly. [`QLearningAgent`] learns a
//! tabular action-value function over whatever key a [`StateEncoder`]
//! derives from each state: the whole [`gridworld_world::WorldState`] with
//! [`TabularEncoder`], or the distance observation with [`DistanceEncoder`].
//!
//! [`Policy`]: gridworld_system_episode::Policy

mod encoding;
mod exploration;
mod q_learning;
mod random;

pub use encoding::{DistanceEncoder, DistanceKey, StateEncoder, TabularEncoder};
pub use exploration::Exploration;
pub use q_learning::{ActionValues, QLearningAgent, QLearningConfig};
pub use random::RandomPolicy;
