#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure reward system that scores a transition between two world states.

use gridworld_world::WorldState;
use serde::{Deserialize, Serialize};

/// Default penalty for a transition that changed nothing.
pub const DEFAULT_NO_MOVEMENT: i32 = -10;
/// Default penalty for a step into an empty cell.
pub const DEFAULT_PLAYER_MOVED_INTO_EMPTY_SPACE: i32 = -10;
/// Default reward for collecting the key.
pub const DEFAULT_PLAYER_PICKED_UP_KEY: i32 = 500;
/// Default reward for opening the lock.
pub const DEFAULT_PLAYER_UNLOCKED_LOCK: i32 = 1000;
/// Default penalty for entering the pit.
pub const DEFAULT_PLAYER_MOVED_INTO_PIT: i32 = -200;

/// Reward constants assigned to each kind of transition.
///
/// Every field can be overridden independently; omitted fields keep their
/// defaults when deserialized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// Score when neither the player, the key nor the lock changed.
    pub no_movement: i32,
    /// Score when the player moved to a new cell outside the pit.
    pub player_moved_into_empty_space: i32,
    /// Score when the key was collected.
    pub player_picked_up_key: i32,
    /// Score when the lock was opened.
    pub player_unlocked_lock: i32,
    /// Score when the player's pit occupancy changed.
    pub player_moved_into_pit: i32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            no_movement: DEFAULT_NO_MOVEMENT,
            player_moved_into_empty_space: DEFAULT_PLAYER_MOVED_INTO_EMPTY_SPACE,
            player_picked_up_key: DEFAULT_PLAYER_PICKED_UP_KEY,
            player_unlocked_lock: DEFAULT_PLAYER_UNLOCKED_LOCK,
            player_moved_into_pit: DEFAULT_PLAYER_MOVED_INTO_PIT,
        }
    }
}

/// Scores transitions using a fixed [`RewardConfig`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RewardFunction {
    config: RewardConfig,
}

impl RewardFunction {
    /// Creates a reward function with the provided constants.
    #[must_use]
    pub const fn new(config: RewardConfig) -> Self {
        Self { config }
    }

    /// Constants used by the reward function.
    #[must_use]
    pub const fn config(&self) -> &RewardConfig {
        &self.config
    }

    /// Scores the transition from `prev` to `next`.
    ///
    /// Checks run in priority order and the first match wins: pit occupancy
    /// changed, player moved, key collected, lock opened. A transition that
    /// matches none of them scores [`RewardConfig::no_movement`].
    #[must_use]
    pub fn reward(&self, prev: &WorldState, next: &WorldState) -> i32 {
        if prev.is_in_pit() != next.is_in_pit() {
            return self.config.player_moved_into_pit;
        }

        if prev.player() != next.player() {
            return self.config.player_moved_into_empty_space;
        }

        if prev.has_key() != next.has_key() {
            return self.config.player_picked_up_key;
        }

        if prev.lock() != next.lock() {
            return self.config.player_unlocked_lock;
        }

        self.config.no_movement
    }
}

/// Scores a transition with the default reward constants.
#[must_use]
pub fn reward(prev: &WorldState, next: &WorldState) -> i32 {
    RewardFunction::default().reward(prev, next)
}
