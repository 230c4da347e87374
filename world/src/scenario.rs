use gridworld_core::{Coord, GridShape, ValidationError};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{create, WorldState};

/// Starting configuration describing one task instance.
///
/// Scenarios are plain data so they can be loaded from configuration files;
/// [`Scenario::build`] runs the same validation as [`create`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Grid dimensions as `[rows, cols]`.
    pub shape: GridShape,
    /// Starting cell of the player.
    pub player: Coord,
    /// Cell holding the key, if the task requires collecting one.
    #[serde(default)]
    pub key: Option<Coord>,
    /// Cell holding the lock, if the task requires opening one.
    #[serde(default)]
    pub lock: Option<Coord>,
    /// Lower-index pit corner.
    #[serde(default)]
    pub pit_start: Option<Coord>,
    /// Higher-index pit corner.
    #[serde(default)]
    pub pit_end: Option<Coord>,
}

/// Named scenarios forming the built-in curriculum, easiest first.
pub const PRESET_NAMES: [&str; 4] = ["lock", "key-lock", "pit-lock", "target"];

impl Scenario {
    /// The full target task: key, lock and a pit splitting the grid.
    #[must_use]
    pub fn target_task() -> Self {
        Self {
            shape: GridShape::new(10, 10),
            player: Coord::new(1, 4),
            key: Some(Coord::new(7, 5)),
            lock: Some(Coord::new(1, 1)),
            pit_start: Some(Coord::new(4, 2)),
            pit_end: Some(Coord::new(4, 7)),
        }
    }

    /// Looks up one of the [`PRESET_NAMES`] curriculum stages.
    #[must_use]
    pub fn preset(name: &str) -> Option<Self> {
        let target = Self::target_task();
        let scenario = match name {
            "lock" => Self {
                key: None,
                lock: Some(Coord::new(9, 1)),
                pit_start: None,
                pit_end: None,
                ..target
            },
            "key-lock" => Self {
                pit_start: None,
                pit_end: None,
                ..target
            },
            "pit-lock" => Self { key: None, ..target },
            "target" => target,
            _ => return None,
        };
        Some(scenario)
    }

    /// Validates the scenario and produces its initial state.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] reported by [`create`].
    pub fn build(&self) -> Result<WorldState, ValidationError> {
        let state = create(
            self.shape,
            self.player,
            self.key,
            self.lock,
            self.pit_start,
            self.pit_end,
        )?;
        debug!(shape = %self.shape, player = %self.player, "scenario validated");
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_builds() {
        for name in PRESET_NAMES {
            let scenario = Scenario::preset(name).expect("preset exists");
            assert!(scenario.build().is_ok(), "preset {name} should validate");
        }
    }

    #[test]
    fn unknown_preset_is_absent() {
        assert_eq!(Scenario::preset("spiral"), None);
    }

    #[test]
    fn lock_preset_starts_holding_key() {
        let state = Scenario::preset("lock")
            .expect("preset exists")
            .build()
            .expect("valid");
        assert!(state.has_key());
        assert_eq!(state.beacons().count(), 0);
    }
}
