#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state for the curriculum grid world.
//!
//! A scenario is validated once by [`create`] (or [`Scenario::build`]) into an
//! immutable [`WorldState`]. From then on the only way to obtain new states is
//! [`step`], which maps a state and an [`gridworld_core::Action`] to a fresh
//! successor without touching its input. [`is_terminal`] decides when an
//! episode is over.

mod dynamics;
mod scenario;
mod state;

pub use dynamics::step;
pub use scenario::{Scenario, PRESET_NAMES};
pub use state::{create, Pit, WorldState};

/// Reports whether the state ends the episode.
///
/// A state is terminal when the player stands inside the pit, or when the
/// player holds the key and the lock has been opened.
#[must_use]
pub fn is_terminal(state: &WorldState) -> bool {
    state.is_in_pit() || (state.has_key() && state.lock().is_none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridworld_core::{Action, Coord, Entity, GridShape, ValidationError};

    fn target_task_with(
        player: Coord,
        key: Option<Coord>,
        lock: Option<Coord>,
    ) -> Result<WorldState, ValidationError> {
        create(
            GridShape::new(10, 10),
            player,
            key,
            lock,
            Some(Coord::new(4, 2)),
            Some(Coord::new(4, 7)),
        )
    }

    #[test]
    fn create_target_task_places_beacons() {
        let state = Scenario::target_task().build().expect("valid");

        assert_eq!(state.grid_shape(), GridShape::new(10, 10));
        assert_eq!(state.player(), Coord::new(1, 4));
        assert_eq!(state.key(), Some(Coord::new(7, 5)));
        assert_eq!(state.lock(), Some(Coord::new(1, 1)));
        assert_eq!(state.pit_start(), Some(Coord::new(4, 2)));
        assert_eq!(state.pit_end(), Some(Coord::new(4, 7)));
        assert_eq!(state.nw_beacon(), Some(Coord::new(3, 1)));
        assert_eq!(state.ne_beacon(), Some(Coord::new(3, 8)));
        assert_eq!(state.sw_beacon(), Some(Coord::new(5, 1)));
        assert_eq!(state.se_beacon(), Some(Coord::new(5, 8)));
        assert!(!state.has_key());
    }

    #[test]
    fn create_without_pit_has_no_beacons() {
        let state = create(
            GridShape::new(10, 10),
            Coord::new(1, 4),
            Some(Coord::new(7, 5)),
            Some(Coord::new(1, 1)),
            None,
            None,
        )
        .expect("valid");

        assert_eq!(state.pit(), None);
        assert_eq!(state.beacons().count(), 0);
    }

    #[test]
    fn create_rejects_out_of_bounds_placements() {
        assert_eq!(
            target_task_with(Coord::new(9, 10), Some(Coord::new(7, 5)), None),
            Err(ValidationError::OutOfBounds {
                entity: Entity::Player,
                coord: Coord::new(9, 10),
                shape: GridShape::new(10, 10),
            })
        );
        assert!(matches!(
            target_task_with(Coord::new(1, 4), Some(Coord::new(10, 9)), None),
            Err(ValidationError::OutOfBounds {
                entity: Entity::Key,
                ..
            })
        ));
        assert!(matches!(
            target_task_with(Coord::new(1, 4), None, Some(Coord::new(10, 9))),
            Err(ValidationError::OutOfBounds {
                entity: Entity::Lock,
                ..
            })
        ));
        assert!(matches!(
            create(
                GridShape::new(10, 10),
                Coord::new(1, 4),
                Some(Coord::new(7, 5)),
                None,
                Some(Coord::new(4, 2)),
                Some(Coord::new(4, 10)),
            ),
            Err(ValidationError::OutOfBounds {
                entity: Entity::PitEnd,
                ..
            })
        ));
    }

    #[test]
    fn create_rejects_overlapping_placements() {
        assert_eq!(
            target_task_with(Coord::new(0, 0), Some(Coord::new(0, 0)), None),
            Err(ValidationError::Overlap {
                first: Entity::Player,
                second: Entity::Key,
                coord: Coord::new(0, 0),
            })
        );
        assert!(matches!(
            target_task_with(Coord::new(1, 1), None, Some(Coord::new(1, 1))),
            Err(ValidationError::Overlap {
                first: Entity::Player,
                second: Entity::Lock,
                ..
            })
        ));
        assert!(matches!(
            target_task_with(Coord::new(1, 4), Some(Coord::new(7, 5)), Some(Coord::new(7, 5))),
            Err(ValidationError::Overlap {
                first: Entity::Key,
                second: Entity::Lock,
                ..
            })
        ));
    }

    #[test]
    fn create_rejects_placements_inside_pit() {
        assert!(matches!(
            target_task_with(Coord::new(4, 2), Some(Coord::new(7, 5)), None),
            Err(ValidationError::InsidePit {
                entity: Entity::Player,
                ..
            })
        ));
        assert!(matches!(
            create(
                GridShape::new(10, 10),
                Coord::new(1, 4),
                Some(Coord::new(7, 5)),
                Some(Coord::new(5, 3)),
                Some(Coord::new(4, 2)),
                Some(Coord::new(5, 7)),
            ),
            Err(ValidationError::InsidePit {
                entity: Entity::Lock,
                ..
            })
        ));
        assert!(matches!(
            create(
                GridShape::new(10, 10),
                Coord::new(1, 4),
                Some(Coord::new(5, 7)),
                Some(Coord::new(1, 1)),
                Some(Coord::new(4, 2)),
                Some(Coord::new(5, 7)),
            ),
            Err(ValidationError::InsidePit {
                entity: Entity::Key,
                ..
            })
        ));
    }

    #[test]
    fn create_rejects_placements_on_beacons() {
        assert_eq!(
            target_task_with(Coord::new(1, 4), Some(Coord::new(5, 8)), None),
            Err(ValidationError::OnBeacon {
                entity: Entity::Key,
                coord: Coord::new(5, 8),
            })
        );
    }

    #[test]
    fn create_requires_an_objective() {
        assert_eq!(
            target_task_with(Coord::new(1, 4), None, None),
            Err(ValidationError::MissingObjective)
        );
    }

    #[test]
    fn create_requires_paired_pit_corners() {
        assert_eq!(
            create(
                GridShape::new(10, 10),
                Coord::new(1, 4),
                Some(Coord::new(7, 5)),
                None,
                Some(Coord::new(4, 2)),
                None,
            ),
            Err(ValidationError::UnpairedPit {
                pit_start: Some(Coord::new(4, 2)),
                pit_end: None,
            })
        );
    }

    #[test]
    fn create_rejects_inverted_pit_and_empty_grid() {
        assert!(matches!(
            create(
                GridShape::new(10, 10),
                Coord::new(1, 4),
                Some(Coord::new(7, 5)),
                None,
                Some(Coord::new(4, 7)),
                Some(Coord::new(4, 2)),
            ),
            Err(ValidationError::InvertedPit { .. })
        ));
        assert!(matches!(
            create(
                GridShape::new(0, 10),
                Coord::new(0, 0),
                Some(Coord::new(0, 1)),
                None,
                None,
                None,
            ),
            Err(ValidationError::EmptyGrid { .. })
        ));
    }

    #[test]
    fn keyless_scenario_starts_holding_key() {
        let state =
            target_task_with(Coord::new(1, 4), None, Some(Coord::new(9, 1))).expect("valid");
        assert!(state.has_key());
        assert!(!is_terminal(&state));
    }

    #[test]
    fn pit_on_south_west_edge_keeps_only_north_east_beacon() {
        let state = create(
            GridShape::new(20, 20),
            Coord::new(1, 4),
            Some(Coord::new(7, 5)),
            Some(Coord::new(1, 1)),
            Some(Coord::new(17, 0)),
            Some(Coord::new(19, 3)),
        )
        .expect("valid");

        assert_eq!(state.nw_beacon(), None);
        assert_eq!(state.ne_beacon(), Some(Coord::new(16, 4)));
        assert_eq!(state.sw_beacon(), None);
        assert_eq!(state.se_beacon(), None);
    }

    #[test]
    fn pit_on_south_edge_keeps_northern_beacons() {
        let state = create(
            GridShape::new(20, 20),
            Coord::new(1, 4),
            Some(Coord::new(7, 5)),
            Some(Coord::new(1, 1)),
            Some(Coord::new(17, 3)),
            Some(Coord::new(19, 6)),
        )
        .expect("valid");

        assert_eq!(state.nw_beacon(), Some(Coord::new(16, 2)));
        assert_eq!(state.ne_beacon(), Some(Coord::new(16, 7)));
        assert_eq!(state.sw_beacon(), None);
        assert_eq!(state.se_beacon(), None);
    }

    #[test]
    fn terminal_when_player_in_pit_or_lock_opened() {
        let state = target_task_with(
            Coord::new(5, 4),
            Some(Coord::new(7, 5)),
            Some(Coord::new(1, 1)),
        )
        .expect("valid");
        assert!(!is_terminal(&state));

        let fallen = step(&state, Action::North).expect("non-terminal");
        assert!(is_terminal(&fallen));

        let lock_only =
            target_task_with(Coord::new(1, 2), None, Some(Coord::new(1, 1))).expect("valid");
        let unlocked = step(&lock_only, Action::UnlockLock).expect("non-terminal");
        assert_eq!(unlocked.lock(), None);
        assert!(is_terminal(&unlocked));
    }

    #[test]
    fn step_from_terminal_state_fails() {
        let state =
            target_task_with(Coord::new(5, 4), Some(Coord::new(7, 5)), None).expect("valid");
        let fallen = step(&state, Action::North).expect("non-terminal");

        for action in Action::ALL {
            let error = step(&fallen, action).expect_err("terminal state rejects actions");
            assert_eq!(error.player(), Coord::new(4, 4));
        }
    }

    #[test]
    fn state_serializes_through_bincode() {
        let state = Scenario::target_task().build().expect("valid");
        let bytes = bincode::serialize(&state).expect("serialize");
        assert!(!bytes.is_empty());
        assert_eq!(bytes, bincode::serialize(&state.clone()).expect("serialize"));
    }
}
