use gridworld_core::{Action, Direction, TerminalStateError};
use tracing::trace;

use crate::{is_terminal, WorldState};

/// Applies an action to a state and returns the resulting state.
///
/// Rules are resolved in a fixed order and the first match wins:
///
/// 1. A move across the grid boundary leaves the state unchanged.
/// 2. A move onto the key, the lock or a beacon leaves the state unchanged.
/// 3. [`Action::PickUpKey`] next to the key collects it.
/// 4. [`Action::UnlockLock`] next to the lock opens it once no key remains.
/// 5. Any other move translates the player; a failed pick-up or unlock
///    leaves the state unchanged.
///
/// Stepping into the pit is an ordinary move. The input is never modified and
/// a fresh value is returned even when nothing changed.
///
/// # Errors
///
/// Returns [`TerminalStateError`] when `state` already ended the episode.
pub fn step(state: &WorldState, action: Action) -> Result<WorldState, TerminalStateError> {
    if is_terminal(state) {
        return Err(TerminalStateError::new(state.player()));
    }

    let next = match action.direction() {
        Some(direction) => translate(state, direction),
        None => interact(state, action),
    };
    Ok(next)
}

fn translate(state: &WorldState, direction: Direction) -> WorldState {
    let player = state.player();
    let destination = match player.neighbor(direction) {
        Some(cell) if state.grid_shape().contains(cell) => cell,
        _ => {
            trace!(%player, ?direction, "move blocked by grid boundary");
            return state.clone();
        }
    };

    if state
        .immovable_objects()
        .any(|object| object == destination)
    {
        trace!(%player, %destination, "move blocked by immovable object");
        return state.clone();
    }

    trace!(from = %player, to = %destination, "player moved");
    state.with_player(destination)
}

fn interact(state: &WorldState, action: Action) -> WorldState {
    let player = state.player();
    match action {
        Action::PickUpKey => {
            if let Some(key) = state.key() {
                if player.is_orthogonally_adjacent(key) {
                    trace!(%player, %key, "key collected");
                    return state.with_key_collected();
                }
            }
        }
        Action::UnlockLock => {
            if state.key().is_none() {
                if let Some(lock) = state.lock() {
                    if player.is_orthogonally_adjacent(lock) {
                        trace!(%player, %lock, "lock opened");
                        return state.with_lock_opened();
                    }
                }
            }
        }
        Action::North | Action::East | Action::South | Action::West => {}
    }

    trace!(%player, %action, "action precondition not met");
    state.clone()
}
