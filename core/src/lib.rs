#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the curriculum grid world.
//!
//! This crate defines the vocabulary that connects the authoritative world,
//! the pure systems layered on top of it, and the adapters that drive
//! episodes. The world validates a [`GridShape`] and a set of [`Coord`]
//! placements into an immutable state, agents pick one of the six [`Action`]
//! values per tick, and every failure the world can report is one of the two
//! error types defined here: [`ValidationError`] at construction time and
//! [`TerminalStateError`] when an episode is driven past its end.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Location of a single grid cell expressed as row and column indices.
///
/// Row zero is the northern edge of the grid and column zero the western
/// edge. Coordinates serialize as a `[row, col]` pair so scenario files stay
/// compact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(u32, u32)", into = "(u32, u32)")]
pub struct Coord {
    row: u32,
    col: u32,
}

impl Coord {
    /// Creates a new grid coordinate.
    #[must_use]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn col(&self) -> u32 {
        self.col
    }

    /// Computes the Manhattan distance between two coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: Coord) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Computes the straight-line distance between two coordinates.
    #[must_use]
    pub fn euclidean_distance(self, other: Coord) -> f64 {
        let rows = f64::from(self.row.abs_diff(other.row));
        let cols = f64::from(self.col.abs_diff(other.col));
        rows.hypot(cols)
    }

    /// Reports whether the two cells share an edge.
    #[must_use]
    pub fn is_orthogonally_adjacent(self, other: Coord) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// Returns the neighbouring cell in the provided direction.
    ///
    /// Yields `None` when the step would leave the non-negative quadrant; the
    /// upper bounds are the grid's concern and are not checked here.
    #[must_use]
    pub fn neighbor(self, direction: Direction) -> Option<Coord> {
        match direction {
            Direction::North => self.row.checked_sub(1).map(|row| Coord::new(row, self.col)),
            Direction::East => self.col.checked_add(1).map(|col| Coord::new(self.row, col)),
            Direction::South => self.row.checked_add(1).map(|row| Coord::new(row, self.col)),
            Direction::West => self.col.checked_sub(1).map(|col| Coord::new(self.row, col)),
        }
    }
}

impl From<(u32, u32)> for Coord {
    fn from((row, col): (u32, u32)) -> Self {
        Self::new(row, col)
    }
}

impl From<Coord> for (u32, u32) {
    fn from(coord: Coord) -> Self {
        (coord.row, coord.col)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Dimensions of the rectangular grid measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(u32, u32)", into = "(u32, u32)")]
pub struct GridShape {
    rows: u32,
    cols: u32,
}

impl GridShape {
    /// Creates a new grid shape.
    #[must_use]
    pub const fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn cols(&self) -> u32 {
        self.cols
    }

    /// Reports whether the grid contains no cells at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Reports whether the coordinate lies within the grid.
    #[must_use]
    pub const fn contains(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// Reports whether moving from `coord` in `direction` would leave the grid.
    #[must_use]
    pub fn blocks(&self, coord: Coord, direction: Direction) -> bool {
        coord
            .neighbor(direction)
            .map_or(true, |next| !self.contains(next))
    }
}

impl From<(u32, u32)> for GridShape {
    fn from((rows, cols): (u32, u32)) -> Self {
        Self::new(rows, cols)
    }
}

impl From<GridShape> for (u32, u32) {
    fn from(shape: GridShape) -> Self {
        (shape.rows, shape.cols)
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Cardinal movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// All four directions in the canonical N, E, S, W order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];
}

/// Discrete actions an agent may issue on each tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Move one cell toward decreasing row indices.
    North,
    /// Move one cell toward increasing column indices.
    East,
    /// Move one cell toward increasing row indices.
    South,
    /// Move one cell toward decreasing column indices.
    West,
    /// Collect the key from an orthogonally adjacent cell.
    PickUpKey,
    /// Open the lock from an orthogonally adjacent cell once no key remains.
    UnlockLock,
}

impl Action {
    /// Number of distinct actions in the action space.
    pub const COUNT: usize = 6;

    /// Every action ordered by its discrete index.
    pub const ALL: [Action; Action::COUNT] = [
        Action::North,
        Action::East,
        Action::South,
        Action::West,
        Action::PickUpKey,
        Action::UnlockLock,
    ];

    /// Discrete index of the action within [`Action::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
            Self::PickUpKey => 4,
            Self::UnlockLock => 5,
        }
    }

    /// Resolves a discrete index back into an action.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Canonical upper-case name of the action.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::North => "NORTH",
            Self::East => "EAST",
            Self::South => "SOUTH",
            Self::West => "WEST",
            Self::PickUpKey => "PICK_UP_KEY",
            Self::UnlockLock => "UNLOCK_LOCK",
        }
    }

    /// Direction of travel for the four movement actions.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Self::North => Some(Direction::North),
            Self::East => Some(Direction::East),
            Self::South => Some(Direction::South),
            Self::West => Some(Direction::West),
            Self::PickUpKey | Self::UnlockLock => None,
        }
    }
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::North => Self::North,
            Direction::East => Self::East,
            Direction::South => Self::South,
            Direction::West => Self::West,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Scenario elements whose placement is validated at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Entity {
    /// The agent-controlled player.
    Player,
    /// The collectible key.
    Key,
    /// The lock that ends the episode once opened.
    Lock,
    /// Lower-index corner of the pit rectangle.
    PitStart,
    /// Higher-index corner of the pit rectangle.
    PitEnd,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Player => "player",
            Self::Key => "key",
            Self::Lock => "lock",
            Self::PitStart => "pit start",
            Self::PitEnd => "pit end",
        };
        f.write_str(name)
    }
}

/// Reasons a scenario may be rejected when constructing the initial state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum ValidationError {
    /// The grid has zero rows or zero columns.
    #[error("grid shape {shape} contains no cells")]
    EmptyGrid {
        /// Shape supplied for the scenario.
        shape: GridShape,
    },
    /// A placement lies outside the grid.
    #[error("{entity} coords {coord} not in shape bounds {shape}")]
    OutOfBounds {
        /// Element whose placement was rejected.
        entity: Entity,
        /// Offending coordinate.
        coord: Coord,
        /// Shape supplied for the scenario.
        shape: GridShape,
    },
    /// Two of the player, key and lock share a cell.
    #[error("{first} coords {coord} equal to {second} coords")]
    Overlap {
        /// First element of the colliding pair.
        first: Entity,
        /// Second element of the colliding pair.
        second: Entity,
        /// Cell both elements were placed on.
        coord: Coord,
    },
    /// Neither a key nor a lock was supplied.
    #[error("scenario must place a key or a lock")]
    MissingObjective,
    /// Only one of the two pit corners was supplied.
    #[error("pit start {pit_start:?} and pit end {pit_end:?} must be given together")]
    UnpairedPit {
        /// Supplied pit start, if any.
        pit_start: Option<Coord>,
        /// Supplied pit end, if any.
        pit_end: Option<Coord>,
    },
    /// The pit start is not the lower-index corner of the rectangle.
    #[error("pit start {pit_start} must not exceed pit end {pit_end}")]
    InvertedPit {
        /// Supplied pit start.
        pit_start: Coord,
        /// Supplied pit end.
        pit_end: Coord,
    },
    /// A placement falls inside the pit rectangle.
    #[error("{entity} coords {coord} within pit {pit_start}-{pit_end}")]
    InsidePit {
        /// Element whose placement was rejected.
        entity: Entity,
        /// Offending coordinate.
        coord: Coord,
        /// Lower-index pit corner.
        pit_start: Coord,
        /// Higher-index pit corner.
        pit_end: Coord,
    },
    /// A placement falls on one of the beacons surrounding the pit.
    #[error("{entity} coords {coord} on a pit beacon")]
    OnBeacon {
        /// Element whose placement was rejected.
        entity: Entity,
        /// Offending coordinate.
        coord: Coord,
    },
}

/// Raised when an action is issued from a state that already ended the episode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
#[error("state is terminal (player at {player}); no further actions allowed")]
pub struct TerminalStateError {
    player: Coord,
}

impl TerminalStateError {
    /// Creates a new error for a terminal state with the player at `player`.
    #[must_use]
    pub const fn new(player: Coord) -> Self {
        Self { player }
    }

    /// Player location in the terminal state that rejected the action.
    #[must_use]
    pub const fn player(&self) -> Coord {
        self.player
    }
}
