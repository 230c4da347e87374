use gridworld_core::{Coord, Entity, GridShape, ValidationError};
use serde::Serialize;

/// Immutable snapshot of a single simulation instant.
///
/// States are only produced by [`create`] and by [`crate::step`], which always
/// returns a fresh value. Snapshots held by a caller therefore stay valid for
/// as long as the caller keeps them, which makes them suitable as keys for
/// tabular value functions and replay buffers.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct WorldState {
    grid_shape: GridShape,
    player: Coord,
    key: Option<Coord>,
    lock: Option<Coord>,
    pit: Option<Pit>,
    nw_beacon: Option<Coord>,
    ne_beacon: Option<Coord>,
    sw_beacon: Option<Coord>,
    se_beacon: Option<Coord>,
    has_key: bool,
}

/// Inclusive rectangle of hazard cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Pit {
    start: Coord,
    end: Coord,
}

impl Pit {
    /// Lower-index corner of the rectangle.
    #[must_use]
    pub const fn start(&self) -> Coord {
        self.start
    }

    /// Higher-index corner of the rectangle.
    #[must_use]
    pub const fn end(&self) -> Coord {
        self.end
    }

    /// Reports whether the coordinate lies within the inclusive rectangle.
    #[must_use]
    pub const fn contains(&self, coord: Coord) -> bool {
        self.start.row() <= coord.row()
            && coord.row() <= self.end.row()
            && self.start.col() <= coord.col()
            && coord.col() <= self.end.col()
    }
}

impl WorldState {
    /// Dimensions of the grid the state lives on.
    #[must_use]
    pub const fn grid_shape(&self) -> GridShape {
        self.grid_shape
    }

    /// Cell currently occupied by the player.
    #[must_use]
    pub const fn player(&self) -> Coord {
        self.player
    }

    /// Cell holding the key, or `None` once collected or if never placed.
    #[must_use]
    pub const fn key(&self) -> Option<Coord> {
        self.key
    }

    /// Cell holding the lock, or `None` once opened or if never placed.
    #[must_use]
    pub const fn lock(&self) -> Option<Coord> {
        self.lock
    }

    /// Hazard rectangle, if the scenario placed one.
    #[must_use]
    pub const fn pit(&self) -> Option<Pit> {
        self.pit
    }

    /// Lower-index pit corner.
    #[must_use]
    pub fn pit_start(&self) -> Option<Coord> {
        self.pit.map(|pit| pit.start)
    }

    /// Higher-index pit corner.
    #[must_use]
    pub fn pit_end(&self) -> Option<Coord> {
        self.pit.map(|pit| pit.end)
    }

    /// Beacon one cell diagonally outside the pit's north-west corner.
    #[must_use]
    pub const fn nw_beacon(&self) -> Option<Coord> {
        self.nw_beacon
    }

    /// Beacon one cell diagonally outside the pit's north-east corner.
    #[must_use]
    pub const fn ne_beacon(&self) -> Option<Coord> {
        self.ne_beacon
    }

    /// Beacon one cell diagonally outside the pit's south-west corner.
    #[must_use]
    pub const fn sw_beacon(&self) -> Option<Coord> {
        self.sw_beacon
    }

    /// Beacon one cell diagonally outside the pit's south-east corner.
    #[must_use]
    pub const fn se_beacon(&self) -> Option<Coord> {
        self.se_beacon
    }

    /// Whether the player holds the key. A keyless scenario starts with `true`.
    #[must_use]
    pub const fn has_key(&self) -> bool {
        self.has_key
    }

    /// Reports whether the player stands inside the pit rectangle.
    #[must_use]
    pub fn is_in_pit(&self) -> bool {
        self.pit.is_some_and(|pit| pit.contains(self.player))
    }

    /// Beacons that fall inside the grid, in NW, NE, SW, SE order.
    pub fn beacons(&self) -> impl Iterator<Item = Coord> {
        [self.nw_beacon, self.ne_beacon, self.sw_beacon, self.se_beacon]
            .into_iter()
            .flatten()
    }

    /// Cells the player cannot step onto, taken from the current fields.
    ///
    /// Membership changes as the key and lock are removed, so callers must
    /// query this on the state they are stepping from.
    pub fn immovable_objects(&self) -> impl Iterator<Item = Coord> {
        [self.key, self.lock]
            .into_iter()
            .flatten()
            .chain(self.beacons())
    }

    pub(crate) fn with_player(&self, player: Coord) -> Self {
        Self {
            player,
            ..self.clone()
        }
    }

    pub(crate) fn with_key_collected(&self) -> Self {
        Self {
            key: None,
            has_key: true,
            ..self.clone()
        }
    }

    pub(crate) fn with_lock_opened(&self) -> Self {
        Self {
            lock: None,
            ..self.clone()
        }
    }
}

/// Validates a scenario and produces its initial state.
///
/// Beacons are derived from the pit rectangle and dropped when they would fall
/// outside `shape`. `has_key` starts as `true` when no key is placed, so a
/// lock-only scenario can be unlocked straight away.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered, checking grid shape,
/// pit pairing, bounds, pit orientation, objective presence, overlaps, pit
/// containment and beacon collisions in that order.
pub fn create(
    shape: GridShape,
    player: Coord,
    key: Option<Coord>,
    lock: Option<Coord>,
    pit_start: Option<Coord>,
    pit_end: Option<Coord>,
) -> Result<WorldState, ValidationError> {
    if shape.is_empty() {
        return Err(ValidationError::EmptyGrid { shape });
    }

    let pit_corners = match (pit_start, pit_end) {
        (Some(start), Some(end)) => Some((start, end)),
        (None, None) => None,
        _ => return Err(ValidationError::UnpairedPit { pit_start, pit_end }),
    };

    let placements = [
        (Entity::Player, Some(player)),
        (Entity::Key, key),
        (Entity::Lock, lock),
        (Entity::PitStart, pit_start),
        (Entity::PitEnd, pit_end),
    ];
    for (entity, coord) in placements {
        if let Some(coord) = coord {
            if !shape.contains(coord) {
                return Err(ValidationError::OutOfBounds {
                    entity,
                    coord,
                    shape,
                });
            }
        }
    }

    let pit = match pit_corners {
        Some((start, end)) if start.row() > end.row() || start.col() > end.col() => {
            return Err(ValidationError::InvertedPit {
                pit_start: start,
                pit_end: end,
            });
        }
        Some((start, end)) => Some(Pit { start, end }),
        None => None,
    };

    if key.is_none() && lock.is_none() {
        return Err(ValidationError::MissingObjective);
    }

    let occupants = [
        (Entity::Player, Some(player)),
        (Entity::Key, key),
        (Entity::Lock, lock),
    ];
    for (index, (first, first_coord)) in occupants.iter().enumerate() {
        for (second, second_coord) in &occupants[index + 1..] {
            if let (Some(coord), Some(other)) = (first_coord, second_coord) {
                if coord == other {
                    return Err(ValidationError::Overlap {
                        first: *first,
                        second: *second,
                        coord: *coord,
                    });
                }
            }
        }
    }

    let [nw_beacon, ne_beacon, sw_beacon, se_beacon] = match pit {
        Some(pit) => beacon_cells(shape, pit),
        None => [None; 4],
    };

    for (entity, coord) in occupants {
        let Some(coord) = coord else {
            continue;
        };
        if let Some(pit) = pit.filter(|pit| pit.contains(coord)) {
            return Err(ValidationError::InsidePit {
                entity,
                coord,
                pit_start: pit.start,
                pit_end: pit.end,
            });
        }
        if [nw_beacon, ne_beacon, sw_beacon, se_beacon].contains(&Some(coord)) {
            return Err(ValidationError::OnBeacon { entity, coord });
        }
    }

    Ok(WorldState {
        grid_shape: shape,
        player,
        key,
        lock,
        pit,
        nw_beacon,
        ne_beacon,
        sw_beacon,
        se_beacon,
        has_key: key.is_none(),
    })
}

/// Beacon cells diagonally outside each pit corner, in NW, NE, SW, SE order.
fn beacon_cells(shape: GridShape, pit: Pit) -> [Option<Coord>; 4] {
    let north = pit.start.row().checked_sub(1);
    let south = pit.end.row().checked_add(1);
    let west = pit.start.col().checked_sub(1);
    let east = pit.end.col().checked_add(1);

    let corner = |row: Option<u32>, col: Option<u32>| {
        row.zip(col)
            .map(|(row, col)| Coord::new(row, col))
            .filter(|coord| shape.contains(*coord))
    };

    [
        corner(north, west),
        corner(north, east),
        corner(south, west),
        corner(south, east),
    ]
}
