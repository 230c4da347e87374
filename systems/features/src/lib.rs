#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Distance-based observation encoding for the curriculum grid world.
//!
//! Absolute coordinates tie a learned value function to one scenario. This
//! system instead describes a state by how far the player would be from each
//! object after a one-step lookahead in every direction, which lets value
//! estimates carry over between scenarios that share a layout pattern.

mod cache;

pub use cache::DistanceCache;

use gridworld_core::{Coord, Direction, GridShape};
use gridworld_world::{is_terminal, step, WorldState};

/// Number of values in a distance observation.
pub const FEATURE_COUNT: usize = 17;

/// Fixed-length observation produced by [`DistanceFeatures`].
///
/// Layout: distance to key (N, E, S, W), distance to lock (N, E, S, W),
/// distance to the nearest beacon (N, E, S, W), pit occupancy (N, E, S, W),
/// then whether the player currently holds the key.
pub type DistanceObservation = [f64; FEATURE_COUNT];

/// Transforms world states into [`DistanceObservation`] vectors.
#[derive(Clone, Copy, Debug)]
pub struct DistanceFeatures<'cache> {
    cache: &'cache DistanceCache,
}

impl DistanceFeatures<'static> {
    /// Creates a transform backed by the process-wide [`DistanceCache`].
    #[must_use]
    pub fn shared() -> Self {
        Self::new(DistanceCache::shared())
    }
}

impl<'cache> DistanceFeatures<'cache> {
    /// Creates a transform that memoizes distances in `cache`.
    #[must_use]
    pub const fn new(cache: &'cache DistanceCache) -> Self {
        Self { cache }
    }

    /// Encodes the state as a [`DistanceObservation`].
    ///
    /// Each direction is looked ahead with [`step`]. A terminal state cannot be
    /// stepped, so all four lookaheads reuse the state itself. Missing objects
    /// contribute a distance of zero.
    #[must_use]
    pub fn transform(&self, state: &WorldState) -> DistanceObservation {
        let lookahead = lookahead(state);

        let mut features = [0.0; FEATURE_COUNT];
        for (index, next) in lookahead.iter().enumerate() {
            features[index] = self.distance_to(next, next.key());
            features[4 + index] = self.distance_to(next, next.lock());
            features[8 + index] = self.distance_to_nearest_beacon(next);
            features[12 + index] = indicator(next.is_in_pit());
        }
        features[16] = indicator(state.has_key());
        features
    }

    fn distance_to(&self, state: &WorldState, object: Option<Coord>) -> f64 {
        object.map_or(0.0, |object| self.cache.distance(state.player(), object))
    }

    fn distance_to_nearest_beacon(&self, state: &WorldState) -> f64 {
        state
            .beacons()
            .map(|beacon| self.cache.distance(state.player(), beacon))
            .reduce(f64::min)
            .unwrap_or(0.0)
    }
}

/// Lower and upper bounds of every observation value on a grid of `shape`.
///
/// Distances are bounded by the span from `(0, 0)` to `(rows, cols)`; flags
/// lie in `0..=1`.
#[must_use]
pub fn bounds(shape: GridShape) -> (DistanceObservation, DistanceObservation) {
    let max_distance = Coord::new(0, 0).euclidean_distance(Coord::new(shape.rows(), shape.cols()));
    let mut high = [1.0; FEATURE_COUNT];
    for value in &mut high[..12] {
        *value = max_distance;
    }
    ([0.0; FEATURE_COUNT], high)
}

/// Encodes the state using the process-wide distance cache.
#[must_use]
pub fn distance_features(state: &WorldState) -> DistanceObservation {
    DistanceFeatures::shared().transform(state)
}

/// Successor of `state` in each of [`Direction::ALL`].
///
/// A terminal state has no successors and stands in for all four.
fn lookahead(state: &WorldState) -> [WorldState; 4] {
    if is_terminal(state) {
        return Direction::ALL.map(|_| state.clone());
    }
    // `step` only rejects terminal states, which were handled above.
    Direction::ALL.map(|direction| step(state, direction.into()).unwrap_or_else(|_| state.clone()))
}

fn indicator(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}
