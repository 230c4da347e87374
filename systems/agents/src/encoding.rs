use std::{fmt::Debug, hash::Hash};

use gridworld_system_features::{DistanceFeatures, DistanceObservation, FEATURE_COUNT};
use gridworld_world::WorldState;

/// Derives the table key an agent learns against.
pub trait StateEncoder {
    /// Hashable representation of a state.
    type Key: Clone + Debug + Eq + Hash;

    /// Encodes `state` into its table key.
    fn encode(&self, state: &WorldState) -> Self::Key;
}

/// Keys the table on the complete world state.
#[derive(Clone, Copy, Debug, Default)]
pub struct TabularEncoder;

impl StateEncoder for TabularEncoder {
    type Key = WorldState;

    fn encode(&self, state: &WorldState) -> Self::Key {
        state.clone()
    }
}

/// Keys the table on the distance observation of a state.
///
/// Layouts that look the same from the player's position share entries, so
/// estimates learned on one grid carry over to another.
#[derive(Clone, Copy, Debug)]
pub struct DistanceEncoder<'cache> {
    features: DistanceFeatures<'cache>,
}

impl<'cache> DistanceEncoder<'cache> {
    /// Creates an encoder around the provided feature transform.
    #[must_use]
    pub const fn new(features: DistanceFeatures<'cache>) -> Self {
        Self { features }
    }
}

impl DistanceEncoder<'static> {
    /// Creates an encoder backed by the process-wide distance cache.
    #[must_use]
    pub fn shared() -> Self {
        Self::new(DistanceFeatures::shared())
    }
}

impl StateEncoder for DistanceEncoder<'_> {
    type Key = DistanceKey;

    fn encode(&self, state: &WorldState) -> Self::Key {
        DistanceKey::from(self.features.transform(state))
    }
}

/// Distance observation compared by exact bit pattern.
///
/// Features are produced by one deterministic transform, so equal inputs
/// yield identical bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DistanceKey([u64; FEATURE_COUNT]);

impl DistanceKey {
    /// Observation the key was built from.
    #[must_use]
    pub fn features(&self) -> DistanceObservation {
        self.0.map(f64::from_bits)
    }
}

impl From<DistanceObservation> for DistanceKey {
    fn from(features: DistanceObservation) -> Self {
        Self(features.map(f64::to_bits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridworld_core::{Coord, GridShape};
    use gridworld_system_features::DistanceCache;
    use gridworld_world::create;

    fn corridor(cols: u32) -> WorldState {
        create(
            GridShape::new(1, cols),
            Coord::new(0, 0),
            None,
            Some(Coord::new(0, 2)),
            None,
            None,
        )
        .expect("valid")
    }

    #[test]
    fn distance_key_preserves_features() {
        let cache = DistanceCache::new();
        let features = DistanceFeatures::new(&cache);
        let state = corridor(3);

        let key = DistanceEncoder::new(features).encode(&state);
        assert_eq!(key.features(), features.transform(&state));
    }

    #[test]
    fn matching_layouts_share_distance_keys_but_not_tabular_keys() {
        let cache = DistanceCache::new();
        let encoder = DistanceEncoder::new(DistanceFeatures::new(&cache));
        let short = corridor(3);
        let long = corridor(4);

        assert_eq!(encoder.encode(&short), encoder.encode(&long));
        assert_ne!(TabularEncoder.encode(&short), TabularEncoder.encode(&long));
    }
}
