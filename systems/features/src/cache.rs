use std::{
    collections::HashMap,
    sync::{OnceLock, PoisonError, RwLock},
};

use gridworld_core::Coord;

/// Memoized Euclidean distances keyed by an unordered pair of cells.
///
/// Entries are inserted on first use and never evicted. The same pair always
/// maps to the same value, so concurrent writers racing on a missing entry
/// only repeat work. Use [`DistanceCache::shared`] for the process-wide
/// instance, or construct a private cache to isolate tests.
#[derive(Debug, Default)]
pub struct DistanceCache {
    entries: RwLock<HashMap<(Coord, Coord), f64>>,
}

impl DistanceCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide cache shared by every caller that does not bring its own.
    #[must_use]
    pub fn shared() -> &'static DistanceCache {
        static SHARED: OnceLock<DistanceCache> = OnceLock::new();
        SHARED.get_or_init(DistanceCache::new)
    }

    /// Euclidean distance between two cells, computed at most once per pair.
    #[must_use]
    pub fn distance(&self, a: Coord, b: Coord) -> f64 {
        let key = canonical_pair(a, b);
        let cached = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .copied();
        if let Some(distance) = cached {
            return distance;
        }

        let distance = key.0.euclidean_distance(key.1);
        let _ = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, distance);
        distance
    }

    /// Number of memoized pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Reports whether no pair has been memoized yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn canonical_pair(a: Coord, b: Coord) -> (Coord, Coord) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
