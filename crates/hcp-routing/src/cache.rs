//! `CachedOracle` — per-pair memoization of an inner oracle.
//!
//! Transit durations are invariant for a given campaign's road network, so
//! each `(from, to, kind)` triple is computed at most once per campaign.
//! The cache sits behind a `Mutex` to keep the oracle `&self`-callable and
//! shareable across worker threads; contention is negligible because the
//! scheduling loop queries a handful of pairs per event.

use std::sync::Mutex;

use hcp_core::{AgentKind, Location, SimDuration};

use crate::oracle::TransitOracle;
use crate::RoutingResult;

#[cfg(feature = "fx-hash")]
type CacheMap = rustc_hash::FxHashMap<(Location, Location, AgentKind), SimDuration>;
#[cfg(not(feature = "fx-hash"))]
type CacheMap = std::collections::HashMap<(Location, Location, AgentKind), SimDuration>;

/// Wraps any [`TransitOracle`] and memoizes successful lookups.
///
/// Failed lookups (`NoRoute`) are *not* cached: an unreachable pair is a
/// campaign-data defect the caller surfaces immediately, not a hot path.
pub struct CachedOracle<O: TransitOracle> {
    inner: O,
    cache: Mutex<CacheMap>,
}

impl<O: TransitOracle> CachedOracle<O> {
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            cache: Mutex::new(CacheMap::default()),
        }
    }

    /// Number of memoized pairs.
    pub fn cached_pairs(&self) -> usize {
        self.cache.lock().expect("transit cache poisoned").len()
    }

    /// Unwrap the inner oracle, discarding the cache.
    pub fn into_inner(self) -> O {
        self.inner
    }
}

impl<O: TransitOracle> TransitOracle for CachedOracle<O> {
    fn transit(
        &self,
        from: Location,
        to: Location,
        kind: AgentKind,
    ) -> RoutingResult<SimDuration> {
        let key = (from, to, kind);
        {
            let cache = self.cache.lock().expect("transit cache poisoned");
            if let Some(&d) = cache.get(&key) {
                return Ok(d);
            }
        }
        // Inner lookup outside the lock; oracles are pure so a racing
        // duplicate computation is harmless.
        let d = self.inner.transit(from, to, kind)?;
        self.cache
            .lock()
            .expect("transit cache poisoned")
            .insert(key, d);
        Ok(d)
    }
}
