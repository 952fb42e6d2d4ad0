//! Unit tests for oracles, the duration matrix, and the cache.

use std::sync::atomic::{AtomicUsize, Ordering};

use hcp_core::{AccessId, AgentKind, DepotId, Location, SapId, SimDuration};

use crate::{CachedOracle, DurationMatrix, RoutingError, TransitOracle, UniformOracle, ZeroOracle};

const DEPOT: Location = Location::Depot(DepotId(0));
const FAP: Location = Location::FieldAccess(AccessId(0));
const SAP: Location = Location::SiloAccess(SapId(0));

#[cfg(test)]
mod oracles {
    use super::*;

    #[test]
    fn zero_oracle_is_always_zero() {
        let d = ZeroOracle.transit(DEPOT, SAP, AgentKind::Transport).unwrap();
        assert_eq!(d, SimDuration::ZERO);
    }

    #[test]
    fn uniform_oracle_distinguishes_self_transit() {
        let oracle = UniformOracle(SimDuration::from_secs(30));
        assert_eq!(
            oracle.transit(DEPOT, FAP, AgentKind::Harvester).unwrap(),
            SimDuration::from_secs(30)
        );
        assert_eq!(
            oracle.transit(FAP, FAP, AgentKind::Harvester).unwrap(),
            SimDuration::ZERO
        );
    }
}

#[cfg(test)]
mod matrix {
    use super::*;

    #[test]
    fn lookup_and_no_route() {
        let m = DurationMatrix::new().with(
            DEPOT,
            FAP,
            AgentKind::Transport,
            SimDuration::from_secs(120),
        );
        assert_eq!(
            m.transit(DEPOT, FAP, AgentKind::Transport).unwrap(),
            SimDuration::from_secs(120)
        );
        // Reverse direction was never inserted.
        assert!(matches!(
            m.transit(FAP, DEPOT, AgentKind::Transport),
            Err(RoutingError::NoRoute { .. })
        ));
        // Wrong kind was never inserted.
        assert!(m.transit(DEPOT, FAP, AgentKind::Harvester).is_err());
    }

    #[test]
    fn symmetric_insert_covers_both_kinds_and_directions() {
        let mut m = DurationMatrix::new();
        m.insert_symmetric(FAP, SAP, SimDuration::from_secs(45));
        for kind in [AgentKind::Harvester, AgentKind::Transport] {
            assert_eq!(m.transit(FAP, SAP, kind).unwrap(), SimDuration::from_secs(45));
            assert_eq!(m.transit(SAP, FAP, kind).unwrap(), SimDuration::from_secs(45));
        }
        assert_eq!(m.len(), 4);
    }

    #[test]
    fn self_transit_is_zero_without_entry() {
        let m = DurationMatrix::new();
        assert_eq!(
            m.transit(SAP, SAP, AgentKind::Transport).unwrap(),
            SimDuration::ZERO
        );
    }
}

#[cfg(test)]
mod cache {
    use super::*;

    /// Oracle that counts how often it is consulted.
    struct CountingOracle(AtomicUsize);

    impl TransitOracle for CountingOracle {
        fn transit(
            &self,
            from: Location,
            to: Location,
            kind: AgentKind,
        ) -> crate::RoutingResult<SimDuration> {
            self.0.fetch_add(1, Ordering::Relaxed);
            UniformOracle(SimDuration::from_secs(10)).transit(from, to, kind)
        }
    }

    #[test]
    fn inner_oracle_hit_once_per_pair() {
        let cached = CachedOracle::new(CountingOracle(AtomicUsize::new(0)));

        for _ in 0..5 {
            cached.transit(DEPOT, FAP, AgentKind::Transport).unwrap();
        }
        cached.transit(DEPOT, SAP, AgentKind::Transport).unwrap();
        cached.transit(DEPOT, FAP, AgentKind::Harvester).unwrap();

        assert_eq!(cached.cached_pairs(), 3);
        assert_eq!(cached.into_inner().0.into_inner(), 3);
    }

    #[test]
    fn cached_value_matches_inner() {
        let cached = CachedOracle::new(UniformOracle(SimDuration::from_secs(7)));
        let first = cached.transit(FAP, SAP, AgentKind::Transport).unwrap();
        let second = cached.transit(FAP, SAP, AgentKind::Transport).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, SimDuration::from_secs(7));
    }
}
