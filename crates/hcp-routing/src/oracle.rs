//! The `TransitOracle` trait and trivial implementations.

use hcp_core::{AgentKind, Location, SimDuration};

use crate::RoutingResult;

/// Pluggable transit-duration source.
///
/// Implement this trait to plug in the external route-planning collaborator
/// (road-network shortest paths, recorded GPS traces, …).  The planner only
/// ever consumes durations; it never sees geometry.
///
/// # Contract
///
/// - Deterministic: the same `(from, to, kind)` triple always yields the
///   same duration within one campaign.
/// - Non-negative, and `from == to` is zero.
/// - Side-effect free: called from inside the scheduling loop, which
///   performs no I/O.  Wrap slow oracles in [`CachedOracle`][crate::CachedOracle].
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so independent campaigns can be
/// constructed on worker threads sharing one oracle.
pub trait TransitOracle: Send + Sync {
    /// Travel duration for `kind` from `from` to `to`.
    fn transit(
        &self,
        from: Location,
        to: Location,
        kind: AgentKind,
    ) -> RoutingResult<SimDuration>;
}

// ── ZeroOracle ────────────────────────────────────────────────────────────────

/// Every transit takes zero time.  The benchmark scenarios of the campaign
/// planner are specified against this oracle.
pub struct ZeroOracle;

impl TransitOracle for ZeroOracle {
    fn transit(
        &self,
        _from: Location,
        _to: Location,
        _kind: AgentKind,
    ) -> RoutingResult<SimDuration> {
        Ok(SimDuration::ZERO)
    }
}

// ── UniformOracle ─────────────────────────────────────────────────────────────

/// Every transit between two *distinct* locations takes one fixed duration;
/// `from == to` is zero.  Useful for tests that need travel time without a
/// full duration matrix.
pub struct UniformOracle(pub SimDuration);

impl TransitOracle for UniformOracle {
    fn transit(
        &self,
        from: Location,
        to: Location,
        _kind: AgentKind,
    ) -> RoutingResult<SimDuration> {
        if from == to {
            return Ok(SimDuration::ZERO);
        }
        Ok(self.0)
    }
}
