//! `DurationMatrix` — an explicit per-pair transit-duration table.
//!
//! This is the seam the external road-network collaborator fills in: it
//! computes durations for every relevant location pair once and hands the
//! planner a plain table.  Pairs absent from the table are unreachable and
//! yield [`RoutingError::NoRoute`].

use std::collections::HashMap;

use hcp_core::{AgentKind, Location, SimDuration};

use crate::oracle::TransitOracle;
use crate::{RoutingError, RoutingResult};

/// A transit-duration lookup table keyed by `(from, to, kind)`.
#[derive(Debug, Clone, Default)]
pub struct DurationMatrix {
    entries: HashMap<(Location, Location, AgentKind), SimDuration>,
}

impl DurationMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the duration for one directed pair and one agent kind.
    /// Builder-style so tables read as a block of inserts.
    pub fn with(mut self, from: Location, to: Location, kind: AgentKind, d: SimDuration) -> Self {
        self.insert(from, to, kind, d);
        self
    }

    /// Record the duration for one directed pair and one agent kind.
    pub fn insert(&mut self, from: Location, to: Location, kind: AgentKind, d: SimDuration) {
        self.entries.insert((from, to, kind), d);
    }

    /// Record the same duration in both directions for both agent kinds.
    /// Most campaign road networks are symmetric and kind-agnostic.
    pub fn insert_symmetric(&mut self, a: Location, b: Location, d: SimDuration) {
        for kind in [AgentKind::Harvester, AgentKind::Transport] {
            self.insert(a, b, kind, d);
            self.insert(b, a, kind, d);
        }
    }

    /// Number of directed entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TransitOracle for DurationMatrix {
    fn transit(
        &self,
        from: Location,
        to: Location,
        kind: AgentKind,
    ) -> RoutingResult<SimDuration> {
        if from == to {
            return Ok(SimDuration::ZERO);
        }
        self.entries
            .get(&(from, to, kind))
            .copied()
            .ok_or(RoutingError::NoRoute { from, to, kind })
    }
}
