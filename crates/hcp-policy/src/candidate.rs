//! Decision candidates — the units a policy scores.

use hcp_core::{AccessId, FieldId, HarvesterId, SapId, SimDuration, TvId};

// ── Decision ──────────────────────────────────────────────────────────────────

/// One possible resolution of a decision point.
///
/// The engine enumerates the feasible decisions at each decision event and
/// hands them to the policy; the policy only ranks, it never invents or
/// vetoes candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Send an idle harvester to a field, entering through `access`.
    AssignField {
        harvester: HarvesterId,
        field: FieldId,
        access: AccessId,
    },

    /// Send a TV with spare bunker capacity to a harvester's turn queue.
    Assist { tv: TvId, harvester: HarvesterId },

    /// Send a loaded TV to a silo access point to unload.
    Unload { tv: TvId, sap: SapId },
}

impl Decision {
    /// A total, state-independent ordering key.
    ///
    /// Used to break score ties deterministically: assignment before assist
    /// before unload, then ascending entity ids.  The exact order is
    /// arbitrary but fixed and documented — plans must be reproducible.
    pub fn ordinal(&self) -> (u8, u32, u32, u32) {
        match *self {
            Decision::AssignField { harvester, field, access } => (0, harvester.0, field.0, access.0),
            Decision::Assist { tv, harvester } => (1, tv.0, harvester.0, 0),
            Decision::Unload { tv, sap } => (2, tv.0, sap.0, 0),
        }
    }
}

// ── Candidate ─────────────────────────────────────────────────────────────────

/// A [`Decision`] plus the engine-computed travel time it implies.
///
/// Attaching the oracle lookup here keeps scoring functions pure over the
/// campaign state — a policy never touches the transit oracle itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub decision: Decision,
    /// Travel time from the deciding machine's current location to the
    /// decision's destination.
    pub transit: SimDuration,
}
