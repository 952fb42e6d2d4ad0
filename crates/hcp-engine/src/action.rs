//! The constructed plan: timestamped machine actions plus summary statistics.

use serde::{Deserialize, Serialize};

use hcp_core::{CompactorId, HarvesterId, Location, SimDuration, SimTime, TvId};
use hcp_model::CampaignState;

// ── PlanAgent ─────────────────────────────────────────────────────────────────

/// The machine an action belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanAgent {
    Harvester(HarvesterId),
    Tv(TvId),
    Compactor(CompactorId),
}

impl std::fmt::Display for PlanAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanAgent::Harvester(id) => write!(f, "harvester_{}", id.0),
            PlanAgent::Tv(id)        => write!(f, "tv_{}", id.0),
            PlanAgent::Compactor(id) => write!(f, "compactor_{}", id.0),
        }
    }
}

// ── PlanAction ────────────────────────────────────────────────────────────────

/// What an action does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanActionKind {
    /// Travel from `from` to `to`.
    Drive,
    /// One harvester→TV overload leg.
    Overload,
    /// Empty a TV bunker at a silo access point.
    Unload,
    /// One compactor sweep moving held yield into silo storage.
    Sweep,
}

impl std::fmt::Display for PlanActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanActionKind::Drive    => write!(f, "drive"),
            PlanActionKind::Overload => write!(f, "overload"),
            PlanActionKind::Unload   => write!(f, "unload"),
            PlanActionKind::Sweep    => write!(f, "sweep"),
        }
    }
}

/// One timestamped machine action of the constructed plan.
///
/// Actions are recorded when their transition *completes*, so the plan is
/// ordered by non-decreasing `end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanAction {
    pub agent: PlanAgent,
    pub kind: PlanActionKind,
    pub start: SimTime,
    pub end: SimTime,
    pub from: Location,
    pub to: Location,
    /// Mass moved by this action [kg]: positive into the agent's load (or,
    /// for sweeps, into silo storage), negative out of it, zero for drives.
    pub quantity_kg: f64,
}

// ── Plan ──────────────────────────────────────────────────────────────────────

/// Summary statistics over one constructed plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanStats {
    /// End of the latest action.
    pub makespan: SimTime,
    /// Total in-field harvester waiting time across the campaign.
    pub harvester_waiting: SimDuration,
    /// Total TV waiting time (at fields and at SAPs) across the campaign.
    pub tv_waiting: SimDuration,
    /// Yield mass in silo storage when the plan completed [kg].
    pub stored_kg: f64,
}

/// A complete (or, on deadlock, partial) campaign plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub actions: Vec<PlanAction>,
    pub stats: PlanStats,
}

impl Plan {
    /// Assemble a plan from the recorded actions and the final state.
    pub(crate) fn assemble(actions: Vec<PlanAction>, state: &CampaignState) -> Plan {
        let makespan = actions
            .iter()
            .map(|a| a.end)
            .max()
            .unwrap_or(SimTime::ZERO);
        let stats = PlanStats {
            makespan,
            harvester_waiting: state.harvesters.iter().map(|h| h.total_waiting).sum(),
            tv_waiting: state.tvs.iter().map(|tv| tv.total_waiting).sum(),
            stored_kg: state.mass_stored(),
        };
        Plan { actions, stats }
    }
}
