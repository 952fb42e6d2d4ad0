//! `IdleMinimizingPolicy` — keep harvesters fed.

use hcp_model::CampaignState;

use crate::candidate::{Candidate, Decision};
use crate::policy::DispatchPolicy;

/// Harvester-idle-minimizing policy.
///
/// A harvester only produces while a TV is under its spout, so the dominant
/// cost proxy is how long each choice leaves harvesters unattended:
///
/// - `AssignField`: the harvester is idle for the whole transit.
/// - `Assist`: favor the harvester whose turn queue runs dry soonest —
///   cost is the projected queue backlog (seconds of overloading already
///   lined up ahead of this TV) minus nothing; a starved harvester has a
///   backlog of zero and wins.
/// - `Unload`: the TV is out of service for the transit plus the unload
///   itself; shorter round trips return it to a queue sooner.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdleMinimizingPolicy;

impl IdleMinimizingPolicy {
    /// Seconds of overloading work already queued at `harvester`.
    fn backlog_secs(state: &CampaignState, harvester: hcp_core::HarvesterId) -> f64 {
        let h = state.harvester(harvester);
        if h.working_rate_kg_s <= 0.0 {
            return f64::INFINITY;
        }
        let queued_spare: f64 = h
            .turn_queue
            .iter()
            .map(|&tv| state.tv(tv).spare_capacity_kg())
            .sum();
        queued_spare / h.working_rate_kg_s
    }
}

impl DispatchPolicy for IdleMinimizingPolicy {
    fn score(&self, state: &CampaignState, candidate: &Candidate) -> f64 {
        let transit_s = candidate.transit.as_secs_f64();
        match candidate.decision {
            Decision::AssignField { .. } => transit_s,
            Decision::Assist { harvester, .. } => {
                // The harvester is covered for `backlog` seconds already; a
                // TV arriving before the queue runs dry costs nothing extra,
                // one arriving after leaves a starvation gap.
                let backlog = Self::backlog_secs(state, harvester);
                (transit_s - backlog).max(0.0) + backlog
            }
            Decision::Unload { tv, .. } => {
                let t = state.tv(tv);
                let unload_s = if t.unload_rate_kg_s > 0.0 {
                    t.bunker_kg / t.unload_rate_kg_s
                } else {
                    f64::INFINITY
                };
                transit_s + unload_s
            }
        }
    }
}
