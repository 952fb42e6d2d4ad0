//! `GreedyYieldPolicy` — chase the largest unharvested mass.

use hcp_model::CampaignState;

use crate::candidate::{Candidate, Decision};
use crate::policy::DispatchPolicy;

/// Greedy yield-mass policy.
///
/// Scores every candidate as its travel time minus a yield bonus: the more
/// unharvested mass a choice attacks (or the more bunker mass it delivers to
/// storage), the cheaper it looks.  `yield_weight_s_per_kg` converts
/// kilograms into equivalent travel seconds; the default makes 100 kg worth
/// one second of driving.
#[derive(Debug, Clone, Copy)]
pub struct GreedyYieldPolicy {
    /// Seconds of travel one kilogram of yield is worth.
    pub yield_weight_s_per_kg: f64,
}

impl Default for GreedyYieldPolicy {
    fn default() -> Self {
        Self { yield_weight_s_per_kg: 0.01 }
    }
}

impl DispatchPolicy for GreedyYieldPolicy {
    fn score(&self, state: &CampaignState, candidate: &Candidate) -> f64 {
        let transit_s = candidate.transit.as_secs_f64();
        match candidate.decision {
            Decision::AssignField { field, .. } => {
                let remaining = state.field(field).remaining_yield_kg;
                transit_s - remaining * self.yield_weight_s_per_kg
            }
            Decision::Assist { harvester, .. } => {
                // Mass this TV could still pull off the harvester's field.
                let remaining = state
                    .harvester(harvester)
                    .assigned_field
                    .map(|f| state.field(f).remaining_yield_kg)
                    .unwrap_or(0.0);
                transit_s - remaining * self.yield_weight_s_per_kg
            }
            Decision::Unload { tv, .. } => {
                // Delivering a fuller bunker is worth more.
                let bunker = state.tv(tv).bunker_kg;
                transit_s - bunker * self.yield_weight_s_per_kg
            }
        }
    }
}
