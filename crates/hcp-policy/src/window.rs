//! `CostWindowPolicy` — soft-deadline waiting penalties.
//!
//! A cost window is a soft deadline: exceeding it does not forbid a choice
//! (that would be a control window, enforced by the engine) but makes every
//! decision that prolongs the waiting more expensive.  Wrapping an inner
//! policy keeps the two concerns separate — base preference and waiting
//! pressure — and lets tests exercise the penalty in isolation.

use hcp_core::SimDuration;
use hcp_model::CampaignState;

use crate::candidate::{Candidate, Decision};
use crate::policy::DispatchPolicy;

/// Decorator adding a waiting-time penalty to an inner policy.
///
/// Two windows are tracked:
///
/// - **Queue pressure**: an `Assist` candidate joining harvester `h` is
///   penalized by the projected time this TV would itself spend waiting at
///   the field beyond `epsilon` (the backlog of TVs already queued ahead of
///   it, less the travel time it spends on the road anyway).
/// - **Already-waiting machines**: any candidate for a TV that has been
///   waiting longer than `epsilon` gets the excess refunded, so the
///   longest-waiting TV's candidates win ties against fresher competitors.
///   The refund is uniform across one TV's own candidate set and never
///   reorders a single machine's ranking; it matters only where scores are
///   compared *across* machines — an external dispatcher or declarative
///   solver deciding which TV to serve next.  The constructive engine
///   ranks one machine's candidates at a time and sees only the
///   queue-pressure term.
#[derive(Debug, Clone, Copy)]
pub struct CostWindowPolicy<P> {
    pub inner: P,
    /// Waiting below this threshold is free.
    pub epsilon: SimDuration,
    /// Cost added (or refunded) per second of waiting beyond `epsilon`.
    pub penalty_per_sec: f64,
}

impl<P> CostWindowPolicy<P> {
    pub fn new(inner: P, epsilon: SimDuration, penalty_per_sec: f64) -> Self {
        Self { inner, epsilon, penalty_per_sec }
    }

    fn projected_wait_secs(&self, state: &CampaignState, candidate: &Candidate) -> f64 {
        match candidate.decision {
            Decision::Assist { harvester, .. } => {
                let h = state.harvester(harvester);
                if h.working_rate_kg_s <= 0.0 {
                    return 0.0;
                }
                let queued_spare: f64 = h
                    .turn_queue
                    .iter()
                    .map(|&tv| state.tv(tv).spare_capacity_kg())
                    .sum();
                let backlog = queued_spare / h.working_rate_kg_s;
                (backlog - candidate.transit.as_secs_f64()).max(0.0)
            }
            _ => 0.0,
        }
    }

    fn waited_excess_secs(&self, state: &CampaignState, candidate: &Candidate) -> f64 {
        let tv = match candidate.decision {
            Decision::Assist { tv, .. } | Decision::Unload { tv, .. } => tv,
            Decision::AssignField { .. } => return 0.0,
        };
        match state.tv(tv).waiting_since {
            Some(since) => {
                let waited = state.now.since(since);
                (waited - self.epsilon).as_secs_f64()
            }
            None => 0.0,
        }
    }
}

impl<P: DispatchPolicy> DispatchPolicy for CostWindowPolicy<P> {
    fn score(&self, state: &CampaignState, candidate: &Candidate) -> f64 {
        let projected = (self.projected_wait_secs(state, candidate)
            - self.epsilon.as_secs_f64())
            .max(0.0);
        let waited = self.waited_excess_secs(state, candidate);

        self.inner.score(state, candidate) + self.penalty_per_sec * (projected - waited)
    }
}
