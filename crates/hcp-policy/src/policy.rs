//! The `DispatchPolicy` trait — the planner's main extension point.

use hcp_model::CampaignState;

use crate::candidate::Candidate;

/// Pluggable scoring of dispatch decisions.
///
/// Implement this trait to define how the engine ranks competing choices at
/// its three decision points: field→harvester assignment, the TV
/// assist-or-unload branch, and silo access selection.
///
/// # Contract
///
/// - **Lower score wins.**  Scores are costs, not rewards.
/// - **Pure and deterministic**: the score may depend only on `state` and
///   `candidate`.  Identical inputs must give identical scores — plans are
///   compared byte-for-byte in tests and across replanning runs.
/// - **Hard constraints are not the policy's job.**  The engine only offers
///   feasible candidates and re-ranks with a candidate excluded if applying
///   it turns out infeasible; a policy never needs to defend against (or
///   encode) capacity or assignment rules.
///
/// # Thread safety
///
/// `Send + Sync` so one policy instance can serve several independently
/// constructed campaigns on worker threads.
pub trait DispatchPolicy: Send + Sync {
    /// Cost of taking `candidate` in `state`.
    fn score(&self, state: &CampaignState, candidate: &Candidate) -> f64;

    /// Indices of `candidates` from best to worst.
    ///
    /// Ties break on [`Decision::ordinal`][crate::Decision::ordinal], so the
    /// ranking is total and reproducible.  The engine walks this ranking when
    /// recovering from an infeasible first choice.
    fn rank(&self, state: &CampaignState, candidates: &[Candidate]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..candidates.len()).collect();
        order.sort_by(|&a, &b| {
            let sa = self.score(state, &candidates[a]);
            let sb = self.score(state, &candidates[b]);
            sa.total_cmp(&sb)
                .then_with(|| candidates[a].decision.ordinal().cmp(&candidates[b].decision.ordinal()))
        });
        order
    }
}
