//! `hcp-policy` — the heuristic evaluator of the harvest campaign planner.
//!
//! The scheduling engine is exact about *feasibility* (capacities, turn
//! queues, synchronization) but delegates every *choice* — which field a
//! freed harvester takes next, whether a partially loaded TV assists or
//! unloads, which silo access point to drive to — to a [`DispatchPolicy`].
//!
//! Policies are pure scoring functions over the campaign state, so they are
//! swappable without touching the engine, and the engine stays correct under
//! any of them (hard constraints are enforced engine-side).
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`candidate`] | `Decision`, `Candidate`                               |
//! | [`policy`]    | `DispatchPolicy` trait + deterministic ranking        |
//! | [`greedy`]    | `GreedyYieldPolicy`                                   |
//! | [`idle`]      | `IdleMinimizingPolicy`                                |
//! | [`window`]    | `CostWindowPolicy` decorator (waiting-time penalty)   |

pub mod candidate;
pub mod greedy;
pub mod idle;
pub mod policy;
pub mod window;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use candidate::{Candidate, Decision};
pub use greedy::GreedyYieldPolicy;
pub use idle::IdleMinimizingPolicy;
pub use policy::DispatchPolicy;
pub use window::CostWindowPolicy;
