//! `hcp-engine` — the constructive discrete-event scheduling engine of the
//! harvest campaign planner.
//!
//! # Event loop
//!
//! ```text
//! seed: every machine's next transition → event queue
//! loop:
//!   ① Pop      — earliest (time, rank, machine) event; advance the clock.
//!   ② Apply    — the forced transition: move mass, update machine states,
//!                record the completed action.
//!   ③ Schedule — the follow-up completion, or a decision event.
//!   ④ Decide   — at decision events, enumerate feasible candidates, rank
//!                them through the DispatchPolicy, commit the best feasible.
//! until the queue drains → success check or deadlock report.
//! ```
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`event`]  | `Event`, `EventQueue` + the deterministic tie-break order |
//! | [`action`] | `Plan`, `PlanAction`, `PlanStats`                         |
//! | [`planner`]| `Planner` — the event loop and synchronization protocol   |
//! | [`builder`]| `PlannerBuilder` — validation and event seeding           |
//! | [`replan`] | `Checkpoint`, resume entry points                         |
//! | [`observer`]| `PlanObserver`, `NoopObserver`                           |
//! | [`error`]  | `EngineError`, `EngineResult`                             |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | [`construct_all`] runs on Rayon's thread pool.          |

pub mod action;
pub mod builder;
pub mod error;
pub mod event;
pub mod observer;
pub mod planner;
pub mod replan;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use action::{Plan, PlanAction, PlanActionKind, PlanAgent, PlanStats};
pub use builder::PlannerBuilder;
pub use error::{EngineError, EngineResult};
pub use event::{Event, EventQueue};
pub use observer::{NoopObserver, PlanObserver};
pub use planner::Planner;
pub use replan::{Checkpoint, PendingEvent};

use hcp_policy::DispatchPolicy;
use hcp_routing::TransitOracle;

/// Construct several independent campaigns, one plan each.
///
/// Campaigns share nothing, so with the `parallel` feature each runs on
/// Rayon's thread pool; without it they run sequentially.  Results keep the
/// input order either way.
#[cfg(feature = "parallel")]
pub fn construct_all<P, O>(planners: Vec<Planner<P, O>>) -> Vec<EngineResult<Plan>>
where
    P: DispatchPolicy + Send,
    O: TransitOracle + Send,
{
    use rayon::prelude::*;

    planners
        .into_par_iter()
        .map(|mut planner| planner.construct(&mut NoopObserver))
        .collect()
}

/// Construct several independent campaigns, one plan each (sequential).
#[cfg(not(feature = "parallel"))]
pub fn construct_all<P, O>(planners: Vec<Planner<P, O>>) -> Vec<EngineResult<Plan>>
where
    P: DispatchPolicy + Send,
    O: TransitOracle + Send,
{
    planners
        .into_iter()
        .map(|mut planner| planner.construct(&mut NoopObserver))
        .collect()
}
