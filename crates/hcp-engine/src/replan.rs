//! Checkpointing and replanning.
//!
//! Two replanning entry points exist:
//!
//! - [`Planner::checkpoint`] / [`Planner::resume`]: an engine-internal
//!   checkpoint carries the state snapshot *plus* the pending event queue,
//!   so mid-transfer transitions (a half-finished overload leg, a running
//!   sweep) survive the round trip exactly.  Resuming and running to
//!   completion produces the same action suffix the original run would
//!   have produced.
//! - [`Planner::resume_from_snapshot`]: an external snapshot (updated field
//!   measurements, a machine breakdown edited in) has no pending events;
//!   the builder re-seeds every machine's next transition from its state.
//!   Mid-transfer states are rejected there.

use serde::{Deserialize, Serialize};

use hcp_core::SimTime;
use hcp_model::{CampaignSnapshot, CampaignState};
use hcp_policy::DispatchPolicy;
use hcp_routing::TransitOracle;

use crate::builder::PlannerBuilder;
use crate::error::EngineResult;
use crate::event::{Event, EventQueue};
use crate::planner::Planner;

/// One queued event inside a [`Checkpoint`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingEvent {
    pub time: SimTime,
    pub event: Event,
}

/// A resumable freeze of a planning run: the mutable campaign state plus
/// every scheduled event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub snapshot: CampaignSnapshot,
    pub pending: Vec<PendingEvent>,
}

impl<P: DispatchPolicy, O: TransitOracle> Planner<P, O> {
    /// Freeze the current run into a [`Checkpoint`].
    ///
    /// Recorded actions are *not* part of the checkpoint; read them off via
    /// [`actions`][Planner::actions] before discarding the planner.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            snapshot: self.state.to_snapshot(),
            pending: self
                .queue
                .pending()
                .into_iter()
                .map(|(time, event)| PendingEvent { time, event })
                .collect(),
        }
    }

    /// Rebuild a planner from a [`Checkpoint`].
    ///
    /// `statics` supplies the immutable half of the world (capacities,
    /// rates, topology) — typically a freshly assembled campaign; its
    /// mutable half is overwritten from the checkpoint snapshot.
    pub fn resume(
        mut statics: CampaignState,
        checkpoint: &Checkpoint,
        policy: P,
        oracle: O,
    ) -> EngineResult<Self> {
        statics.apply_snapshot(&checkpoint.snapshot)?;
        let mut queue = EventQueue::new();
        for pending in &checkpoint.pending {
            queue.push(pending.time, pending.event.clone());
        }
        Ok(Planner { state: statics, policy, oracle, queue, actions: Vec::new() })
    }

    /// Start a fresh planning run from an externally produced snapshot.
    ///
    /// Every machine's next transition is re-derived from its snapshot
    /// state; see [`PlannerBuilder`] for the validation rules.
    pub fn resume_from_snapshot(
        mut statics: CampaignState,
        snapshot: &CampaignSnapshot,
        policy: P,
        oracle: O,
    ) -> EngineResult<Self> {
        statics.apply_snapshot(snapshot)?;
        PlannerBuilder::new(statics, policy, oracle).build()
    }
}
