//! The event queue driving the constructive scheduling loop.
//!
//! # Why this exists
//!
//! Machine transitions complete at irregular instants (an overload leg lasts
//! exactly `amount / rate` seconds), so a fixed-step loop would either waste
//! work on empty steps or round completion times.  The engine instead keeps a
//! sparse queue of scheduled completions and decision points and jumps the
//! clock from event to event — O(active transitions) work, exact timestamps.
//!
//! # Deterministic ordering
//!
//! Plans must be byte-for-byte reproducible, so ties at one instant resolve
//! by a fixed event-kind rank and then by agent id.  The rank puts transfer
//! completions (which free capacity and release machines) before arrivals,
//! and all forced transitions before the policy-driven decision points, so a
//! decision always sees the fully settled state of its instant:
//!
//! | Rank | Event                |
//! |------|----------------------|
//! | 0    | `OverloadFinished`   |
//! | 1    | `UnloadFinished`     |
//! | 2    | `SweepFinished`      |
//! | 3    | `TvExitedField`      |
//! | 4    | `HarvesterExited`    |
//! | 5    | `HarvesterArrived`   |
//! | 6    | `TvArrivedAtField`   |
//! | 7    | `TvArrivedAtSap`     |
//! | 8    | `HarvesterDecision`  |
//! | 9    | `TvDecision`         |

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use hcp_core::{AccessId, CompactorId, FieldId, HarvesterId, SapId, SimTime, TvId};

// ── Event ─────────────────────────────────────────────────────────────────────

/// A scheduled transition completion or decision point.
///
/// Travel and transfer events carry the instant the motion/transfer began
/// (`started`) so the completed action can be recorded with its full span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// A harvester reaches the overload-start location of its field.
    HarvesterArrived { harvester: HarvesterId, started: SimTime },
    /// A TV reaches the overload-start location of `field`.
    TvArrivedAtField { tv: TvId, field: FieldId, started: SimTime },
    /// One overload leg completes, transferring `transferred_kg`.
    OverloadFinished {
        harvester: HarvesterId,
        tv: TvId,
        transferred_kg: f64,
        started: SimTime,
    },
    /// A TV reaches `access` on its way out of a field.
    TvExitedField { tv: TvId, access: AccessId, started: SimTime },
    /// A harvester reaches `access` after finishing its field.
    HarvesterExited { harvester: HarvesterId, access: AccessId, started: SimTime },
    /// A TV reaches its assigned silo access point.
    TvArrivedAtSap { tv: TvId, started: SimTime },
    /// A TV finishes emptying its bunker at a SAP.
    UnloadFinished { tv: TvId, started: SimTime },
    /// A compactor finishes one sweep over `sap`.
    SweepFinished { compactor: CompactorId, sap: SapId, started: SimTime },
    /// An idle harvester picks (or declines) a next field.
    HarvesterDecision { harvester: HarvesterId },
    /// A TV at a decision point picks assist-or-unload.
    TvDecision { tv: TvId },
}

impl Event {
    /// Same-instant ordering rank (see the module docs).
    fn rank(&self) -> u8 {
        match self {
            Event::OverloadFinished { .. }  => 0,
            Event::UnloadFinished { .. }    => 1,
            Event::SweepFinished { .. }     => 2,
            Event::TvExitedField { .. }     => 3,
            Event::HarvesterExited { .. }   => 4,
            Event::HarvesterArrived { .. }  => 5,
            Event::TvArrivedAtField { .. }  => 6,
            Event::TvArrivedAtSap { .. }    => 7,
            Event::HarvesterDecision { .. } => 8,
            Event::TvDecision { .. }        => 9,
        }
    }

    /// The id of the machine this event belongs to, as a raw ordinal.
    fn agent_ordinal(&self) -> u32 {
        match *self {
            Event::HarvesterArrived { harvester, .. }
            | Event::HarvesterExited { harvester, .. }
            | Event::HarvesterDecision { harvester } => harvester.0,
            Event::OverloadFinished { tv, .. }
            | Event::TvArrivedAtField { tv, .. }
            | Event::TvExitedField { tv, .. }
            | Event::TvArrivedAtSap { tv, .. }
            | Event::UnloadFinished { tv, .. }
            | Event::TvDecision { tv } => tv.0,
            Event::SweepFinished { compactor, .. } => compactor.0,
        }
    }
}

// ── EventQueue ────────────────────────────────────────────────────────────────

/// Total ordering key: instant, then event-kind rank, then agent id.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
struct EventKey {
    time: SimTime,
    rank: u8,
    agent: u32,
}

/// A priority queue of scheduled events, ordered by [`EventKey`].
///
/// The synchronization protocol schedules at most one pending event per
/// machine at a time (its next transition), so keys never collide.
#[derive(Default)]
pub struct EventQueue {
    inner: BTreeMap<EventKey, Event>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` at `time`.
    pub fn push(&mut self, time: SimTime, event: Event) {
        let key = EventKey { time, rank: event.rank(), agent: event.agent_ordinal() };
        let prev = self.inner.insert(key, event);
        debug_assert!(prev.is_none(), "two pending events for one machine at one instant");
    }

    /// Remove and return the earliest event.
    pub fn pop_first(&mut self) -> Option<(SimTime, Event)> {
        self.inner.pop_first().map(|(key, ev)| (key.time, ev))
    }

    /// The instant of the earliest queued event, or `None` if empty.
    pub fn next_time(&self) -> Option<SimTime> {
        self.inner.keys().next().map(|k| k.time)
    }

    /// All queued events in order, for checkpointing.
    pub fn pending(&self) -> Vec<(SimTime, Event)> {
        self.inner.iter().map(|(key, ev)| (key.time, ev.clone())).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
