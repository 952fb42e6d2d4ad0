//! Silos, silo access points, and compactors.
//!
//! # Simplified vs. extended model
//!
//! In the simplified model a SAP has no capacity of its own
//! (`capacity_kg == None`): unloaded yield transfers instantaneously to silo
//! storage and any number of TVs may unload concurrently.  In the extended
//! model a SAP holds yield locally (single occupant at a time, bounded
//! `capacity_kg`) until a compactor sweep moves it into silo storage and
//! relieves the SAP.

use std::collections::VecDeque;

use hcp_core::{CompactorId, SapId, SiloId, SimDuration, TvId};

// ── Silo ──────────────────────────────────────────────────────────────────────

/// A storage silo.
#[derive(Debug, Clone, PartialEq)]
pub struct Silo {
    pub id: SiloId,
    pub name: String,

    /// Total storage capacity [kg]; `None` means unbounded.
    pub capacity_kg: Option<f64>,

    /// Yield mass currently in storage [kg].
    /// Invariant: `stored_kg <= capacity_kg` when the capacity is finite.
    pub stored_kg: f64,

    /// Access/unloading points of this silo.  Every silo has at least one.
    pub access_points: Vec<SapId>,
}

impl Silo {
    pub fn new(
        id: SiloId,
        name: impl Into<String>,
        capacity_kg: Option<f64>,
        access_points: Vec<SapId>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            capacity_kg,
            stored_kg: 0.0,
            access_points,
        }
    }

    /// Remaining storage capacity [kg]; infinite for unbounded silos.
    #[inline]
    pub fn free_capacity_kg(&self) -> f64 {
        match self.capacity_kg {
            Some(cap) => (cap - self.stored_kg).max(0.0),
            None => f64::INFINITY,
        }
    }
}

// ── SiloAccess ────────────────────────────────────────────────────────────────

/// A silo access/unloading point (SAP).
#[derive(Debug, Clone, PartialEq)]
pub struct SiloAccess {
    pub id: SapId,
    /// The silo this access point belongs to.
    pub silo: SiloId,

    /// Local holding capacity [kg].  `None` selects the simplified model:
    /// unlimited concurrent users, yield passes straight to silo storage.
    pub capacity_kg: Option<f64>,

    /// Yield held at the SAP awaiting a compactor sweep [kg].
    /// Always zero in the simplified model.
    pub held_kg: f64,

    /// The TV currently occupying the SAP (extended model only).
    pub occupant: Option<TvId>,

    /// TVs waiting for the SAP to become available, front first.
    pub wait_queue: VecDeque<TvId>,

    /// Duration of one compactor sweep over this SAP.
    pub sweep_duration: SimDuration,
}

impl SiloAccess {
    /// A simplified-model SAP: no local capacity, no occupancy lock.
    pub fn unbounded(id: SapId, silo: SiloId) -> Self {
        Self {
            id,
            silo,
            capacity_kg: None,
            held_kg: 0.0,
            occupant: None,
            wait_queue: VecDeque::new(),
            sweep_duration: SimDuration::ZERO,
        }
    }

    /// An extended-model SAP with local capacity and a single-occupancy lock.
    pub fn bounded(id: SapId, silo: SiloId, capacity_kg: f64, sweep_duration: SimDuration) -> Self {
        Self {
            id,
            silo,
            capacity_kg: Some(capacity_kg),
            held_kg: 0.0,
            occupant: None,
            wait_queue: VecDeque::new(),
            sweep_duration,
        }
    }

    /// `true` when this SAP follows the simplified (pass-through) model.
    #[inline]
    pub fn is_pass_through(&self) -> bool {
        self.capacity_kg.is_none()
    }

    /// Remaining local holding capacity [kg]; infinite in the simplified model.
    #[inline]
    pub fn free_capacity_kg(&self) -> f64 {
        match self.capacity_kg {
            Some(cap) => (cap - self.held_kg).max(0.0),
            None => f64::INFINITY,
        }
    }
}

// ── Compactor ─────────────────────────────────────────────────────────────────

/// What a compactor is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum CompactorState {
    Idle,
    /// Sweeping the given SAP.
    Sweeping(SapId),
}

/// A compacting machine serving one silo (extended model).
///
/// Each sweep transfers up to `mass_per_sweep_kg` from a SAP's local holding
/// into silo storage, releasing SAP capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct Compactor {
    pub id: CompactorId,
    /// The silo whose SAPs this compactor serves.
    pub silo: SiloId,

    /// Yield mass moved into storage by one sweep tour [kg].
    pub mass_per_sweep_kg: f64,

    pub state: CompactorState,
}

impl Compactor {
    pub fn new(id: CompactorId, silo: SiloId, mass_per_sweep_kg: f64) -> Self {
        Self {
            id,
            silo,
            mass_per_sweep_kg,
            state: CompactorState::Idle,
        }
    }
}
