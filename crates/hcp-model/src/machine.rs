//! Harvesters and transport vehicles.
//!
//! # Turn queue ownership
//!
//! The overload turn queue is a bounded FIFO with a single active occupant,
//! owned by the `Harvester` record.  Transport vehicles hold only a
//! back-reference (`assigned_harvester`) for lookup, never ownership.

use std::collections::VecDeque;

use hcp_core::{FieldId, HarvesterId, Location, SapId, SimDuration, SimTime, TvId};

// ── HarvesterState ────────────────────────────────────────────────────────────

/// The harvester state machine.
///
/// `Idle → TravelingToField → WaitingForTv ⇄ Harvesting → ExitingField → Idle`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum HarvesterState {
    /// No field assigned; eligible for a new assignment.
    Idle,
    /// Driving to an access point of the assigned field.
    TravelingToField,
    /// In the field, no transport vehicle currently overloading.
    WaitingForTv,
    /// Actively overloading into exactly one transport vehicle.
    Harvesting,
    /// Field complete; driving to an access point.
    ExitingField,
}

// ── Harvester ─────────────────────────────────────────────────────────────────

/// A harvester and its overload turn queue.
#[derive(Debug, Clone, PartialEq)]
pub struct Harvester {
    pub id: HarvesterId,
    pub name: String,

    /// Harvesting rate [kg/s] while actively overloading.
    pub working_rate_kg_s: f64,

    pub location: Location,
    pub state: HarvesterState,

    /// The field this harvester exclusively owns while assigned.
    pub assigned_field: Option<FieldId>,

    /// Transport vehicles queued to overload from this harvester, front
    /// first.  The front element is the TV whose turn is current.
    pub turn_queue: VecDeque<TvId>,

    /// The TV currently in the actively-overloading sub-state.
    /// Invariant: at most one per harvester, and always the queue front.
    pub active_tv: Option<TvId>,

    /// Set while the harvester is waiting in-field for a TV.
    pub waiting_since: Option<SimTime>,

    /// Accumulated in-field waiting time over the whole campaign.
    pub total_waiting: SimDuration,
}

impl Harvester {
    pub fn new(
        id: HarvesterId,
        name: impl Into<String>,
        working_rate_kg_s: f64,
        location: Location,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            working_rate_kg_s,
            location,
            state: HarvesterState::Idle,
            assigned_field: None,
            turn_queue: VecDeque::new(),
            active_tv: None,
            waiting_since: None,
            total_waiting: SimDuration::ZERO,
        }
    }

    /// The TV whose turn is current, if any is queued.
    #[inline]
    pub fn front_tv(&self) -> Option<TvId> {
        self.turn_queue.front().copied()
    }

    /// Start the waiting clock (idempotent — an already-waiting harvester
    /// keeps its original start).
    pub fn begin_waiting(&mut self, now: SimTime) {
        if self.waiting_since.is_none() {
            self.waiting_since = Some(now);
        }
    }

    /// Stop the waiting clock and fold the waited span into the total.
    pub fn end_waiting(&mut self, now: SimTime) {
        if let Some(since) = self.waiting_since.take() {
            self.total_waiting = self.total_waiting + now.since(since);
        }
    }
}

// ── TvState ───────────────────────────────────────────────────────────────────

/// The transport-vehicle state machine.
///
/// `Decision` is the only branching point a dispatch policy controls; every
/// other transition is forced by the synchronization protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum TvState {
    /// At a decision point: assist a harvester or unload at a silo.
    Decision,
    /// Driving to the assigned harvester's field.
    TravelingToField,
    /// Arrived at the field; harvester not ready or not this TV's turn yet.
    WaitingAtField,
    /// Actively receiving yield from the assigned harvester.
    Overloading,
    /// Driving from the overload-stop location to a field access point.
    ExitingField,
    /// Driving to the assigned silo access point.
    TravelingToSilo,
    /// Arrived at the SAP; waiting for capacity/occupancy.
    WaitingAtSap,
    /// Transferring the bunker content at the SAP.
    Unloading,
    /// Empty, and no harvester needs assistance any more.
    Done,
}

// ── Tv ────────────────────────────────────────────────────────────────────────

/// A transport vehicle.
#[derive(Debug, Clone, PartialEq)]
pub struct Tv {
    pub id: TvId,
    pub name: String,

    /// Bunker capacity [kg].
    pub capacity_kg: f64,

    /// Current bunker mass [kg].  Invariant: `0 <= bunker_kg <= capacity_kg`,
    /// mutated only during an active overload or unload transition.
    pub bunker_kg: f64,

    /// Unloading rate at a SAP [kg/s].
    pub unload_rate_kg_s: f64,

    pub location: Location,
    pub state: TvState,

    /// Back-reference to the harvester whose turn queue this TV is in.
    pub assigned_harvester: Option<HarvesterId>,

    /// The SAP this TV is travelling to / unloading at.
    pub assigned_sap: Option<SapId>,

    /// Set while the TV waits at a field or SAP.
    pub waiting_since: Option<SimTime>,

    /// Accumulated waiting time over the whole campaign.
    pub total_waiting: SimDuration,
}

impl Tv {
    pub fn new(
        id: TvId,
        name: impl Into<String>,
        capacity_kg: f64,
        unload_rate_kg_s: f64,
        location: Location,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            capacity_kg,
            bunker_kg: 0.0,
            unload_rate_kg_s,
            location,
            state: TvState::Decision,
            assigned_harvester: None,
            assigned_sap: None,
            waiting_since: None,
            total_waiting: SimDuration::ZERO,
        }
    }

    /// Remaining bunker capacity [kg].
    #[inline]
    pub fn spare_capacity_kg(&self) -> f64 {
        (self.capacity_kg - self.bunker_kg).max(0.0)
    }

    /// `true` once the bunker cannot take any further yield.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.spare_capacity_kg() <= crate::MASS_EPS_KG
    }

    /// `true` while the bunker holds any yield.
    #[inline]
    pub fn is_loaded(&self) -> bool {
        self.bunker_kg > crate::MASS_EPS_KG
    }

    /// Start the waiting clock (idempotent).
    pub fn begin_waiting(&mut self, now: SimTime) {
        if self.waiting_since.is_none() {
            self.waiting_since = Some(now);
        }
    }

    /// Stop the waiting clock and fold the waited span into the total.
    pub fn end_waiting(&mut self, now: SimTime) {
        if let Some(since) = self.waiting_since.take() {
            self.total_waiting = self.total_waiting + now.since(since);
        }
    }
}
