//! Campaign state snapshots — the replanning input/output records.
//!
//! A snapshot carries exactly the *mutable* half of the world, timestamped
//! to a single `as_of` instant: locations, machine states, bunker and yield
//! masses, assignments, and turn queues.  The static half (capacities,
//! rates, access-point topology) comes from the campaign description the
//! state was originally assembled from.
//!
//! Replanning is a fresh engine invocation seeded from a snapshot.  The
//! hand-off is a single atomic read: build the static campaign, call
//! [`CampaignState::apply_snapshot`], and start a new engine.  Snapshots are
//! validated in full *before* any mutation so an inconsistent file never
//! contaminates a run.

use serde::{Deserialize, Serialize};

use hcp_core::{
    CompactorId, FieldId, HarvesterId, Location, SapId, SiloId, SimDuration, SimTime, TvId,
};

use crate::campaign::CampaignState;
use crate::error::{ModelError, ModelResult};
use crate::machine::{HarvesterState, TvState};
use crate::silo::CompactorState;

// ── Per-entity records ────────────────────────────────────────────────────────

/// Mutable state of one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSnapshot {
    pub id: FieldId,
    pub remaining_yield_kg: f64,
    pub harvested: bool,
    pub assigned_harvester: Option<HarvesterId>,
}

/// Mutable state of one harvester.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvesterSnapshot {
    pub id: HarvesterId,
    pub state: HarvesterState,
    pub location: Location,
    pub assigned_field: Option<FieldId>,
    /// Turn queue, front first.
    pub turn_queue: Vec<TvId>,
    pub active_tv: Option<TvId>,
    /// Start of the current waiting stretch, if the machine is waiting.
    #[serde(default)]
    pub waiting_since: Option<SimTime>,
    #[serde(default)]
    pub total_waiting: SimDuration,
}

/// Mutable state of one transport vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvSnapshot {
    pub id: TvId,
    pub state: TvState,
    pub location: Location,
    pub bunker_kg: f64,
    pub assigned_harvester: Option<HarvesterId>,
    pub assigned_sap: Option<SapId>,
    #[serde(default)]
    pub waiting_since: Option<SimTime>,
    #[serde(default)]
    pub total_waiting: SimDuration,
}

/// Mutable state of one silo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiloSnapshot {
    pub id: SiloId,
    pub stored_kg: f64,
}

/// Mutable state of one silo access point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SapSnapshot {
    pub id: SapId,
    pub held_kg: f64,
    pub occupant: Option<TvId>,
    pub wait_queue: Vec<TvId>,
}

/// Mutable state of one compactor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompactorSnapshot {
    pub id: CompactorId,
    pub state: CompactorState,
}

// ── CampaignSnapshot ──────────────────────────────────────────────────────────

/// The complete mutable campaign state at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignSnapshot {
    /// The instant all records refer to.
    pub as_of: SimTime,
    pub fields: Vec<FieldSnapshot>,
    pub harvesters: Vec<HarvesterSnapshot>,
    pub tvs: Vec<TvSnapshot>,
    pub silos: Vec<SiloSnapshot>,
    pub silo_accesses: Vec<SapSnapshot>,
    pub compactors: Vec<CompactorSnapshot>,
}

impl CampaignState {
    /// Capture the mutable state as a snapshot at the current instant.
    pub fn to_snapshot(&self) -> CampaignSnapshot {
        CampaignSnapshot {
            as_of: self.now,
            fields: self
                .fields
                .iter()
                .map(|f| FieldSnapshot {
                    id: f.id,
                    remaining_yield_kg: f.remaining_yield_kg,
                    harvested: f.harvested,
                    assigned_harvester: f.assigned_harvester,
                })
                .collect(),
            harvesters: self
                .harvesters
                .iter()
                .map(|h| HarvesterSnapshot {
                    id: h.id,
                    state: h.state,
                    location: h.location,
                    assigned_field: h.assigned_field,
                    turn_queue: h.turn_queue.iter().copied().collect(),
                    active_tv: h.active_tv,
                    waiting_since: h.waiting_since,
                    total_waiting: h.total_waiting,
                })
                .collect(),
            tvs: self
                .tvs
                .iter()
                .map(|tv| TvSnapshot {
                    id: tv.id,
                    state: tv.state,
                    location: tv.location,
                    bunker_kg: tv.bunker_kg,
                    assigned_harvester: tv.assigned_harvester,
                    assigned_sap: tv.assigned_sap,
                    waiting_since: tv.waiting_since,
                    total_waiting: tv.total_waiting,
                })
                .collect(),
            silos: self
                .silos
                .iter()
                .map(|s| SiloSnapshot { id: s.id, stored_kg: s.stored_kg })
                .collect(),
            silo_accesses: self
                .silo_accesses
                .iter()
                .map(|sap| SapSnapshot {
                    id: sap.id,
                    held_kg: sap.held_kg,
                    occupant: sap.occupant,
                    wait_queue: sap.wait_queue.iter().copied().collect(),
                })
                .collect(),
            compactors: self
                .compactors
                .iter()
                .map(|c| CompactorSnapshot { id: c.id, state: c.state })
                .collect(),
        }
    }

    /// Overwrite this state's mutable half from `snap`.
    ///
    /// Record counts must match the campaign exactly, and the resulting
    /// state must pass the full [`audit`][Self::audit]; on any violation the
    /// error is returned *before* the first mutation and `self` is left
    /// untouched.
    pub fn apply_snapshot(&mut self, snap: &CampaignSnapshot) -> ModelResult<()> {
        check_count("field", self.fields.len(), snap.fields.len())?;
        check_count("harvester", self.harvesters.len(), snap.harvesters.len())?;
        check_count("tv", self.tvs.len(), snap.tvs.len())?;
        check_count("silo", self.silos.len(), snap.silos.len())?;
        check_count("silo access", self.silo_accesses.len(), snap.silo_accesses.len())?;
        check_count("compactor", self.compactors.len(), snap.compactors.len())?;

        // Ids must be in range before they are used as indices.
        for rec in &snap.fields {
            if rec.id.index() >= self.fields.len() {
                return Err(ModelError::UnknownField(rec.id));
            }
        }
        for rec in &snap.harvesters {
            if rec.id.index() >= self.harvesters.len() {
                return Err(ModelError::UnknownHarvester(rec.id));
            }
        }
        for rec in &snap.tvs {
            if rec.id.index() >= self.tvs.len() {
                return Err(ModelError::UnknownTv(rec.id));
            }
        }
        for rec in &snap.silos {
            if rec.id.index() >= self.silos.len() {
                return Err(ModelError::IdIndexMismatch { what: "silo", index: rec.id.index() });
            }
        }
        for rec in &snap.silo_accesses {
            if rec.id.index() >= self.silo_accesses.len() {
                return Err(ModelError::UnknownSiloAccess(rec.id));
            }
        }
        for rec in &snap.compactors {
            if rec.id.index() >= self.compactors.len() {
                return Err(ModelError::IdIndexMismatch {
                    what: "compactor",
                    index: rec.id.index(),
                });
            }
        }

        // Dry-run on a copy so a rejected snapshot leaves `self` untouched.
        let mut applied = self.clone();
        applied.apply_unchecked(snap);
        applied.audit()?;

        *self = applied;
        Ok(())
    }

    fn apply_unchecked(&mut self, snap: &CampaignSnapshot) {
        self.now = snap.as_of;
        for rec in &snap.fields {
            let f = &mut self.fields[rec.id.index()];
            f.remaining_yield_kg = rec.remaining_yield_kg;
            f.harvested = rec.harvested;
            f.assigned_harvester = rec.assigned_harvester;
        }
        for rec in &snap.harvesters {
            let h = &mut self.harvesters[rec.id.index()];
            h.state = rec.state;
            h.location = rec.location;
            h.assigned_field = rec.assigned_field;
            h.turn_queue = rec.turn_queue.iter().copied().collect();
            h.active_tv = rec.active_tv;
            h.waiting_since = rec.waiting_since;
            h.total_waiting = rec.total_waiting;
        }
        for rec in &snap.tvs {
            let tv = &mut self.tvs[rec.id.index()];
            tv.state = rec.state;
            tv.location = rec.location;
            tv.bunker_kg = rec.bunker_kg;
            tv.assigned_harvester = rec.assigned_harvester;
            tv.assigned_sap = rec.assigned_sap;
            tv.waiting_since = rec.waiting_since;
            tv.total_waiting = rec.total_waiting;
        }
        for rec in &snap.silos {
            self.silos[rec.id.index()].stored_kg = rec.stored_kg;
        }
        for rec in &snap.silo_accesses {
            let sap = &mut self.silo_accesses[rec.id.index()];
            sap.held_kg = rec.held_kg;
            sap.occupant = rec.occupant;
            sap.wait_queue = rec.wait_queue.iter().copied().collect();
        }
        for rec in &snap.compactors {
            self.compactors[rec.id.index()].state = rec.state;
        }
    }
}

fn check_count(what: &'static str, expected: usize, got: usize) -> ModelResult<()> {
    if expected != got {
        // Ids outside the campaign would panic on index; counts catch the
        // whole class up front with a better message.
        return Err(ModelError::SnapshotCountMismatch { what, expected, got });
    }
    Ok(())
}
