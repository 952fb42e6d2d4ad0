//! `CampaignState` — the mutable aggregate of the whole campaign world.

use hcp_core::{
    AccessId, CompactorId, FieldId, HarvesterId, SapId, SiloId, SimTime, TvId,
};

use crate::error::{ModelError, ModelResult};
use crate::field::{Field, FieldAccess};
use crate::machine::{Harvester, HarvesterState, Tv, TvState};
use crate::silo::{Compactor, Silo, SiloAccess};

/// Mass comparison tolerance [kg].  Yield amounts are sums and products of
/// f64 rates and durations; anything below this is treated as zero.
pub const MASS_EPS_KG: f64 = 1e-6;

/// The world at one simulated instant.
///
/// All entity records live in dense `Vec`s indexed by their typed ids, so
/// `state.fields[id.index()]` is the record for `id`.  The scheduling engine
/// is the exclusive mutator; it freezes the state (by value) once planning
/// completes or fails.  Holding the state in an explicit object — never a
/// module-wide singleton — lets multiple campaigns be constructed and
/// replanned independently in one process.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignState {
    pub fields: Vec<Field>,
    pub field_accesses: Vec<FieldAccess>,
    pub harvesters: Vec<Harvester>,
    pub tvs: Vec<Tv>,
    pub silos: Vec<Silo>,
    pub silo_accesses: Vec<SiloAccess>,
    pub compactors: Vec<Compactor>,

    /// Current simulated time.  Monotonically advanced by the engine.
    pub now: SimTime,
}

impl CampaignState {
    /// Assemble a campaign at `SimTime::ZERO`.
    ///
    /// Entity ids must equal their index in the respective `Vec`; this is
    /// checked by [`audit`][Self::audit], which callers should run once after
    /// assembly.
    pub fn new(
        fields: Vec<Field>,
        field_accesses: Vec<FieldAccess>,
        harvesters: Vec<Harvester>,
        tvs: Vec<Tv>,
        silos: Vec<Silo>,
        silo_accesses: Vec<SiloAccess>,
        compactors: Vec<Compactor>,
    ) -> Self {
        Self {
            fields,
            field_accesses,
            harvesters,
            tvs,
            silos,
            silo_accesses,
            compactors,
            now: SimTime::ZERO,
        }
    }

    // ── Typed accessors ───────────────────────────────────────────────────

    #[inline]
    pub fn field(&self, id: FieldId) -> &Field {
        &self.fields[id.index()]
    }

    #[inline]
    pub fn field_mut(&mut self, id: FieldId) -> &mut Field {
        &mut self.fields[id.index()]
    }

    #[inline]
    pub fn field_access(&self, id: AccessId) -> &FieldAccess {
        &self.field_accesses[id.index()]
    }

    #[inline]
    pub fn harvester(&self, id: HarvesterId) -> &Harvester {
        &self.harvesters[id.index()]
    }

    #[inline]
    pub fn harvester_mut(&mut self, id: HarvesterId) -> &mut Harvester {
        &mut self.harvesters[id.index()]
    }

    #[inline]
    pub fn tv(&self, id: TvId) -> &Tv {
        &self.tvs[id.index()]
    }

    #[inline]
    pub fn tv_mut(&mut self, id: TvId) -> &mut Tv {
        &mut self.tvs[id.index()]
    }

    #[inline]
    pub fn silo(&self, id: SiloId) -> &Silo {
        &self.silos[id.index()]
    }

    #[inline]
    pub fn silo_mut(&mut self, id: SiloId) -> &mut Silo {
        &mut self.silos[id.index()]
    }

    #[inline]
    pub fn silo_access(&self, id: SapId) -> &SiloAccess {
        &self.silo_accesses[id.index()]
    }

    #[inline]
    pub fn silo_access_mut(&mut self, id: SapId) -> &mut SiloAccess {
        &mut self.silo_accesses[id.index()]
    }

    #[inline]
    pub fn compactor(&self, id: CompactorId) -> &Compactor {
        &self.compactors[id.index()]
    }

    #[inline]
    pub fn compactor_mut(&mut self, id: CompactorId) -> &mut Compactor {
        &mut self.compactors[id.index()]
    }

    // ── Campaign-level queries ────────────────────────────────────────────

    /// Fields with yield left and no harvester assigned, in id order.
    pub fn unassigned_unfinished_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields
            .iter()
            .filter(|f| f.is_unfinished() && f.assigned_harvester.is_none())
    }

    /// `true` if `harv` accepts transport vehicles into its turn queue:
    /// it owns a field that still has yield to move.  Idle harvesters do not
    /// accept queue joins.
    pub fn harvester_needs_assistance(&self, harv: HarvesterId) -> bool {
        let h = self.harvester(harv);
        match h.assigned_field {
            Some(field) => self.field(field).is_unfinished(),
            None => false,
        }
    }

    /// `true` once every field is harvested.
    pub fn all_fields_harvested(&self) -> bool {
        self.fields.iter().all(|f| f.harvested)
    }

    /// `true` once every TV bunker is empty.
    pub fn all_bunkers_empty(&self) -> bool {
        self.tvs.iter().all(|tv| !tv.is_loaded())
    }

    /// `true` once no SAP holds un-swept yield (extended model).
    pub fn all_saps_cleared(&self) -> bool {
        self.silo_accesses
            .iter()
            .all(|sap| sap.held_kg <= MASS_EPS_KG)
    }

    // ── Mass-balance totals ───────────────────────────────────────────────

    /// Yield still standing in fields [kg].
    pub fn mass_in_fields(&self) -> f64 {
        self.fields.iter().map(|f| f.remaining_yield_kg).sum()
    }

    /// Yield currently carried in TV bunkers [kg].
    pub fn mass_in_bunkers(&self) -> f64 {
        self.tvs.iter().map(|tv| tv.bunker_kg).sum()
    }

    /// Yield held at SAPs awaiting a sweep [kg] (extended model).
    pub fn mass_at_saps(&self) -> f64 {
        self.silo_accesses.iter().map(|s| s.held_kg).sum()
    }

    /// Yield in silo storage [kg].
    pub fn mass_stored(&self) -> f64 {
        self.silos.iter().map(|s| s.stored_kg).sum()
    }

    /// Total yield mass in the system [kg].  Conserved over the whole run:
    /// mass only moves between fields, bunkers, SAPs, and storage.
    pub fn total_mass(&self) -> f64 {
        self.mass_in_fields() + self.mass_in_bunkers() + self.mass_at_saps() + self.mass_stored()
    }

    // ── Invariant audit ───────────────────────────────────────────────────

    /// Check every hard invariant of the resource model.
    ///
    /// Used on assembly, after applying a snapshot, and by tests after every
    /// engine event.  Returns the first violation found.
    pub fn audit(&self) -> ModelResult<()> {
        self.audit_ids()?;
        self.audit_masses()?;
        self.audit_assignments()?;
        Ok(())
    }

    fn audit_ids(&self) -> ModelResult<()> {
        for (i, f) in self.fields.iter().enumerate() {
            if f.id.index() != i {
                return Err(ModelError::IdIndexMismatch { what: "field", index: i });
            }
            if f.access_points.is_empty() {
                return Err(ModelError::FieldWithoutAccess(f.id));
            }
            for &ap in &f.access_points {
                if ap.index() >= self.field_accesses.len() {
                    return Err(ModelError::UnknownFieldAccess(ap));
                }
                if self.field_access(ap).field != f.id {
                    return Err(ModelError::AccessParentMismatch { access: ap, field: f.id });
                }
            }
        }
        for (i, s) in self.silos.iter().enumerate() {
            if s.id.index() != i {
                return Err(ModelError::IdIndexMismatch { what: "silo", index: i });
            }
            if s.access_points.is_empty() {
                return Err(ModelError::SiloWithoutAccess(s.id));
            }
            for &sap in &s.access_points {
                if sap.index() >= self.silo_accesses.len() {
                    return Err(ModelError::UnknownSiloAccess(sap));
                }
            }
        }
        for (i, h) in self.harvesters.iter().enumerate() {
            if h.id.index() != i {
                return Err(ModelError::IdIndexMismatch { what: "harvester", index: i });
            }
        }
        for (i, tv) in self.tvs.iter().enumerate() {
            if tv.id.index() != i {
                return Err(ModelError::IdIndexMismatch { what: "tv", index: i });
            }
        }
        for (i, c) in self.compactors.iter().enumerate() {
            if c.id.index() != i {
                return Err(ModelError::IdIndexMismatch { what: "compactor", index: i });
            }
        }
        Ok(())
    }

    fn audit_masses(&self) -> ModelResult<()> {
        for f in &self.fields {
            if f.remaining_yield_kg < -MASS_EPS_KG {
                return Err(ModelError::NegativeRemainingYield {
                    field: f.id,
                    mass_kg: f.remaining_yield_kg,
                });
            }
            if f.remaining_yield_kg > f.total_yield_kg + MASS_EPS_KG {
                return Err(ModelError::RemainingExceedsTotal {
                    field: f.id,
                    remaining_kg: f.remaining_yield_kg,
                    total_kg: f.total_yield_kg,
                });
            }
        }
        for tv in &self.tvs {
            if tv.bunker_kg < -MASS_EPS_KG || tv.bunker_kg > tv.capacity_kg + MASS_EPS_KG {
                return Err(ModelError::BunkerOutOfRange {
                    tv: tv.id,
                    mass_kg: tv.bunker_kg,
                    capacity_kg: tv.capacity_kg,
                });
            }
        }
        for s in &self.silos {
            if let Some(cap) = s.capacity_kg {
                if s.stored_kg > cap + MASS_EPS_KG {
                    return Err(ModelError::SiloOverCapacity {
                        silo: s.id,
                        stored_kg: s.stored_kg,
                        capacity_kg: cap,
                    });
                }
            }
        }
        for sap in &self.silo_accesses {
            if let Some(cap) = sap.capacity_kg {
                if sap.held_kg > cap + MASS_EPS_KG {
                    return Err(ModelError::SapOverCapacity {
                        sap: sap.id,
                        held_kg: sap.held_kg,
                        capacity_kg: cap,
                    });
                }
            }
        }
        Ok(())
    }

    fn audit_assignments(&self) -> ModelResult<()> {
        // Field ↔ harvester assignment must be mutual and exclusive.
        for f in &self.fields {
            if let Some(h) = f.assigned_harvester {
                if h.index() >= self.harvesters.len() {
                    return Err(ModelError::UnknownHarvester(h));
                }
                if self.harvester(h).assigned_field != Some(f.id) {
                    return Err(ModelError::AssignmentMismatch { field: f.id, harvester: h });
                }
            }
        }
        for h in &self.harvesters {
            if let Some(f) = h.assigned_field {
                if f.index() >= self.fields.len() {
                    return Err(ModelError::UnknownField(f));
                }
                if self.field(f).assigned_harvester != Some(h.id) {
                    return Err(ModelError::AssignmentMismatch { field: f, harvester: h.id });
                }
            }

            // The active TV must be the queue front, and only a harvesting
            // harvester may have one.
            if let Some(active) = h.active_tv {
                if h.front_tv() != Some(active) {
                    return Err(ModelError::ActiveTvNotAtFront { harvester: h.id, tv: active });
                }
                if h.state != HarvesterState::Harvesting {
                    return Err(ModelError::ActiveTvWhileNotHarvesting { harvester: h.id });
                }
            }

            for &tv in &h.turn_queue {
                if tv.index() >= self.tvs.len() {
                    return Err(ModelError::UnknownTv(tv));
                }
                if self.tv(tv).assigned_harvester != Some(h.id) {
                    return Err(ModelError::TurnQueueMismatch { harvester: h.id, tv });
                }
            }
        }
        for tv in &self.tvs {
            if let Some(h) = tv.assigned_harvester {
                if h.index() >= self.harvesters.len() {
                    return Err(ModelError::UnknownHarvester(h));
                }
                if !self.harvester(h).turn_queue.contains(&tv.id) {
                    return Err(ModelError::TurnQueueMismatch { harvester: h, tv: tv.id });
                }
            }
            if tv.state == TvState::Overloading {
                let h = tv
                    .assigned_harvester
                    .ok_or(ModelError::OverloadingWithoutHarvester(tv.id))?;
                if self.harvester(h).active_tv != Some(tv.id) {
                    return Err(ModelError::OverloadingNotActive { harvester: h, tv: tv.id });
                }
            }
        }
        Ok(())
    }
}
