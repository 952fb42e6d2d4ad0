//! Unit tests for the resource model, invariant audit, and snapshots.

use hcp_core::{
    AccessId, DepotId, FieldId, HarvesterId, Location, SapId, SiloId, TvId,
};

use crate::{
    CampaignState, Field, FieldAccess, Harvester, HarvesterState, ModelError, Silo, SiloAccess,
    Tv, TvState,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// One field (1000 kg, one access), one harvester, one TV, one unbounded silo.
fn small_campaign() -> CampaignState {
    let fields = vec![Field::new(FieldId(0), "field_0", 1_000.0, vec![AccessId(0)])];
    let field_accesses = vec![FieldAccess { id: AccessId(0), field: FieldId(0) }];
    let harvesters = vec![Harvester::new(
        HarvesterId(0),
        "harv_0",
        10.0,
        Location::Depot(DepotId(0)),
    )];
    let tvs = vec![Tv::new(TvId(0), "tv_0", 500.0, 50.0, Location::Depot(DepotId(1)))];
    let silos = vec![Silo::new(SiloId(0), "silo_0", None, vec![SapId(0)])];
    let silo_accesses = vec![SiloAccess::unbounded(SapId(0), SiloId(0))];
    CampaignState::new(fields, field_accesses, harvesters, tvs, silos, silo_accesses, vec![])
}

// ── Audit ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod audit {
    use super::*;

    #[test]
    fn fresh_campaign_passes() {
        small_campaign().audit().unwrap();
    }

    #[test]
    fn bunker_over_capacity_rejected() {
        let mut state = small_campaign();
        state.tvs[0].bunker_kg = 500.1;
        assert!(matches!(state.audit(), Err(ModelError::BunkerOutOfRange { .. })));
    }

    #[test]
    fn negative_remaining_yield_rejected() {
        let mut state = small_campaign();
        state.fields[0].remaining_yield_kg = -1.0;
        assert!(matches!(
            state.audit(),
            Err(ModelError::NegativeRemainingYield { .. })
        ));
    }

    #[test]
    fn silo_over_capacity_rejected() {
        let mut state = small_campaign();
        state.silos[0].capacity_kg = Some(100.0);
        state.silos[0].stored_kg = 200.0;
        assert!(matches!(state.audit(), Err(ModelError::SiloOverCapacity { .. })));
    }

    #[test]
    fn one_sided_assignment_rejected() {
        let mut state = small_campaign();
        state.fields[0].assigned_harvester = Some(HarvesterId(0));
        // Harvester does not know about the field.
        assert!(matches!(state.audit(), Err(ModelError::AssignmentMismatch { .. })));
    }

    #[test]
    fn mutual_assignment_passes() {
        let mut state = small_campaign();
        state.fields[0].assigned_harvester = Some(HarvesterId(0));
        state.harvesters[0].assigned_field = Some(FieldId(0));
        state.audit().unwrap();
    }

    #[test]
    fn turn_queue_without_back_reference_rejected() {
        let mut state = small_campaign();
        state.harvesters[0].turn_queue.push_back(TvId(0));
        assert!(matches!(state.audit(), Err(ModelError::TurnQueueMismatch { .. })));
    }

    #[test]
    fn active_tv_must_be_front_and_harvesting() {
        let mut state = small_campaign();
        state.fields[0].assigned_harvester = Some(HarvesterId(0));
        state.harvesters[0].assigned_field = Some(FieldId(0));
        state.harvesters[0].turn_queue.push_back(TvId(0));
        state.tvs[0].assigned_harvester = Some(HarvesterId(0));
        state.harvesters[0].active_tv = Some(TvId(0));

        assert!(matches!(
            state.audit(),
            Err(ModelError::ActiveTvWhileNotHarvesting { .. })
        ));

        state.harvesters[0].state = HarvesterState::Harvesting;
        state.tvs[0].state = TvState::Overloading;
        state.audit().unwrap();
    }
}

// ── Conservation accounting ───────────────────────────────────────────────────

#[cfg(test)]
mod conservation {
    use super::*;

    #[test]
    fn totals_track_every_stage() {
        let mut state = small_campaign();
        assert_eq!(state.total_mass(), 1_000.0);

        // Move 400 kg field → bunker.
        state.fields[0].remaining_yield_kg -= 400.0;
        state.tvs[0].bunker_kg += 400.0;
        assert_eq!(state.mass_in_fields(), 600.0);
        assert_eq!(state.mass_in_bunkers(), 400.0);
        assert_eq!(state.total_mass(), 1_000.0);

        // Move 400 kg bunker → storage.
        state.tvs[0].bunker_kg -= 400.0;
        state.silos[0].stored_kg += 400.0;
        assert_eq!(state.mass_stored(), 400.0);
        assert_eq!(state.total_mass(), 1_000.0);
    }

    #[test]
    fn needs_assistance_follows_field_life_cycle() {
        let mut state = small_campaign();
        assert!(!state.harvester_needs_assistance(HarvesterId(0)));

        state.fields[0].assigned_harvester = Some(HarvesterId(0));
        state.harvesters[0].assigned_field = Some(FieldId(0));
        assert!(state.harvester_needs_assistance(HarvesterId(0)));

        state.fields[0].remaining_yield_kg = 0.0;
        assert!(!state.harvester_needs_assistance(HarvesterId(0)));
    }
}

// ── Snapshots ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod snapshot {
    use super::*;
    use hcp_core::SimTime;

    #[test]
    fn roundtrip_preserves_state() {
        let mut state = small_campaign();
        state.now = SimTime::from_secs(90);
        state.fields[0].remaining_yield_kg = 250.0;
        state.tvs[0].bunker_kg = 300.0;
        state.tvs[0].state = TvState::TravelingToSilo;
        state.tvs[0].location = Location::FieldAccess(AccessId(0));
        state.silos[0].stored_kg = 450.0;

        let snap = state.to_snapshot();
        let mut restored = small_campaign();
        restored.apply_snapshot(&snap).unwrap();

        assert_eq!(restored.now, SimTime::from_secs(90));
        assert_eq!(restored.fields[0].remaining_yield_kg, 250.0);
        assert_eq!(restored.tvs[0].bunker_kg, 300.0);
        assert_eq!(restored.tvs[0].state, TvState::TravelingToSilo);
        assert_eq!(restored.silos[0].stored_kg, 450.0);
        restored.audit().unwrap();
    }

    #[test]
    fn inconsistent_snapshot_rejected_without_mutation() {
        let state = small_campaign();
        let mut snap = state.to_snapshot();
        snap.tvs[0].bunker_kg = 9_999.0; // over capacity

        let mut target = small_campaign();
        let before = target.clone();
        assert!(target.apply_snapshot(&snap).is_err());
        assert_eq!(target, before);
    }

    #[test]
    fn count_mismatch_rejected() {
        let state = small_campaign();
        let mut snap = state.to_snapshot();
        snap.tvs.clear();
        let mut target = small_campaign();
        assert!(matches!(
            target.apply_snapshot(&snap),
            Err(ModelError::SnapshotCountMismatch { what: "tv", .. })
        ));
    }

    #[test]
    fn serde_json_roundtrip() {
        // The snapshot is the on-disk replanning format; it must survive
        // serialization untouched.
        let mut state = small_campaign();
        state.fields[0].remaining_yield_kg = 123.5;
        let snap = state.to_snapshot();

        let json = serde_json::to_string(&snap).unwrap();
        let back: crate::CampaignSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }
}
