//! Model/snapshot error type.
//!
//! One enum covers both the live-state audit and snapshot validation: a
//! snapshot is rejected for exactly the violations that would make the live
//! state inconsistent.

use thiserror::Error;

use hcp_core::{AccessId, FieldId, HarvesterId, SapId, SiloId, TvId};

/// A violated hard invariant of the resource model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{what} record at index {index} has a mismatching id")]
    IdIndexMismatch { what: &'static str, index: usize },

    #[error("field {0} has no access points")]
    FieldWithoutAccess(FieldId),

    #[error("silo {0} has no access points")]
    SiloWithoutAccess(SiloId),

    #[error("unknown field {0}")]
    UnknownField(FieldId),

    #[error("unknown field access {0}")]
    UnknownFieldAccess(AccessId),

    #[error("unknown harvester {0}")]
    UnknownHarvester(HarvesterId),

    #[error("unknown tv {0}")]
    UnknownTv(TvId),

    #[error("unknown silo access {0}")]
    UnknownSiloAccess(SapId),

    #[error("access {access} does not belong to field {field}")]
    AccessParentMismatch { access: AccessId, field: FieldId },

    #[error("field {field} has {mass_kg} kg remaining yield (negative)")]
    NegativeRemainingYield { field: FieldId, mass_kg: f64 },

    #[error("field {field} remaining yield {remaining_kg} kg exceeds total {total_kg} kg")]
    RemainingExceedsTotal { field: FieldId, remaining_kg: f64, total_kg: f64 },

    #[error("tv {tv} bunker mass {mass_kg} kg outside [0, {capacity_kg}] kg")]
    BunkerOutOfRange { tv: TvId, mass_kg: f64, capacity_kg: f64 },

    #[error("silo {silo} stores {stored_kg} kg, over its {capacity_kg} kg capacity")]
    SiloOverCapacity { silo: SiloId, stored_kg: f64, capacity_kg: f64 },

    #[error("silo access {sap} holds {held_kg} kg, over its {capacity_kg} kg capacity")]
    SapOverCapacity { sap: SapId, held_kg: f64, capacity_kg: f64 },

    #[error("field {field} and harvester {harvester} disagree on their assignment")]
    AssignmentMismatch { field: FieldId, harvester: HarvesterId },

    #[error("harvester {harvester} and tv {tv} disagree on the turn queue")]
    TurnQueueMismatch { harvester: HarvesterId, tv: TvId },

    #[error("harvester {harvester} has active tv {tv} which is not the queue front")]
    ActiveTvNotAtFront { harvester: HarvesterId, tv: TvId },

    #[error("harvester {harvester} has an active tv but is not harvesting")]
    ActiveTvWhileNotHarvesting { harvester: HarvesterId },

    #[error("tv {0} is overloading but assigned to no harvester")]
    OverloadingWithoutHarvester(TvId),

    #[error("tv {tv} is overloading but is not harvester {harvester}'s active tv")]
    OverloadingNotActive { harvester: HarvesterId, tv: TvId },

    #[error("snapshot has {got} {what} records, campaign has {expected}")]
    SnapshotCountMismatch { what: &'static str, expected: usize, got: usize },
}

/// Shorthand result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
