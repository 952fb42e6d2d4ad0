//! `hcp-model` — the resource model and campaign state of the harvest
//! campaign planner.
//!
//! # What lives here
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`field`]    | `Field`, `FieldAccess`                                  |
//! | [`machine`]  | `Harvester`, `Tv` and their state enums                 |
//! | [`silo`]     | `Silo`, `SiloAccess`, `Compactor`                       |
//! | [`campaign`] | `CampaignState` — the mutable aggregate                 |
//! | [`snapshot`] | `CampaignSnapshot` — replanning input/output records    |
//! | [`error`]    | `ModelError`, `ModelResult`                             |
//!
//! All entity records live in dense `Vec`s inside [`CampaignState`], indexed
//! by their typed ids.  The scheduling engine (`hcp-engine`) is the only
//! mutator; everything here is plain state plus invariant checks.

pub mod campaign;
pub mod error;
pub mod field;
pub mod machine;
pub mod silo;
pub mod snapshot;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use campaign::{CampaignState, MASS_EPS_KG};
pub use error::{ModelError, ModelResult};
pub use field::{Field, FieldAccess};
pub use machine::{Harvester, HarvesterState, Tv, TvState};
pub use silo::{Compactor, CompactorState, Silo, SiloAccess};
pub use snapshot::{
    CampaignSnapshot, CompactorSnapshot, FieldSnapshot, HarvesterSnapshot, SapSnapshot,
    SiloSnapshot, TvSnapshot,
};
