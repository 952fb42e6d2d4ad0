//! `hcp-core` — foundational types for the harvest campaign planner.
//!
//! This crate is a dependency of every other `hcp-*` crate.  It intentionally
//! has no `hcp-*` dependencies and no required external ones (only optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`ids`]      | `FieldId`, `AccessId`, `HarvesterId`, `TvId`, `SiloId`, … |
//! | [`time`]     | `SimTime`, `SimDuration` (integer milliseconds)           |
//! | [`location`] | `Location`, `AgentKind`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod ids;
pub mod location;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use ids::{AccessId, CompactorId, DepotId, FieldId, HarvesterId, SapId, SiloId, TvId};
pub use location::{AgentKind, Location};
pub use time::{SimDuration, SimTime};
