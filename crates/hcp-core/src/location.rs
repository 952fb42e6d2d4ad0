//! The location taxonomy shared by all planner crates.
//!
//! The planner never inspects geometry: a `Location` is an opaque label that
//! transit oracles map to travel durations.  The four variants cover every
//! place a campaign machine can be:
//!
//! | Variant         | Meaning                                              |
//! |-----------------|------------------------------------------------------|
//! | `Depot`         | A machine's initial parking location                 |
//! | `FieldAccess`   | A field entry/exit point on the road network         |
//! | `Field`         | The in-field overload-start location of a field      |
//! | `SiloAccess`    | A silo unloading point (SAP)                         |

use std::fmt;

use crate::ids::{AccessId, DepotId, FieldId, SapId};

// ── Location ──────────────────────────────────────────────────────────────────

/// A place a machine can be at or travel to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Location {
    /// A machine initial/parking location.
    Depot(DepotId),
    /// A field access point (entry or exit).
    FieldAccess(AccessId),
    /// Inside a field, at the overload-start location.
    Field(FieldId),
    /// A silo access/unloading point.
    SiloAccess(SapId),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Depot(id)       => write!(f, "depot_{}", id.0),
            Location::FieldAccess(id) => write!(f, "field_access_{}", id.0),
            Location::Field(id)       => write!(f, "field_{}", id.0),
            Location::SiloAccess(id)  => write!(f, "silo_access_{}", id.0),
        }
    }
}

// ── AgentKind ─────────────────────────────────────────────────────────────────

/// Which kind of machine is travelling.  Transit oracles may return different
/// durations per kind (harvesters are slower on the road than transport
/// vehicles).
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentKind {
    Harvester,
    Transport,
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentKind::Harvester => write!(f, "harvester"),
            AgentKind::Transport => write!(f, "transport"),
        }
    }
}
