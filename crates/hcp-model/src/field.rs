//! Fields and field access points.

use hcp_core::{AccessId, FieldId, HarvesterId};

// ── Field ─────────────────────────────────────────────────────────────────────

/// One silage-maize field.
///
/// Created at campaign load and never destroyed during a run.  The remaining
/// yield is decremented only by overload transitions of the harvester
/// currently assigned to the field; the `harvested` flag is set by the
/// scheduling engine when the remaining yield reaches zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub id: FieldId,

    /// Human-readable label for plan output.
    pub name: String,

    /// Yield mass at campaign start [kg].
    pub total_yield_kg: f64,

    /// Yield mass not yet transferred to a transport vehicle [kg].
    /// Invariant: `0 <= remaining_yield_kg <= total_yield_kg`.
    pub remaining_yield_kg: f64,

    /// Access points connecting this field to the road network, in the order
    /// given by the campaign data.  Every field has at least one.
    pub access_points: Vec<AccessId>,

    /// Set once the field is fully harvested and its harvester has exited.
    pub harvested: bool,

    /// The harvester currently owning this field.  Exactly one harvester may
    /// be assigned at a time; reassignment requires release first.
    pub assigned_harvester: Option<HarvesterId>,
}

impl Field {
    /// A freshly loaded, unharvested and unassigned field.
    pub fn new(
        id: FieldId,
        name: impl Into<String>,
        total_yield_kg: f64,
        access_points: Vec<AccessId>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            total_yield_kg,
            remaining_yield_kg: total_yield_kg,
            access_points,
            harvested: false,
            assigned_harvester: None,
        }
    }

    /// `true` while any yield remains to be transferred off this field.
    #[inline]
    pub fn is_unfinished(&self) -> bool {
        !self.harvested && self.remaining_yield_kg > crate::MASS_EPS_KG
    }
}

// ── FieldAccess ───────────────────────────────────────────────────────────────

/// A field entry/exit point.  Immutable; transit durations to and from it
/// live in the transit oracle, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldAccess {
    pub id: AccessId,
    /// The field this access point belongs to.
    pub field: FieldId,
}
