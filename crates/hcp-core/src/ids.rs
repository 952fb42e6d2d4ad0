//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub` to allow
//! direct indexing into the dense entity `Vec`s via `id.0 as usize`, but
//! callers should prefer the `.index()` helpers for clarity.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID" — equivalent to `u32::MAX`.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a field in campaign storage.
    pub struct FieldId(u32);
}

typed_id! {
    /// Index of a field access point.  Access points are numbered globally
    /// across all fields, not per field.
    pub struct AccessId(u32);
}

typed_id! {
    /// Index of a harvester.
    pub struct HarvesterId(u32);
}

typed_id! {
    /// Index of a transport vehicle.
    pub struct TvId(u32);
}

typed_id! {
    /// Index of a silo.
    pub struct SiloId(u32);
}

typed_id! {
    /// Index of a silo access/unloading point (SAP).  Numbered globally
    /// across all silos.
    pub struct SapId(u32);
}

typed_id! {
    /// Index of a compacting machine (extended silo model).
    pub struct CompactorId(u32);
}

typed_id! {
    /// Index of a machine initial location (a yard or road point where a
    /// machine parks before the campaign starts).
    pub struct DepotId(u32);
}
