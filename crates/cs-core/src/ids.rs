//! Strongly typed identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys.  The
//! inner integer is `pub` to allow direct indexing via `id.0 as usize`, but
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
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
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
    /// Zero-based truck number.  Trucks are created in ascending id order.
    pub struct TruckId(u32);
}

typed_id! {
    /// Slot of a process inside the scheduler.  Assigned in spawn order.
    pub struct ProcessId(u32);
}

impl TruckId {
    /// Human-facing fleet label, numbered from 1 (`LKW-1`, `LKW-2`, …).
    pub fn label(self) -> String {
        format!("LKW-{}", self.0 + 1)
    }
}

// ── EntityId ──────────────────────────────────────────────────────────────────

/// The simulated entity a process stands for.
///
/// Lifecycle events are keyed by `EntityId` rather than `ProcessId` so that
/// consumers never need to know the scheduler's slot layout.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityId {
    Signal,
    Truck(TruckId),
}

impl EntityId {
    pub fn truck(self) -> Option<TruckId> {
        match self {
            EntityId::Truck(id) => Some(id),
            EntityId::Signal => None,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Signal => f.write_str("signal"),
            EntityId::Truck(id) => f.write_str(&id.label()),
        }
    }
}
