//! Change notifications emitted by the candidate store.
//!
//! A `StoreChange` describes one effective modification of the store,
//! either a full reload or the outcome of a single change event.

use alloc::vec::Vec;
use hireboard_core::CandidateId;

/// Outcome of applying one change event to the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Applied {
    /// A new identifier was added.
    Inserted,
    /// An insert arrived for an identifier already present; contents replaced.
    Replaced,
    /// An update replaced an existing record.
    Updated,
    /// A delete removed an existing record.
    Removed,
    /// Update or delete for an unknown identifier; nothing changed.
    Ignored,
}

impl Applied {
    /// Returns true if the store contents changed.
    #[inline]
    pub fn is_effective(self) -> bool {
        !matches!(self, Applied::Ignored)
    }
}

/// An effective change of the store, delivered to store listeners.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreChange {
    /// The whole collection was replaced by an initial load or resync.
    Reloaded {
        /// Identifiers of the new collection, in load order.
        ids: Vec<CandidateId>,
        version: u64,
    },
    /// A single record changed.
    Record {
        id: CandidateId,
        applied: Applied,
        version: u64,
    },
}

impl StoreChange {
    /// Returns the store version after this change.
    pub fn version(&self) -> u64 {
        match self {
            StoreChange::Reloaded { version, .. } | StoreChange::Record { version, .. } => *version,
        }
    }
}
