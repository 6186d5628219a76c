//! Change events reported by the backend's realtime channel.

use crate::candidate::{Candidate, CandidateId};

/// Kind of a change event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// A notification that a candidate was inserted, updated, or deleted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChangeEvent {
    Insert(Candidate),
    Update(Candidate),
    Delete(CandidateId),
}

impl ChangeEvent {
    /// Returns the kind of this event.
    pub fn kind(&self) -> ChangeKind {
        match self {
            ChangeEvent::Insert(_) => ChangeKind::Insert,
            ChangeEvent::Update(_) => ChangeKind::Update,
            ChangeEvent::Delete(_) => ChangeKind::Delete,
        }
    }

    /// Returns the identifier the event refers to.
    pub fn id(&self) -> &CandidateId {
        match self {
            ChangeEvent::Insert(c) | ChangeEvent::Update(c) => &c.id,
            ChangeEvent::Delete(id) => id,
        }
    }
}
