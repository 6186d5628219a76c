//! Reconciled candidate store.
//!
//! `CandidateStore` holds the authoritative in-memory snapshot built from
//! the last initial load plus every change event observed since, applied
//! exactly once each in arrival order.
//!
//! # Rules
//!
//! - `replace_all` swaps in a freshly loaded collection.
//! - `Insert` adds the record; an insert for a present identifier replaces
//!   its contents (last write by arrival wins, not by timestamp).
//! - `Update` replaces a present record and is dropped for unknown ids.
//! - `Delete` removes a present record and is a no-op otherwise.
//!
//! The store never invents, merges, or discards records on its own.

use crate::change_set::{Applied, StoreChange};
use crate::subscription::{SubscriptionId, SubscriptionManager};
use alloc::vec::Vec;
use hashbrown::HashMap;
use hireboard_core::{Candidate, CandidateId, ChangeEvent};

struct Slot {
    /// Arrival sequence of the identifier, kept across content replacement.
    arrival: u64,
    candidate: Candidate,
}

/// Ordered-by-arrival mapping from identifier to candidate.
pub struct CandidateStore {
    slots: HashMap<CandidateId, Slot>,
    next_arrival: u64,
    /// Bumped on every effective change
    version: u64,
    listeners: SubscriptionManager<StoreChange>,
}

impl Default for CandidateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CandidateStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            next_arrival: 0,
            version: 0,
            listeners: SubscriptionManager::new(),
        }
    }

    /// Creates a store pre-populated with an initial load.
    pub fn with_records(records: Vec<Candidate>) -> Self {
        let mut store = Self::new();
        store.load(records);
        store
    }

    /// Replaces the entire collection with a fetched sequence.
    ///
    /// Duplicate identifiers inside the sequence collapse onto the first
    /// position, carrying the contents of the last occurrence.
    pub fn replace_all(&mut self, records: Vec<Candidate>) {
        self.load(records);
        self.version += 1;

        let change = StoreChange::Reloaded {
            ids: self.arrival_order().into_iter().map(|c| c.id.clone()).collect(),
            version: self.version,
        };
        self.listeners.notify_all(&change);
    }

    fn load(&mut self, records: Vec<Candidate>) {
        self.slots.clear();
        self.next_arrival = 0;
        for candidate in records {
            self.upsert(candidate);
        }
    }

    /// Applies one change event and notifies listeners if it was effective.
    pub fn apply(&mut self, event: ChangeEvent) -> Applied {
        let id = event.id().clone();
        let applied = match event {
            ChangeEvent::Insert(candidate) => {
                if self.upsert(candidate) {
                    Applied::Replaced
                } else {
                    Applied::Inserted
                }
            }
            ChangeEvent::Update(candidate) => match self.slots.get_mut(&candidate.id) {
                Some(slot) => {
                    slot.candidate = candidate;
                    Applied::Updated
                }
                None => Applied::Ignored,
            },
            ChangeEvent::Delete(id) => {
                if self.slots.remove(&id).is_some() {
                    Applied::Removed
                } else {
                    Applied::Ignored
                }
            }
        };

        if applied.is_effective() {
            self.version += 1;
            let change = StoreChange::Record {
                id,
                applied,
                version: self.version,
            };
            self.listeners.notify_all(&change);
        }
        applied
    }

    /// Applies a batch of events in order, returning each outcome.
    pub fn apply_all<I>(&mut self, events: I) -> Vec<Applied>
    where
        I: IntoIterator<Item = ChangeEvent>,
    {
        events.into_iter().map(|e| self.apply(e)).collect()
    }

    /// Inserts or replaces contents. Returns true if the id was present.
    fn upsert(&mut self, candidate: Candidate) -> bool {
        match self.slots.get_mut(&candidate.id) {
            Some(slot) => {
                slot.candidate = candidate;
                true
            }
            None => {
                let arrival = self.next_arrival;
                self.next_arrival += 1;
                self.slots.insert(candidate.id.clone(), Slot { arrival, candidate });
                false
            }
        }
    }

    /// Returns the candidate with the given identifier.
    pub fn get(&self, id: &CandidateId) -> Option<&Candidate> {
        self.slots.get(id).map(|s| &s.candidate)
    }

    /// Returns true if the identifier is present.
    #[inline]
    pub fn contains(&self, id: &CandidateId) -> bool {
        self.slots.contains_key(id)
    }

    /// Returns the number of candidates.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the store is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the current version.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Iterates candidates in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.slots.values().map(|s| &s.candidate)
    }

    /// Returns candidates in arrival order.
    pub fn arrival_order(&self) -> Vec<&Candidate> {
        let mut slots: Vec<&Slot> = self.slots.values().collect();
        slots.sort_unstable_by_key(|s| s.arrival);
        slots.into_iter().map(|s| &s.candidate).collect()
    }

    /// Subscribes to effective store changes.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&StoreChange) + 'static,
    {
        self.listeners.subscribe(callback)
    }

    /// Removes a store listener.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }
}
