//! In-process backend.
//!
//! `MemorySource` behaves like the hosted backend seen through its client:
//! it keeps the table, fans committed changes out to every live sink, and
//! can be switched offline or have its realtime channel dropped. Clones
//! share the same backend, so one clone can act as another writer.

use crate::adapter::{DataSource, EventSink, SourceEvent, Subscription};
use chrono::Utc;
use hireboard_core::{Candidate, CandidateDraft, CandidateId, ChangeEvent, Error, Result, Status};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};
use tracing::debug;
use uuid::Uuid;

#[derive(Default)]
struct Inner {
    table: String,
    rows: Vec<Candidate>,
    sinks: BTreeMap<u64, EventSink>,
    resumes: BTreeMap<String, Vec<u8>>,
    next_sink: u64,
    offline: bool,
    reject_subscriptions: bool,
    /// While set, committed changes are not delivered.
    channel_down: bool,
}

/// Shared in-memory candidate backend.
#[derive(Clone)]
pub struct MemorySource {
    inner: Rc<RefCell<Inner>>,
}

impl Default for MemorySource {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySource {
    /// Creates an empty backend for the `candidates` table.
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Creates a backend holding the given rows.
    pub fn with_records(rows: Vec<Candidate>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                table: "candidates".to_string(),
                rows,
                ..Inner::default()
            })),
        }
    }

    /// Returns the realtime topic sinks are attached to.
    pub fn topic(&self) -> String {
        format!("realtime:{}", self.inner.borrow().table)
    }

    /// Makes every request fail with a transport error.
    pub fn set_offline(&self, offline: bool) {
        self.inner.borrow_mut().offline = offline;
    }

    /// Makes new subscriptions fail while loads and mutations still work.
    pub fn reject_subscriptions(&self, reject: bool) {
        self.inner.borrow_mut().reject_subscriptions = reject;
    }

    /// Drops the realtime channel. Changes committed meanwhile are missed.
    pub fn disconnect(&self, reason: &str) {
        self.inner.borrow_mut().channel_down = true;
        self.broadcast(SourceEvent::Disconnected {
            reason: reason.to_string(),
        });
    }

    /// Restores the realtime channel.
    pub fn reconnect(&self) {
        self.inner.borrow_mut().channel_down = false;
        self.broadcast(SourceEvent::Reconnected);
    }

    /// Number of sinks currently attached.
    pub fn live_subscriptions(&self) -> usize {
        self.inner.borrow().sinks.len()
    }

    /// Snapshot of the stored rows, in storage order.
    pub fn records(&self) -> Vec<Candidate> {
        self.inner.borrow().rows.clone()
    }

    /// Commits an insert from another writer.
    pub fn remote_insert(&self, candidate: Candidate) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.rows.retain(|c| c.id != candidate.id);
            inner.rows.push(candidate.clone());
        }
        self.publish(ChangeEvent::Insert(candidate));
    }

    /// Commits an update from another writer. Unknown ids are ignored.
    pub fn remote_update(&self, candidate: Candidate) {
        let found = {
            let mut inner = self.inner.borrow_mut();
            match inner.rows.iter_mut().find(|c| c.id == candidate.id) {
                Some(row) => {
                    *row = candidate.clone();
                    true
                }
                None => false,
            }
        };
        if found {
            self.publish(ChangeEvent::Update(candidate));
        }
    }

    /// Commits a delete from another writer.
    pub fn remote_delete(&self, id: &CandidateId) {
        if self.remove_row(id) {
            self.publish(ChangeEvent::Delete(id.clone()));
        }
    }

    /// Delivers an event without touching the stored rows.
    ///
    /// Models out-of-order or duplicated delivery.
    pub fn emit(&self, event: ChangeEvent) {
        self.publish(event);
    }

    fn check_online(&self) -> Result<()> {
        if self.inner.borrow().offline {
            Err(Error::transport("backend unreachable"))
        } else {
            Ok(())
        }
    }

    fn remove_row(&self, id: &CandidateId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.rows.len();
        inner.rows.retain(|c| &c.id != id);
        inner.rows.len() != before
    }

    fn publish(&self, event: ChangeEvent) {
        if self.inner.borrow().channel_down {
            debug!(id = %event.id(), "channel down, change not delivered");
            return;
        }
        self.broadcast(SourceEvent::Change(event));
    }

    fn broadcast(&self, event: SourceEvent) {
        // Sinks may call back into the source, so no borrow is held here
        let sinks: Vec<EventSink> = self.inner.borrow().sinks.values().cloned().collect();
        for sink in sinks {
            sink(event.clone());
        }
    }
}

impl DataSource for MemorySource {
    fn load_all(&self) -> Result<Vec<Candidate>> {
        self.check_online()?;
        let mut rows = self.records();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(rows)
    }

    fn subscribe(&self, sink: EventSink) -> Result<Subscription> {
        self.check_online()?;
        let topic = self.topic();
        let key = {
            let mut inner = self.inner.borrow_mut();
            if inner.reject_subscriptions {
                return Err(Error::transport(format!("join {} rejected", topic)));
            }
            let key = inner.next_sink;
            inner.next_sink += 1;
            inner.sinks.insert(key, sink);
            key
        };

        let weak: Weak<RefCell<Inner>> = Rc::downgrade(&self.inner);
        Ok(Subscription::new(topic, move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().sinks.remove(&key);
            }
        }))
    }

    fn update_status(&self, id: &CandidateId, status: Status) -> Result<()> {
        self.check_online()?;
        let updated = {
            let mut inner = self.inner.borrow_mut();
            let row = inner
                .rows
                .iter_mut()
                .find(|c| &c.id == id)
                .ok_or_else(|| Error::not_found(id.as_str()))?;
            row.status = Some(status);
            row.clone()
        };
        self.publish(ChangeEvent::Update(updated));
        Ok(())
    }

    fn delete(&self, id: &CandidateId) -> Result<()> {
        self.check_online()?;
        if !self.remove_row(id) {
            return Err(Error::not_found(id.as_str()));
        }
        self.publish(ChangeEvent::Delete(id.clone()));
        Ok(())
    }

    fn create(&self, draft: CandidateDraft) -> Result<()> {
        self.check_online()?;
        draft.validate()?;
        let candidate = draft.into_candidate(CandidateId::new(Uuid::new_v4().to_string()), Utc::now());
        self.inner.borrow_mut().rows.push(candidate.clone());
        self.publish(ChangeEvent::Insert(candidate));
        Ok(())
    }

    fn upload_resume(&self, path: &str, bytes: Vec<u8>) -> Result<String> {
        self.check_online()?;
        let mut inner = self.inner.borrow_mut();
        if inner.resumes.contains_key(path) {
            return Err(Error::transport_status(409, format!("{} already exists", path)));
        }
        inner.resumes.insert(path.to_string(), bytes);
        Ok(format!("memory://resumes/{}", path))
    }
}
