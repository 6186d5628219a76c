//! The data source contract.
//!
//! A `DataSource` wraps the hosted backend: bulk load, a live change
//! stream, and the mutations the candidate table issues. Everything is
//! single-threaded; sinks are called on the caller's thread.

use hireboard_core::{Candidate, CandidateDraft, CandidateId, ChangeEvent, Result, Status};
use std::fmt;
use std::rc::Rc;

/// Something delivered on a live subscription.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceEvent {
    /// A committed insert, update or delete.
    Change(ChangeEvent),
    /// The channel dropped; events until `Reconnected` are lost.
    Disconnected { reason: String },
    /// The channel is live again. Missed events are not replayed.
    Reconnected,
}

/// Receiver of subscription events.
pub type EventSink = Rc<dyn Fn(SourceEvent)>;

/// Handle to a live subscription.
///
/// Releasing stops delivery and frees the underlying channel. Release
/// happens exactly once: on `release()`, or on drop otherwise.
pub struct Subscription {
    topic: String,
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Creates a handle that runs `release` when released.
    pub fn new<F>(topic: impl Into<String>, release: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Self {
            topic: topic.into(),
            release: Some(Box::new(release)),
        }
    }

    /// Returns the channel topic.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Returns true until the handle is released.
    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    /// Releases the subscription now.
    pub fn release(mut self) {
        self.release_once();
    }

    fn release_once(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_once();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("topic", &self.topic)
            .field("active", &self.is_active())
            .finish()
    }
}

/// Capability contract of the hosted backend.
pub trait DataSource {
    /// Fetches the full collection, newest first.
    fn load_all(&self) -> Result<Vec<Candidate>>;

    /// Starts delivering change events to `sink`.
    fn subscribe(&self, sink: EventSink) -> Result<Subscription>;

    /// Requests a status change. The outcome arrives as a change event.
    fn update_status(&self, id: &CandidateId, status: Status) -> Result<()>;

    /// Requests removal. The outcome arrives as a change event.
    fn delete(&self, id: &CandidateId) -> Result<()>;

    /// Requests creation of a new candidate from a validated draft.
    fn create(&self, draft: CandidateDraft) -> Result<()>;

    /// Stores a CV under `path` and returns its public URL.
    fn upload_resume(&self, path: &str, bytes: Vec<u8>) -> Result<String>;
}

impl<T: DataSource + ?Sized> DataSource for Rc<T> {
    fn load_all(&self) -> Result<Vec<Candidate>> {
        (**self).load_all()
    }

    fn subscribe(&self, sink: EventSink) -> Result<Subscription> {
        (**self).subscribe(sink)
    }

    fn update_status(&self, id: &CandidateId, status: Status) -> Result<()> {
        (**self).update_status(id, status)
    }

    fn delete(&self, id: &CandidateId) -> Result<()> {
        (**self).delete(id)
    }

    fn create(&self, draft: CandidateDraft) -> Result<()> {
        (**self).create(draft)
    }

    fn upload_resume(&self, path: &str, bytes: Vec<u8>) -> Result<String> {
        (**self).upload_resume(path, bytes)
    }
}
