//! Hireboard Core - Candidate record types shared by every Hireboard crate.
//!
//! This crate provides:
//!
//! - `Candidate`: one candidate application as reported by the backend
//! - `CandidateId`: opaque, stable primary identifier
//! - `Status`: the hiring pipeline stage of a candidate
//! - `ChangeEvent`: an insert/update/delete notification from the backend
//! - `CandidateDraft`: the validated input of the add-candidate flow
//! - `Error`: error taxonomy for all Hireboard operations

#![no_std]

extern crate alloc;

pub mod candidate;
pub mod error;
pub mod event;

pub use candidate::{Candidate, CandidateDraft, CandidateId, Status, Timestamp};
pub use error::{Error, Result};
pub use event::{ChangeEvent, ChangeKind};
