//! Hireboard Session - The live candidate table.
//!
//! `CandidateSession` ties a [`DataSource`](hireboard_source::DataSource) to
//! the reconciled store and the view engine:
//!
//! - subscribes before the initial load so no change is missed
//! - queues backend events and applies them one at a time in [`CandidateSession::pump`]
//! - re-derives the visible page after every effective change or view input
//! - forwards mutations to the source and lets the resulting events update the table
//!
//! # Example
//!
//! ```rust
//! use hireboard_core::{Candidate, Status};
//! use hireboard_session::{CandidateSession, SessionConfig};
//! use hireboard_source::MemorySource;
//! use chrono::Utc;
//!
//! let source = MemorySource::new();
//! let mut session = CandidateSession::open(source.clone(), SessionConfig::default());
//!
//! source.remote_insert(Candidate::new("c1", "Ada Lovelace", "Engineer", Utc::now()));
//! session.pump();
//! assert_eq!(session.page().total, 1);
//!
//! session.set_status(&"c1".into(), Status::Hired);
//! assert_eq!(session.page().rows[0].effective_status(), Status::Hired);
//! session.close();
//! ```

pub mod config;
pub mod queue;
pub mod session;

pub use config::{Config, ConfigError, SessionConfig};
pub use queue::EventQueue;
pub use session::CandidateSession;
