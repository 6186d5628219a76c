//! Hireboard Reactive - Reconciled candidate store for Hireboard.
//!
//! This crate maintains the authoritative in-memory candidate collection
//! built from an initial load plus realtime change events, and notifies
//! listeners whenever it changes.
//!
//! # Core Concepts
//!
//! - `CandidateStore`: identifier-keyed, arrival-ordered record collection
//! - `Applied`: outcome of applying one change event
//! - `StoreChange`: notification payload for store listeners
//! - `SubscriptionManager`: listener registry, reused by the session for pages
//!
//! # Example
//!
//! ```ignore
//! use hireboard_reactive::CandidateStore;
//! use hireboard_core::ChangeEvent;
//!
//! let mut store = CandidateStore::new();
//! store.subscribe(|change| println!("store now at version {}", change.version()));
//!
//! store.replace_all(initial_load);
//! store.apply(ChangeEvent::Delete(id));
//! ```

#![no_std]

extern crate alloc;

pub mod change_set;
pub mod store;
pub mod subscription;

pub use change_set::{Applied, StoreChange};
pub use store::CandidateStore;
pub use subscription::{SubscriptionId, SubscriptionManager};
