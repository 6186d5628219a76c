//! Hireboard Source - Data source adapters for the hosted backend.
//!
//! This crate provides:
//!
//! - `DataSource`: bulk load, live change subscription, and mutations
//! - `Subscription`: release-once handle for a live change stream
//! - `MemorySource`: in-process backend with fan-out and failure injection
//! - `RestSource`: adapter over pluggable HTTP and realtime transports
//! - `ReqwestTransport`: blocking HTTP transport (feature `blocking-http`)
//! - `wire`: JSON row and realtime payload codecs
//!
//! # Example
//!
//! ```rust
//! use hireboard_source::{DataSource, MemorySource, SourceEvent};
//! use std::rc::Rc;
//!
//! let source = MemorySource::new();
//! let sub = source.subscribe(Rc::new(|event: SourceEvent| {
//!     println!("{:?}", event);
//! })).unwrap();
//! assert!(source.load_all().unwrap().is_empty());
//! sub.release();
//! ```

pub mod adapter;
pub mod config;
#[cfg(feature = "blocking-http")]
pub mod http;
pub mod memory;
pub mod rest;
pub mod wire;

pub use adapter::{DataSource, EventSink, SourceEvent, Subscription};
pub use config::SourceConfig;
#[cfg(feature = "blocking-http")]
pub use http::ReqwestTransport;
pub use memory::MemorySource;
pub use rest::{
    Frame, HttpTransport, Method, RealtimeTransport, RestRequest, RestResponse, RestSource,
};
pub use wire::CandidateRow;
