//! Hireboard View - Filter, sort and paginate the candidate table.
//!
//! This crate derives the exact slice of candidates to render from the
//! reconciled store and the transient view state:
//!
//! - `filter`: free-text, per-column, status and date-range criteria
//! - `sort`: multi-key, case-insensitive ordering with an identifier tie-break
//! - `page`: boundary-identifier (cursor) pagination
//! - `engine`: `ViewEngine`, the pipeline owning the view state
//! - `display`: table columns, row rendering and the row action menu

#![no_std]

extern crate alloc;

pub mod display;
pub mod engine;
pub mod filter;
pub mod page;
pub mod sort;

pub use display::{Column, RowAction, RowView, NO_RESUME_PLACEHOLDER};
pub use engine::{ViewEngine, ViewState};
pub use filter::{CandidateFilter, DateRange};
pub use page::{paginate, Navigation, Page, PageCursor, DEFAULT_PAGE_SIZE};
pub use sort::{SortDirection, SortKey, SortOrder, SortTerm};
