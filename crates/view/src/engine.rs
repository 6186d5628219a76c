//! The view engine: filter, sort, and paginate the store contents.
//!
//! `ViewEngine` owns the transient view state. Every setter that changes a
//! filter or sort input resets paging to the first page; navigation and
//! re-rendering keep the cursor.

use crate::filter::{CandidateFilter, DateRange};
use crate::page::{paginate, Navigation, Page, PageCursor, DEFAULT_PAGE_SIZE};
use crate::sort::{SortKey, SortOrder};
use alloc::string::String;
use alloc::vec::Vec;
use chrono::NaiveDate;
use hireboard_core::{Candidate, Status};
use hireboard_reactive::CandidateStore;

/// Transient, per-session view state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    pub filter: CandidateFilter,
    pub sort: SortOrder,
    pub cursor: PageCursor,
}

/// Derives the displayed page from the store and the view state.
pub struct ViewEngine {
    state: ViewState,
    page_size: usize,
}

impl Default for ViewEngine {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ViewEngine {
    /// Creates an engine with default view state.
    pub fn new(page_size: usize) -> Self {
        Self {
            state: ViewState::default(),
            page_size: page_size.max(1),
        }
    }

    /// Returns the current view state.
    #[inline]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Returns the active filter.
    #[inline]
    pub fn filter(&self) -> &CandidateFilter {
        &self.state.filter
    }

    /// Returns the active ordering.
    #[inline]
    pub fn sort_order(&self) -> &SortOrder {
        &self.state.sort
    }

    #[inline]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.state.filter.text = text.into();
        self.reset_cursor();
    }

    pub fn set_name_search(&mut self, text: impl Into<String>) {
        self.state.filter.name = text.into();
        self.reset_cursor();
    }

    pub fn set_position_search(&mut self, text: impl Into<String>) {
        self.state.filter.position = text.into();
        self.reset_cursor();
    }

    pub fn set_status_filter(&mut self, status: Option<Status>) {
        self.state.filter.status = status;
        self.reset_cursor();
    }

    pub fn set_date_range(&mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) {
        self.state.filter.date_range = DateRange::new(from, to);
        self.reset_cursor();
    }

    /// Replaces every filter criterion at once.
    pub fn set_filter(&mut self, filter: CandidateFilter) {
        self.state.filter = filter;
        self.reset_cursor();
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.state.sort = sort;
        self.reset_cursor();
    }

    /// Column header click, see `SortOrder::toggle`.
    pub fn toggle_sort(&mut self, key: SortKey) {
        self.state.sort.toggle(key);
        self.reset_cursor();
    }

    /// Restores default filter, ordering and paging.
    pub fn reset(&mut self) {
        self.state = ViewState::default();
    }

    fn reset_cursor(&mut self) {
        self.state.cursor = PageCursor::default();
    }

    /// Filters and sorts the store contents.
    pub fn derive<'a>(&self, store: &'a CandidateStore) -> Vec<&'a Candidate> {
        self.derive_from(store.iter())
    }

    /// Filters and sorts any candidate collection.
    pub fn derive_from<'a, I>(&self, candidates: I) -> Vec<&'a Candidate>
    where
        I: IntoIterator<Item = &'a Candidate>,
    {
        let mut rows = self.state.filter.apply(candidates);
        self.state.sort.sort(&mut rows);
        rows
    }

    /// Computes the page for a navigation and makes it the open page.
    pub fn navigate(&mut self, store: &CandidateStore, navigation: Navigation) -> Page {
        let sorted = self.derive(store);
        let page = paginate(&sorted, &self.state.cursor, navigation, self.page_size);
        self.state.cursor = page.cursor.clone();
        page
    }

    /// Recomputes the open page, or the first page after an input change.
    pub fn render(&mut self, store: &CandidateStore) -> Page {
        self.navigate(store, Navigation::Current)
    }

    pub fn first_page(&mut self, store: &CandidateStore) -> Page {
        self.navigate(store, Navigation::First)
    }

    pub fn next_page(&mut self, store: &CandidateStore) -> Page {
        self.navigate(store, Navigation::Next)
    }

    pub fn previous_page(&mut self, store: &CandidateStore) -> Page {
        self.navigate(store, Navigation::Previous)
    }
}
