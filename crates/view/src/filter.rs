//! Candidate filtering.
//!
//! A candidate is retained when every active criterion holds:
//!
//! - the free-text term is a case-insensitive substring of the name, the
//!   position, or the effective status label
//! - the name and position terms are substrings of their own column
//! - the status filter equals the effective status
//! - the creation day lies within the closed date range

use alloc::string::String;
use alloc::vec::Vec;
use chrono::NaiveDate;
use hireboard_core::{Candidate, Status};

/// Inclusive range of calendar days; either bound may be open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Creates a range from optional bounds.
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// Returns true if neither bound is set.
    #[inline]
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Returns true if the day lies within both bounds.
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.from.map_or(true, |from| day >= from) && self.to.map_or(true, |to| day <= to)
    }
}

/// Active filter criteria of the candidate table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CandidateFilter {
    /// Free-text term over name, position and status.
    pub text: String,
    /// Term matched against the name only.
    pub name: String,
    /// Term matched against the applied position only.
    pub position: String,
    pub status: Option<Status>,
    pub date_range: DateRange,
}

impl CandidateFilter {
    /// Creates a filter that matches everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the free-text term.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Sets the status criterion.
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the date range criterion.
    pub fn with_date_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_range = DateRange::new(from, to);
        self
    }

    /// Returns true if no criterion is active.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
            && self.name.is_empty()
            && self.position.is_empty()
            && self.status.is_none()
            && self.date_range.is_unbounded()
    }

    /// Lowercases the terms once so a whole collection can be tested.
    pub fn compile(&self) -> CompiledFilter<'_> {
        CompiledFilter {
            text: self.text.to_lowercase(),
            name: self.name.to_lowercase(),
            position: self.position.to_lowercase(),
            filter: self,
        }
    }

    /// Tests a single candidate.
    pub fn matches(&self, candidate: &Candidate) -> bool {
        self.compile().matches(candidate)
    }

    /// Retains the matching candidates, preserving input order.
    pub fn apply<'a, I>(&self, candidates: I) -> Vec<&'a Candidate>
    where
        I: IntoIterator<Item = &'a Candidate>,
    {
        let compiled = self.compile();
        candidates
            .into_iter()
            .filter(|c| compiled.matches(c))
            .collect()
    }
}

/// A filter with its text terms pre-lowercased.
pub struct CompiledFilter<'a> {
    text: String,
    name: String,
    position: String,
    filter: &'a CandidateFilter,
}

impl CompiledFilter<'_> {
    /// Tests a single candidate.
    pub fn matches(&self, candidate: &Candidate) -> bool {
        let status = candidate.effective_status();

        if let Some(wanted) = self.filter.status {
            if wanted != status {
                return false;
            }
        }
        if !self.filter.date_range.contains(candidate.created_day()) {
            return false;
        }

        let name = candidate.full_name.to_lowercase();
        let position = candidate.applied_position.to_lowercase();
        if !name.contains(self.name.as_str()) || !position.contains(self.position.as_str()) {
            return false;
        }

        self.text.is_empty()
            || name.contains(self.text.as_str())
            || position.contains(self.text.as_str())
            || status.label().to_lowercase().contains(self.text.as_str())
    }
}
