//! Candidate record definitions.
//!
//! This module defines the `Candidate` struct which represents a single
//! candidate application, together with its identifier and status types.

use crate::error::{Error, Result};
use alloc::string::String;
use chrono::{DateTime, NaiveDate, Utc};
use core::fmt;

/// Point in time a candidate was created, always in UTC.
pub type Timestamp = DateTime<Utc>;

/// Minimum number of characters accepted for draft text fields.
pub const MIN_FIELD_CHARS: usize = 2;

/// Opaque, stable identifier of a candidate.
///
/// Ordering is byte-lexicographic and is used as the final sort tie-break.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CandidateId(String);

impl CandidateId {
    /// Creates an identifier from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the identifier, returning the owned string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CandidateId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CandidateId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Hiring pipeline stage of a candidate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Status {
    #[default]
    New,
    Interviewing,
    Hired,
    Rejected,
}

impl Status {
    /// Every status, in the order the row action menu offers them.
    pub const ALL: [Status; 4] = [
        Status::New,
        Status::Interviewing,
        Status::Hired,
        Status::Rejected,
    ];

    /// Returns the display label stored by the backend.
    pub fn label(self) -> &'static str {
        match self {
            Status::New => "New",
            Status::Interviewing => "Interviewing",
            Status::Hired => "Hired",
            Status::Rejected => "Rejected",
        }
    }

    /// Parses an exact backend label.
    pub fn from_label(label: &str) -> Option<Status> {
        Status::ALL.into_iter().find(|s| s.label() == label)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single candidate application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub id: CandidateId,
    pub full_name: String,
    pub applied_position: String,
    /// Raw status as stored; `None` is treated as `Status::New`.
    pub status: Option<Status>,
    /// Link to the uploaded résumé, if any.
    pub resume_url: Option<String>,
    pub created_at: Timestamp,
}

impl Candidate {
    /// Creates a candidate with no status and no résumé.
    pub fn new(
        id: impl Into<CandidateId>,
        full_name: impl Into<String>,
        applied_position: impl Into<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
            applied_position: applied_position.into(),
            status: None,
            resume_url: None,
            created_at,
        }
    }

    /// Sets the status.
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the résumé link.
    pub fn with_resume(mut self, url: impl Into<String>) -> Self {
        self.resume_url = Some(url.into());
        self
    }

    /// Returns the status, defaulting to `Status::New` when absent.
    #[inline]
    pub fn effective_status(&self) -> Status {
        self.status.unwrap_or_default()
    }

    /// Returns the UTC calendar day of creation.
    #[inline]
    pub fn created_day(&self) -> NaiveDate {
        self.created_at.date_naive()
    }
}

/// Input of the add-candidate flow.
///
/// The backend assigns the identifier and creation time; new candidates
/// always start as `Status::New`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CandidateDraft {
    pub full_name: String,
    pub applied_position: String,
    pub resume_url: Option<String>,
}

impl CandidateDraft {
    /// Creates a draft without a résumé.
    pub fn new(full_name: impl Into<String>, applied_position: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            applied_position: applied_position.into(),
            resume_url: None,
        }
    }

    /// Attaches an uploaded résumé link.
    pub fn with_resume(mut self, url: impl Into<String>) -> Self {
        self.resume_url = Some(url.into());
        self
    }

    /// Checks the field length rules of the add form.
    pub fn validate(&self) -> Result<()> {
        if self.full_name.chars().count() < MIN_FIELD_CHARS {
            return Err(Error::invalid_draft("full_name", "Full name too short"));
        }
        if self.applied_position.chars().count() < MIN_FIELD_CHARS {
            return Err(Error::invalid_draft("applied_position", "Position too short"));
        }
        Ok(())
    }

    /// Materializes the draft as a stored candidate.
    pub fn into_candidate(self, id: CandidateId, created_at: Timestamp) -> Candidate {
        Candidate {
            id,
            full_name: self.full_name,
            applied_position: self.applied_position,
            status: Some(Status::New),
            resume_url: self.resume_url,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(day: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2024, 3, day, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_status_labels_roundtrip() {
        for status in Status::ALL {
            assert_eq!(Status::from_label(status.label()), Some(status));
        }
        assert_eq!(Status::from_label("hired"), None);
        assert_eq!(Status::from_label(""), None);
    }

    #[test]
    fn test_effective_status_defaults_to_new() {
        let c = Candidate::new("a", "Ada", "Engineer", ts(1));
        assert_eq!(c.status, None);
        assert_eq!(c.effective_status(), Status::New);
        assert_eq!(c.with_status(Status::Hired).effective_status(), Status::Hired);
    }

    #[test]
    fn test_created_day() {
        let c = Candidate::new("a", "Ada", "Engineer", ts(7));
        assert_eq!(c.created_day(), NaiveDate::from_ymd_opt(2024, 3, 7).unwrap());
    }

    #[test]
    fn test_candidate_id_ordering() {
        assert!(CandidateId::from("a") < CandidateId::from("b"));
        assert!(CandidateId::from("B") < CandidateId::from("a"));
        assert_eq!(CandidateId::from("x").as_str(), "x");
    }

    #[test]
    fn test_draft_validation() {
        assert!(CandidateDraft::new("Al", "QA").validate().is_ok());

        match CandidateDraft::new("A", "Engineer").validate() {
            Err(Error::InvalidDraft { field, .. }) => assert_eq!(field, "full_name"),
            other => panic!("unexpected: {:?}", other),
        }
        match CandidateDraft::new("Ada", "Q").validate() {
            Err(Error::InvalidDraft { field, .. }) => assert_eq!(field, "applied_position"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_draft_counts_chars_not_bytes() {
        assert!(CandidateDraft::new("Łó", "Dev").validate().is_ok());
    }

    #[test]
    fn test_draft_into_candidate_starts_new() {
        let c = CandidateDraft::new("Ada", "Engineer")
            .with_resume("https://cdn/cv.pdf")
            .into_candidate(CandidateId::from("id-1"), ts(2));
        assert_eq!(c.status, Some(Status::New));
        assert_eq!(c.resume_url.as_deref(), Some("https://cdn/cv.pdf"));
        assert_eq!(c.id.as_str(), "id-1");
    }
}
