//! Presentation helpers for the candidate table.

use crate::sort::SortKey;
use alloc::format;
use alloc::string::{String, ToString};
use hireboard_core::{Candidate, Status};

/// Shown in the CV column when a candidate has no résumé.
pub const NO_RESUME_PLACEHOLDER: &str = "—";

/// Columns of the candidate table, left to right.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Column {
    Name,
    Position,
    Status,
    Resume,
    Created,
    Actions,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::Name,
        Column::Position,
        Column::Status,
        Column::Resume,
        Column::Created,
        Column::Actions,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Column::Name => "Full Name",
            Column::Position => "Applied Position",
            Column::Status => "Status",
            Column::Resume => "CV",
            Column::Created => "Created",
            Column::Actions => "Actions",
        }
    }

    /// Returns the key a header click sorts by, if the column is sortable.
    pub fn sort_key(self) -> Option<SortKey> {
        match self {
            Column::Name => Some(SortKey::Name),
            Column::Position => Some(SortKey::Position),
            Column::Status => Some(SortKey::Status),
            Column::Created => Some(SortKey::CreatedAt),
            Column::Resume | Column::Actions => None,
        }
    }
}

/// One rendered table row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowView<'a> {
    pub name: &'a str,
    pub position: &'a str,
    pub status: &'static str,
    /// Résumé link, `None` renders as `NO_RESUME_PLACEHOLDER`.
    pub resume_url: Option<&'a str>,
    /// Creation day as `YYYY-MM-DD` (UTC).
    pub created: String,
}

impl<'a> RowView<'a> {
    pub fn new(candidate: &'a Candidate) -> Self {
        Self {
            name: &candidate.full_name,
            position: &candidate.applied_position,
            status: candidate.effective_status().label(),
            resume_url: candidate.resume_url.as_deref(),
            created: candidate.created_at.format("%Y-%m-%d").to_string(),
        }
    }

    /// Text of the CV cell.
    pub fn resume_cell(&self) -> &str {
        self.resume_url.unwrap_or(NO_RESUME_PLACEHOLDER)
    }
}

/// Entries of the per-row action menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowAction {
    SetStatus(Status),
    /// Takes effect only after confirmation.
    Delete,
}

impl RowAction {
    /// The menu in display order: one entry per status, then delete.
    pub fn menu() -> [RowAction; 5] {
        [
            RowAction::SetStatus(Status::New),
            RowAction::SetStatus(Status::Interviewing),
            RowAction::SetStatus(Status::Hired),
            RowAction::SetStatus(Status::Rejected),
            RowAction::Delete,
        ]
    }

    pub fn label(self) -> String {
        match self {
            RowAction::SetStatus(status) => format!("Set to {}", status),
            RowAction::Delete => String::from("Delete"),
        }
    }

    #[inline]
    pub fn requires_confirmation(self) -> bool {
        matches!(self, RowAction::Delete)
    }
}
