//! Candidate ordering.
//!
//! Text keys compare case-insensitively, timestamps chronologically. Equal
//! keys always fall back to the identifier, ascending, so the order is total
//! and re-sorting a sorted sequence leaves it unchanged.

use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;
use hireboard_core::Candidate;

/// Column a candidate list can be ordered by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortKey {
    Name,
    Position,
    Status,
    CreatedAt,
}

impl SortKey {
    /// Compares two candidates by this key, ascending.
    pub fn compare(self, a: &Candidate, b: &Candidate) -> Ordering {
        match self {
            SortKey::Name => cmp_ignore_case(&a.full_name, &b.full_name),
            SortKey::Position => cmp_ignore_case(&a.applied_position, &b.applied_position),
            SortKey::Status => {
                cmp_ignore_case(a.effective_status().label(), b.effective_status().label())
            }
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        }
    }
}

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Returns the opposite direction.
    pub fn reverse(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    #[inline]
    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}

/// One key of a multi-key ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortTerm {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortTerm {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }
}

/// Multi-key ordering of candidates.
///
/// Never empty; the identifier tie-break is implicit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortOrder {
    terms: Vec<SortTerm>,
}

impl Default for SortOrder {
    /// Newest candidates first.
    fn default() -> Self {
        Self::new(SortKey::CreatedAt, SortDirection::Desc)
    }
}

impl SortOrder {
    /// Creates an ordering by a single key.
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self {
            terms: vec![SortTerm::new(key, direction)],
        }
    }

    /// Adds a lower-priority key. A key already present is left alone.
    pub fn then_by(mut self, key: SortKey, direction: SortDirection) -> Self {
        if !self.terms.iter().any(|t| t.key == key) {
            self.terms.push(SortTerm::new(key, direction));
        }
        self
    }

    /// Returns the highest-priority term.
    #[inline]
    pub fn primary(&self) -> SortTerm {
        self.terms[0]
    }

    /// Returns all terms, highest priority first.
    #[inline]
    pub fn terms(&self) -> &[SortTerm] {
        &self.terms
    }

    /// Column header click: flip the primary key, or promote another key.
    ///
    /// A promoted key starts ascending and the previous keys keep their
    /// relative order behind it.
    pub fn toggle(&mut self, key: SortKey) {
        if self.terms[0].key == key {
            self.terms[0].direction = self.terms[0].direction.reverse();
            return;
        }
        self.terms.retain(|t| t.key != key);
        self.terms.insert(0, SortTerm::new(key, SortDirection::Asc));
    }

    /// Compares two candidates under this ordering.
    pub fn compare(&self, a: &Candidate, b: &Candidate) -> Ordering {
        for term in &self.terms {
            let ord = term.direction.apply(term.key.compare(a, b));
            if ord != Ordering::Equal {
                return ord;
            }
        }
        a.id.cmp(&b.id)
    }

    /// Sorts candidates in place.
    pub fn sort(&self, candidates: &mut [&Candidate]) {
        candidates.sort_by(|a, b| self.compare(a, b));
    }
}

/// Lexicographic comparison of the lowercase forms, without allocating.
pub fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}
