//! Cursor pagination over a sorted candidate sequence.
//!
//! The open page is identified by its boundary identifiers rather than by a
//! numeric offset, so inserts and deletes elsewhere in the sequence do not
//! move it. Every navigation re-locates the boundaries in the freshly sorted
//! sequence. The first page is the exception: it always shows the head of
//! the sequence, so records sorting ahead of it become visible.

use alloc::vec::Vec;
use hireboard_core::{Candidate, CandidateId};

/// Number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// First and last identifier of the displayed page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageCursor {
    pub first: Option<CandidateId>,
    pub last: Option<CandidateId>,
    /// The page starts at offset 0.
    pub at_start: bool,
}

impl PageCursor {
    /// Returns true if no page has been displayed yet.
    #[inline]
    pub fn is_unset(&self) -> bool {
        self.first.is_none() && self.last.is_none()
    }

    fn of(rows: &[Candidate], start: usize) -> Self {
        Self {
            first: rows.first().map(|c| c.id.clone()),
            last: rows.last().map(|c| c.id.clone()),
            at_start: start == 0,
        }
    }
}

/// A page navigation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// The first page-size records.
    First,
    /// The records right after the last boundary.
    Next,
    /// Up to page-size records right before the first boundary.
    Previous,
    /// The open page again, after the underlying sequence changed.
    Current,
}

/// The slice of candidates to render.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Page {
    pub rows: Vec<Candidate>,
    /// Offset of the first row in the filtered, sorted sequence.
    pub start: usize,
    /// Length of the filtered, sorted sequence.
    pub total: usize,
    pub has_next: bool,
    pub has_previous: bool,
    pub cursor: PageCursor,
}

impl Page {
    /// Returns true if there is nothing to render.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the identifiers of the rows, in display order.
    pub fn ids(&self) -> Vec<&CandidateId> {
        self.rows.iter().map(|c| &c.id).collect()
    }
}

/// Computes the page for a navigation request.
///
/// A boundary that no longer appears in `sorted` (deleted, or filtered out)
/// falls back to the first page. `Next` past the end keeps the open page and
/// `Previous` reaching the start yields the first page. Every page but the
/// last holds exactly `page_size` rows.
pub fn paginate(
    sorted: &[&Candidate],
    cursor: &PageCursor,
    navigation: Navigation,
    page_size: usize,
) -> Page {
    let page_size = page_size.max(1);
    let total = sorted.len();
    let locate = |id: &Option<CandidateId>| -> Option<usize> {
        let id = id.as_ref()?;
        sorted.iter().position(|c| &c.id == id)
    };
    let first_page = (0, page_size.min(total));
    let from = |start: usize| (start, (start + page_size).min(total));
    let current = || {
        if cursor.at_start {
            return first_page;
        }
        match locate(&cursor.first) {
            Some(pos) => from(pos),
            None => match locate(&cursor.last) {
                Some(pos) => from((pos + 1).saturating_sub(page_size)),
                None => first_page,
            },
        }
    };

    let (start, end) = match navigation {
        Navigation::First => first_page,
        Navigation::Current => current(),
        Navigation::Next => match locate(&cursor.last) {
            Some(pos) if pos + 1 >= total => current(),
            Some(pos) => from(pos + 1),
            None => first_page,
        },
        Navigation::Previous => match locate(&cursor.first) {
            Some(pos) if pos > page_size => (pos - page_size, pos),
            _ => first_page,
        },
    };

    let rows: Vec<Candidate> = sorted[start..end].iter().map(|c| (*c).clone()).collect();
    Page {
        cursor: PageCursor::of(&rows, start),
        has_next: end < total,
        has_previous: start > 0,
        rows,
        start,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec;
    use chrono::{TimeZone, Utc};

    fn rows(n: usize) -> Vec<Candidate> {
        (0..n)
            .map(|i| {
                Candidate::new(
                    format!("id-{:02}", i),
                    format!("Name {}", i),
                    "Engineer",
                    Utc.timestamp_opt(i as i64, 0).unwrap(),
                )
            })
            .collect()
    }

    fn starts(page: &Page) -> (usize, usize) {
        (page.start, page.rows.len())
    }

    #[test]
    fn test_empty_sequence() {
        let page = paginate(&[], &PageCursor::default(), Navigation::First, 10);
        assert!(page.is_empty());
        assert!(!page.has_next);
        assert!(!page.has_previous);
        assert!(page.cursor.is_unset());
    }

    #[test]
    fn test_forward_and_back_over_25() {
        let data = rows(25);
        let sorted: Vec<&Candidate> = data.iter().collect();

        let p1 = paginate(&sorted, &PageCursor::default(), Navigation::First, 10);
        assert_eq!(starts(&p1), (0, 10));
        assert!(p1.has_next && !p1.has_previous);

        let p2 = paginate(&sorted, &p1.cursor, Navigation::Next, 10);
        assert_eq!(starts(&p2), (10, 10));
        assert!(p2.has_next && p2.has_previous);

        let p3 = paginate(&sorted, &p2.cursor, Navigation::Next, 10);
        assert_eq!(starts(&p3), (20, 5));
        assert!(!p3.has_next && p3.has_previous);

        let back = paginate(&sorted, &p3.cursor, Navigation::Previous, 10);
        assert_eq!(back, p2);
        let back = paginate(&sorted, &back.cursor, Navigation::Previous, 10);
        assert_eq!(back, p1);
        assert!(!back.has_previous);
    }

    #[test]
    fn test_exact_multiple_has_no_phantom_page() {
        let data = rows(20);
        let sorted: Vec<&Candidate> = data.iter().collect();
        let p1 = paginate(&sorted, &PageCursor::default(), Navigation::First, 10);
        let p2 = paginate(&sorted, &p1.cursor, Navigation::Next, 10);
        assert_eq!(starts(&p2), (10, 10));
        assert!(!p2.has_next);

        let stay = paginate(&sorted, &p2.cursor, Navigation::Next, 10);
        assert_eq!(stay, p2);
    }

    #[test]
    fn test_next_with_vanished_boundary_falls_back_to_first() {
        let data = rows(25);
        let sorted: Vec<&Candidate> = data.iter().collect();
        let cursor = PageCursor {
            first: Some("gone-1".into()),
            last: Some("gone-2".into()),
            at_start: false,
        };
        let page = paginate(&sorted, &cursor, Navigation::Next, 10);
        assert_eq!(starts(&page), (0, 10));
    }

    #[test]
    fn test_previous_with_vanished_boundary_falls_back_to_first() {
        let data = rows(25);
        let sorted: Vec<&Candidate> = data.iter().collect();
        let cursor = PageCursor {
            first: Some("gone-1".into()),
            last: Some("id-19".into()),
            at_start: false,
        };
        let page = paginate(&sorted, &cursor, Navigation::Previous, 10);
        assert_eq!(starts(&page), (0, 10));
        assert!(!page.has_previous);
        assert!(page.cursor.at_start);
    }

    #[test]
    fn test_current_with_both_boundaries_vanished_shows_first() {
        let data = rows(25);
        let sorted: Vec<&Candidate> = data.iter().collect();
        let cursor = PageCursor {
            first: Some("gone-1".into()),
            last: Some("gone-2".into()),
            at_start: false,
        };
        let page = paginate(&sorted, &cursor, Navigation::Current, 10);
        assert_eq!(starts(&page), (0, 10));
        assert!(page.has_next && !page.has_previous);
    }

    #[test]
    fn test_first_page_follows_head_insert() {
        let data = rows(12);
        let sorted: Vec<&Candidate> = data.iter().collect();
        let p1 = paginate(&sorted, &PageCursor::default(), Navigation::First, 10);

        let newest = Candidate::new("aaa", "Newest", "Engineer", Utc.timestamp_opt(99, 0).unwrap());
        let mut grown: Vec<&Candidate> = vec![&newest];
        grown.extend(data.iter());

        let page = paginate(&grown, &p1.cursor, Navigation::Current, 10);
        assert_eq!(starts(&page), (0, 10));
        assert_eq!(page.rows[0].id.as_str(), "aaa");
        assert!(!page.has_previous);
        assert!(page.has_next);
    }

    #[test]
    fn test_first_page_stays_full_after_first_row_deleted() {
        let data = rows(25);
        let sorted: Vec<&Candidate> = data.iter().collect();
        let p1 = paginate(&sorted, &PageCursor::default(), Navigation::First, 10);

        let shrunk: Vec<&Candidate> = data.iter().filter(|c| c.id.as_str() != "id-00").collect();
        let page = paginate(&shrunk, &p1.cursor, Navigation::Current, 10);
        assert_eq!(starts(&page), (0, 10));
        assert_eq!(page.rows[0].id.as_str(), "id-01");
        assert_eq!(page.rows[9].id.as_str(), "id-10");
        assert!(page.has_next);
    }

    #[test]
    fn test_last_boundary_fallback_keeps_full_page() {
        let data = rows(25);
        let sorted: Vec<&Candidate> = data.iter().collect();
        // A page anchored near the head whose first row is gone
        let cursor = PageCursor {
            first: Some("gone".into()),
            last: Some("id-05".into()),
            at_start: false,
        };
        let page = paginate(&sorted, &cursor, Navigation::Current, 10);
        assert_eq!(starts(&page), (0, 10));
        assert!(page.has_next);
    }

    #[test]
    fn test_previous_near_head_yields_full_first_page() {
        let data = rows(25);
        let sorted: Vec<&Candidate> = data.iter().collect();
        let cursor = PageCursor {
            first: Some("id-04".into()),
            last: Some("id-13".into()),
            at_start: false,
        };
        let page = paginate(&sorted, &cursor, Navigation::Previous, 10);
        assert_eq!(starts(&page), (0, 10));
        assert!(!page.has_previous);
    }

    #[test]
    fn test_insert_before_open_page_does_not_shift_it() {
        let data = rows(25);
        let sorted: Vec<&Candidate> = data.iter().collect();
        let p1 = paginate(&sorted, &PageCursor::default(), Navigation::First, 10);
        let p2 = paginate(&sorted, &p1.cursor, Navigation::Next, 10);

        let extra = Candidate::new("aaa", "Early", "Engineer", Utc.timestamp_opt(0, 0).unwrap());
        let mut grown: Vec<&Candidate> = vec![&extra];
        grown.extend(data.iter());

        let same = paginate(&grown, &p2.cursor, Navigation::Current, 10);
        assert_eq!(same.rows, p2.rows);
        assert_eq!(same.start, 11);

        // Previous now yields the 10 records right before the boundary
        let prev = paginate(&grown, &same.cursor, Navigation::Previous, 10);
        assert_eq!(starts(&prev), (1, 10));
        assert!(prev.has_previous);
    }

    #[test]
    fn test_current_after_first_boundary_deleted() {
        let data = rows(25);
        let sorted: Vec<&Candidate> = data.iter().collect();
        let p1 = paginate(&sorted, &PageCursor::default(), Navigation::First, 10);
        let p2 = paginate(&sorted, &p1.cursor, Navigation::Next, 10);

        // Drop the first row of page two; the page re-anchors on its last row
        let shrunk: Vec<&Candidate> = data.iter().filter(|c| c.id.as_str() != "id-10").collect();
        let page = paginate(&shrunk, &p2.cursor, Navigation::Current, 10);
        assert_eq!(page.cursor.last.as_ref().map(|id| id.as_str()), Some("id-19"));
        assert_eq!(page.rows.len(), 10);
        assert!(page.rows.iter().all(|c| c.id.as_str() != "id-10"));
    }

    #[test]
    fn test_previous_on_first_page_stays() {
        let data = rows(5);
        let sorted: Vec<&Candidate> = data.iter().collect();
        let p1 = paginate(&sorted, &PageCursor::default(), Navigation::First, 10);
        let again = paginate(&sorted, &p1.cursor, Navigation::Previous, 10);
        assert_eq!(again, p1);
        assert!(!again.has_next && !again.has_previous);
    }
}
