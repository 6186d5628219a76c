//! JSON shapes exchanged with the hosted backend.
//!
//! Rows come from the REST interface as arrays of `CandidateRow`; realtime
//! frames carry a postgres-changes payload:
//!
//! ```json
//! {"eventType": "UPDATE", "table": "candidates", "new": {...}, "old": {"id": "..."}}
//! ```

use chrono::{DateTime, Utc};
use hireboard_core::{Candidate, CandidateDraft, CandidateId, ChangeEvent, Error, Result, Status};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Columns requested on bulk load.
pub const SELECT_COLUMNS: &str = "id,full_name,applied_position,status,resume_url,created_at";

/// A candidate row as stored by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRow {
    pub id: String,
    pub full_name: String,
    pub applied_position: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub resume_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<CandidateRow> for Candidate {
    type Error = Error;

    fn try_from(row: CandidateRow) -> Result<Self> {
        let status = match row.status.as_deref() {
            None => None,
            Some(label) => Some(Status::from_label(label).ok_or_else(|| {
                Error::decode(format!("unknown status {:?} for candidate {}", label, row.id))
            })?),
        };
        Ok(Candidate {
            id: CandidateId::new(row.id),
            full_name: row.full_name,
            applied_position: row.applied_position,
            status,
            resume_url: row.resume_url,
            created_at: row.created_at,
        })
    }
}

/// Body of a status update.
#[derive(Debug, Serialize)]
pub struct StatusPatch<'a> {
    pub status: &'a str,
}

/// Body of the add-candidate request.
#[derive(Debug, Serialize)]
pub struct NewCandidateBody<'a> {
    pub full_name: &'a str,
    pub applied_position: &'a str,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<&'a str>,
}

impl<'a> NewCandidateBody<'a> {
    /// Builds the body for a draft submitted by `user_id`.
    pub fn new(draft: &'a CandidateDraft, user_id: Option<&'a str>) -> Self {
        Self {
            full_name: &draft.full_name,
            applied_position: &draft.applied_position,
            status: Status::New.label(),
            resume_url: draft.resume_url.as_deref(),
            user_id,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChangePayload {
    #[serde(rename = "eventType")]
    event_type: String,
    #[serde(default)]
    table: Option<String>,
    #[serde(default)]
    new: Option<JsonValue>,
    #[serde(default)]
    old: Option<JsonValue>,
}

#[derive(Debug, Deserialize)]
struct RowKey {
    id: String,
}

fn json_err(e: serde_json::Error) -> Error {
    Error::decode(e.to_string())
}

/// Decodes a REST response body holding an array of rows.
pub fn decode_rows(body: &str) -> Result<Vec<Candidate>> {
    let rows: Vec<CandidateRow> = serde_json::from_str(body).map_err(json_err)?;
    rows.into_iter().map(Candidate::try_from).collect()
}

/// Decodes one realtime frame.
///
/// Returns `Ok(None)` for frames about another table.
pub fn decode_change(frame: &str, table: &str) -> Result<Option<ChangeEvent>> {
    let payload: ChangePayload = serde_json::from_str(frame).map_err(json_err)?;
    if payload.table.as_deref().is_some_and(|t| t != table) {
        return Ok(None);
    }

    let record = |value: Option<JsonValue>| -> Result<Candidate> {
        let value = value.ok_or_else(|| Error::decode("change payload without record"))?;
        let row: CandidateRow = serde_json::from_value(value).map_err(json_err)?;
        Candidate::try_from(row)
    };

    let event = match payload.event_type.as_str() {
        "INSERT" => ChangeEvent::Insert(record(payload.new)?),
        "UPDATE" => ChangeEvent::Update(record(payload.new)?),
        "DELETE" => {
            let old = payload
                .old
                .ok_or_else(|| Error::decode("delete payload without old record"))?;
            let key: RowKey = serde_json::from_value(old).map_err(json_err)?;
            ChangeEvent::Delete(CandidateId::new(key.id))
        }
        other => return Err(Error::decode(format!("unknown event type {:?}", other))),
    };
    Ok(Some(event))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const ROWS: &str = r#"[
        {"id": "7f1c", "full_name": "Ada Lovelace", "applied_position": "Engineer",
         "status": "Interviewing", "resume_url": "https://cdn/resumes/ada.pdf",
         "created_at": "2024-05-01T10:20:30.123456+00:00"},
        {"id": "8a2d", "full_name": "Bob", "applied_position": "QA",
         "status": null, "resume_url": null, "created_at": "2024-04-30T08:00:00+00:00"}
    ]"#;

    #[test]
    fn test_decode_rows() {
        let rows = decode_rows(ROWS).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].status, Some(Status::Interviewing));
        assert_eq!(rows[0].resume_url.as_deref(), Some("https://cdn/resumes/ada.pdf"));
        assert_eq!(rows[1].status, None);
        assert_eq!(
            rows[1].created_at,
            Utc.with_ymd_and_hms(2024, 4, 30, 8, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_decode_rows_missing_optional_columns() {
        let body = r#"[{"id": "1", "full_name": "A", "applied_position": "B", "created_at": "2024-01-01T00:00:00Z"}]"#;
        let rows = decode_rows(body).unwrap();
        assert_eq!(rows[0].status, None);
        assert_eq!(rows[0].resume_url, None);
    }

    #[test]
    fn test_decode_rows_rejects_unknown_status() {
        let body = r#"[{"id": "1", "full_name": "A", "applied_position": "B", "status": "Ghosted", "created_at": "2024-01-01T00:00:00Z"}]"#;
        assert!(matches!(decode_rows(body), Err(Error::Decode { .. })));
    }

    #[test]
    fn test_decode_change_kinds() {
        let insert = r#"{"eventType": "INSERT", "table": "candidates", "old": {},
            "new": {"id": "1", "full_name": "A", "applied_position": "B", "status": "New", "created_at": "2024-01-01T00:00:00Z"}}"#;
        match decode_change(insert, "candidates").unwrap() {
            Some(ChangeEvent::Insert(c)) => assert_eq!(c.id.as_str(), "1"),
            other => panic!("unexpected: {:?}", other),
        }

        let delete = r#"{"eventType": "DELETE", "table": "candidates", "new": {}, "old": {"id": "1"}}"#;
        assert_eq!(
            decode_change(delete, "candidates").unwrap(),
            Some(ChangeEvent::Delete(CandidateId::from("1")))
        );
    }

    #[test]
    fn test_decode_change_other_table_is_skipped() {
        let frame = r#"{"eventType": "DELETE", "table": "users", "old": {"id": "1"}}"#;
        assert_eq!(decode_change(frame, "candidates").unwrap(), None);
    }

    #[test]
    fn test_decode_change_errors() {
        assert!(decode_change("not json", "candidates").is_err());
        assert!(decode_change(r#"{"eventType": "TRUNCATE"}"#, "candidates").is_err());
        assert!(decode_change(r#"{"eventType": "UPDATE"}"#, "candidates").is_err());
        assert!(decode_change(r#"{"eventType": "DELETE", "old": {}}"#, "candidates").is_err());
    }

    #[test]
    fn test_new_candidate_body() {
        let draft = CandidateDraft::new("Ada", "Engineer");
        let body = serde_json::to_value(NewCandidateBody::new(&draft, None)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"full_name": "Ada", "applied_position": "Engineer", "status": "New"})
        );

        let draft = draft.with_resume("https://cdn/cv.pdf");
        let body = serde_json::to_value(NewCandidateBody::new(&draft, Some("user-1"))).unwrap();
        assert_eq!(body["resume_url"], "https://cdn/cv.pdf");
        assert_eq!(body["user_id"], "user-1");
    }
}
