//! REST and realtime adapter for the hosted backend.
//!
//! `RestSource` speaks the backend's auto-generated REST dialect over an
//! `HttpTransport`, and joins the table's realtime topic over a
//! `RealtimeTransport`. `ReqwestTransport` covers HTTP on native targets;
//! the realtime socket is supplied by the embedding application.

use crate::adapter::{DataSource, EventSink, SourceEvent, Subscription};
use crate::config::SourceConfig;
use crate::wire::{self, NewCandidateBody, StatusPatch, SELECT_COLUMNS};
use hireboard_core::{Candidate, CandidateDraft, CandidateId, Error, Result, Status};
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

/// A request to the REST interface. Query values are not yet URL-encoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RestRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl RestRequest {
    /// Returns the first header with the given name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns the first query parameter with the given name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RestResponse {
    pub status: u16,
    pub body: String,
}

impl RestResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes REST requests. Network failures map to `Error::Transport`.
pub trait HttpTransport {
    fn send(&self, request: &RestRequest) -> Result<RestResponse>;
}

/// One frame delivered on a realtime topic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Frame {
    /// A JSON postgres-changes payload.
    Text(String),
    Closed { reason: String },
    Rejoined,
}

/// Joins realtime topics.
pub trait RealtimeTransport {
    /// Joins `topic`; the returned handle leaves it when released.
    fn join(&self, topic: &str, on_frame: Box<dyn Fn(Frame)>) -> Result<Subscription>;
}

/// `DataSource` over the backend's REST and realtime interfaces.
pub struct RestSource<H, R> {
    config: SourceConfig,
    http: H,
    realtime: R,
}

impl<H, R> RestSource<H, R>
where
    H: HttpTransport,
    R: RealtimeTransport,
{
    pub fn new(config: SourceConfig, http: H, realtime: R) -> Self {
        Self {
            config,
            http,
            realtime,
        }
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> RestRequest {
        RestRequest {
            method,
            url: self.config.url(path),
            query: Vec::new(),
            headers: vec![
                ("apikey".to_string(), self.config.api_key.clone()),
                (
                    "Authorization".to_string(),
                    format!("Bearer {}", self.config.bearer()),
                ),
            ],
            body: None,
        }
    }

    fn row_request(&self, method: Method, id: &CandidateId) -> RestRequest {
        let mut request = self.request(method, &self.config.table_path());
        request.query.push(("id".to_string(), format!("eq.{}", id)));
        request
            .headers
            .push(("Prefer".to_string(), "return=representation".to_string()));
        request
    }

    fn with_json<T: Serialize>(mut request: RestRequest, body: &T) -> Result<RestRequest> {
        let body = serde_json::to_string(body).map_err(|e| Error::decode(e.to_string()))?;
        request
            .headers
            .push(("Content-Type".to_string(), "application/json".to_string()));
        request.body = Some(body.into_bytes());
        Ok(request)
    }

    fn execute(&self, request: &RestRequest) -> Result<RestResponse> {
        let response = self.http.send(request)?;
        if !response.is_success() {
            return Err(Error::transport_status(response.status, response.body));
        }
        Ok(response)
    }

    /// Runs a row mutation; an empty representation means no row matched.
    fn mutate_row(&self, request: RestRequest, id: &CandidateId) -> Result<()> {
        let response = self.execute(&request)?;
        if response.body.trim().is_empty() {
            return Ok(());
        }
        let rows: Vec<serde_json::Value> =
            serde_json::from_str(&response.body).map_err(|e| Error::decode(e.to_string()))?;
        if rows.is_empty() {
            return Err(Error::not_found(id.as_str()));
        }
        Ok(())
    }
}

impl<H, R> DataSource for RestSource<H, R>
where
    H: HttpTransport,
    R: RealtimeTransport,
{
    fn load_all(&self) -> Result<Vec<Candidate>> {
        let mut request = self.request(Method::Get, &self.config.table_path());
        request.query.push(("select".to_string(), SELECT_COLUMNS.to_string()));
        request
            .query
            .push(("order".to_string(), "created_at.desc".to_string()));
        let response = self.execute(&request)?;
        wire::decode_rows(&response.body)
    }

    fn subscribe(&self, sink: EventSink) -> Result<Subscription> {
        let table = self.config.table.clone();
        let on_frame = move |frame: Frame| match frame {
            Frame::Text(text) => match wire::decode_change(&text, &table) {
                Ok(Some(event)) => sink(SourceEvent::Change(event)),
                Ok(None) => debug!(table = %table, "skipping frame for another table"),
                Err(err) => warn!(error = %err, "dropping undecodable realtime frame"),
            },
            Frame::Closed { reason } => sink(SourceEvent::Disconnected { reason }),
            Frame::Rejoined => sink(SourceEvent::Reconnected),
        };
        self.realtime.join(&self.config.topic(), Box::new(on_frame))
    }

    fn update_status(&self, id: &CandidateId, status: Status) -> Result<()> {
        let request = Self::with_json(
            self.row_request(Method::Patch, id),
            &StatusPatch {
                status: status.label(),
            },
        )?;
        self.mutate_row(request, id)
    }

    fn delete(&self, id: &CandidateId) -> Result<()> {
        let request = self.row_request(Method::Delete, id);
        self.mutate_row(request, id)
    }

    fn create(&self, draft: CandidateDraft) -> Result<()> {
        draft.validate()?;
        if self.config.access_token.is_none() {
            return Err(Error::transport_status(401, "Not authenticated"));
        }
        let request = Self::with_json(
            self.request(Method::Post, &self.config.create_path),
            &NewCandidateBody::new(&draft, self.config.user_id.as_deref()),
        )?;
        self.execute(&request)?;
        Ok(())
    }

    fn upload_resume(&self, path: &str, bytes: Vec<u8>) -> Result<String> {
        let mut request = self.request(Method::Post, &self.config.upload_path(path));
        request
            .headers
            .push(("Content-Type".to_string(), "application/octet-stream".to_string()));
        request.body = Some(bytes);
        self.execute(&request)?;
        Ok(self.config.public_url(path))
    }
}
