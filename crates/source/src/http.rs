//! Blocking HTTP transport on `reqwest`.

use crate::rest::{HttpTransport, Method, RestRequest, RestResponse};
use hireboard_core::{Error, Result};
use std::time::Duration;
use tracing::debug;

/// Request timeout used by [`ReqwestTransport::new`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// `HttpTransport` backed by a blocking `reqwest` client.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::transport(e.to_string()))?;
        Ok(Self { client })
    }
}

fn to_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

impl HttpTransport for ReqwestTransport {
    fn send(&self, request: &RestRequest) -> Result<RestResponse> {
        let mut builder = self
            .client
            .request(to_method(request.method), request.url.as_str())
            .query(&request.query);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder
            .send()
            .map_err(|e| Error::transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| Error::transport_status(status, e.to_string()))?;
        debug!(method = ?request.method, url = %request.url, status, "request completed");
        Ok(RestResponse::new(status, body))
    }
}
