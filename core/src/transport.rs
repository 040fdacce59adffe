//! Executes `HttpRequest` values against the network.
//!
//! # Design
//! `Transport` is the single I/O seam of the crate. The directory and the
//! form component only ever see this trait, so tests swap in canned
//! responses and hosts may bring their own HTTP stack. Transports report
//! HTTP error statuses as data; interpreting them is the client's job.

use tracing::debug;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Performs one HTTP round-trip.
///
/// `Sync` because the directory issues its two initial loads concurrently.
pub trait Transport: Send + Sync {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by `ureq`.
///
/// Status-code-as-error is disabled so 4xx/5xx responses come back as
/// `HttpResponse` values rather than transport failures.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (key, value) in headers {
        builder = builder.header(key.as_str(), value.as_str());
    }
    builder
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = request.method.as_str(), path = %request.path, "sending request");

        let HttpRequest {
            method,
            path,
            headers,
            body,
        } = request;

        let result = match (method, body) {
            (HttpMethod::Get, _) => with_headers(self.agent.get(&path), &headers).call(),
            (HttpMethod::Delete, _) => with_headers(self.agent.delete(&path), &headers).call(),
            (HttpMethod::Post, Some(body)) => with_headers(self.agent.post(&path), &headers).send(body.as_bytes()),
            (HttpMethod::Post, None) => with_headers(self.agent.post(&path), &headers).send_empty(),
            (HttpMethod::Put, Some(body)) => with_headers(self.agent.put(&path), &headers).send(body.as_bytes()),
            (HttpMethod::Put, None) => with_headers(self.agent.put(&path), &headers).send_empty(),
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        debug!(status, "received response");
        Ok(HttpResponse { status, headers, body })
    }
}
