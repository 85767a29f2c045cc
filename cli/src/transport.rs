//! Blocking execution of `HttpRequest` values with ureq.
//!
//! The response body is streamed to the output as it arrives, so its size is
//! not bounded by memory or by ureq's buffered-read limits.

use std::io::{self, Read, Write};
use std::time::Duration;

use share_core::{HttpMethod, HttpRequest};
use thiserror::Error;

use crate::error::CliError;
use crate::output::BodyWriter;

const CHUNK_SIZE: usize = 16 * 1024;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{method} {url} failed: {source}")]
    Request {
        method: HttpMethod,
        url: String,
        #[source]
        source: ureq::Error,
    },

    #[error("reading response body from {url} failed: {source}")]
    Body {
        url: String,
        #[source]
        source: io::Error,
    },
}

/// One agent per invocation; no pooling across runs.
pub struct Transport {
    agent: ureq::Agent,
}

impl Transport {
    /// HTTP error statuses come back as responses, not as `Err`.
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }

    /// Send `request` and copy the response body into `out`. Returns the
    /// HTTP status.
    pub fn execute<W: Write>(&self, request: &HttpRequest, out: &mut BodyWriter<W>) -> Result<u16, CliError> {
        tracing::debug!(method = %request.method, url = %request.url, "sending request");

        let url = request.url.as_str();
        let headers = request.headers.as_slice();
        let result = match (request.method, request.body.as_deref()) {
            (HttpMethod::Get, _) => with_headers(self.agent.get(url), headers).call(),
            (HttpMethod::Delete, _) => with_headers(self.agent.delete(url), headers).call(),
            (HttpMethod::Post, Some(body)) => with_headers(self.agent.post(url), headers).send(body.as_bytes()),
            (HttpMethod::Post, None) => with_headers(self.agent.post(url), headers).send_empty(),
            (HttpMethod::Put, Some(body)) => with_headers(self.agent.put(url), headers).send(body.as_bytes()),
            (HttpMethod::Put, None) => with_headers(self.agent.put(url), headers).send_empty(),
        };
        let mut response = result.map_err(|source| TransportError::Request {
            method: request.method,
            url: request.url.clone(),
            source,
        })?;

        let status = response.status().as_u16();
        let mut reader = response.body_mut().as_reader();
        let mut chunk = vec![0u8; CHUNK_SIZE];
        loop {
            let read = match reader.read(&mut chunk) {
                Ok(0) => break,
                Ok(read) => read,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(TransportError::Body {
                        url: request.url.clone(),
                        source,
                    }
                    .into())
                }
            };
            out.write_chunk(&chunk[..read])?;
        }

        tracing::info!(status, bytes = out.written(), "response received");
        Ok(status)
    }
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
