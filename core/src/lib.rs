//! Request-building core for the file sharing API.
//!
//! # Overview
//! Builds `HttpRequest` values for the sharing endpoints without touching
//! the network (host-does-IO pattern). The caller executes the HTTP
//! round-trip and treats the response body as opaque bytes.
//!
//! # Design
//! - `ShareClient` is stateless: it holds only the server URL and the Basic
//!   auth credentials.
//! - Every request carries `authorization: Basic ...`; request bodies are
//!   form-encoded the way the PHP backend expects.
//! - Construction problems surface as `ApiError` before any I/O happens.

pub mod auth;
pub mod client;
pub mod error;
pub mod form;
pub mod http;
pub mod types;

pub use auth::Credentials;
pub use client::ShareClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{NotifyPublicLink, ShareId, UpdateShare};
