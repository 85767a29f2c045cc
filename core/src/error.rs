//! Error types for the share API client.
//!
//! # Design
//! Only request construction can fail inside the core. Transport failures
//! belong to whoever executes the request, and response bodies are never
//! interpreted, so there is no response-side variant.

use thiserror::Error;

/// Errors returned by `ShareClient` constructors and `build_*` methods.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The server URL is not an absolute `http://` or `https://` URL.
    #[error("invalid server URL {0:?}: expected http:// or https:// followed by a host")]
    InvalidServerUrl(String),

    #[error("share id must not be empty")]
    EmptyShareId,

    #[error("user id must not be empty")]
    EmptyUserId,

    /// An update request names no field to change.
    #[error("share update must set at least one of permissions, password, public upload or expire date")]
    EmptyUpdate,

    #[error("public link notification needs at least one recipient")]
    NoRecipients,

    #[error("public link notification needs a link")]
    EmptyLink,
}
