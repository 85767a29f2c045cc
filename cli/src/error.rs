//! Errors that end a `share` invocation.

use share_core::ApiError;
use thiserror::Error;

use crate::transport::TransportError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot build request: {0}")]
    Request(#[from] ApiError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("writing response body failed: {0}")]
    Output(#[from] std::io::Error),
}
