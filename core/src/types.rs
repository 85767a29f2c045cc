//! Inputs for share API operations.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Identifier of a share, as the server hands it out.
///
/// Kept as a string: the server uses numeric ids, but nothing on the client
/// side depends on that.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShareId(String);

impl ShareId {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ApiError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ApiError::EmptyShareId);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShareId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ShareId {
    type Error = ApiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ShareId> for String {
    fn from(id: ShareId) -> Self {
        id.0
    }
}

impl From<u64> for ShareId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// Fields to change on an existing share. Omitted fields stay as they are
/// on the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateShare {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_upload: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_date: Option<NaiveDate>,
}

impl UpdateShare {
    pub fn is_empty(&self) -> bool {
        self.permissions.is_none()
            && self.password.is_none()
            && self.public_upload.is_none()
            && self.expire_date.is_none()
    }
}

/// Email notification about a public link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyPublicLink {
    pub recipients: Vec<String>,
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_note: Option<String>,
}
