//! Stateless HTTP request builder for the file sharing API.
//!
//! # Design
//! `ShareClient` holds the server URL and the Basic auth credentials and
//! carries no mutable state between calls. Every operation is a `build_*`
//! method that produces an `HttpRequest`; the caller executes the round-trip
//! and decides what to do with the (opaque) response body.

use crate::auth::Credentials;
use crate::error::ApiError;
use crate::form::{self, FormBody};
use crate::http::{HttpMethod, HttpRequest};
use crate::types::{NotifyPublicLink, ShareId, UpdateShare};

/// Root of the sharing endpoints, relative to the server URL.
pub const SHARING_API_PATH: &str = "ocs/v1.php/apps/files_sharing/api/v1";

/// Root of the user sync endpoint, relative to the server URL.
pub const USER_SYNC_PATH: &str = "ocs/v2.php/cloud/user-sync";

/// Synchronous, stateless client for the sharing API.
#[derive(Debug, Clone)]
pub struct ShareClient {
    server_url: String,
    credentials: Credentials,
}

impl ShareClient {
    pub fn new(server_url: &str, credentials: Credentials) -> Result<Self, ApiError> {
        let server_url = server_url.trim().trim_end_matches('/');
        let invalid = || ApiError::InvalidServerUrl(server_url.to_string());
        let (scheme, rest) = server_url.split_once("://").ok_or_else(invalid)?;
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Err(invalid());
        }
        // Paths get appended, so a query or fragment would swallow them.
        if rest.is_empty()
            || rest.starts_with('/')
            || rest.contains(|c: char| c.is_whitespace() || c == '?' || c == '#')
        {
            return Err(invalid());
        }
        Ok(Self {
            server_url: server_url.to_string(),
            credentials,
        })
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn sharing_url(&self) -> String {
        format!("{}/{SHARING_API_PATH}", self.server_url)
    }

    /// `POST shares/pending/{id}`
    pub fn build_accept_pending_share(&self, id: &ShareId) -> HttpRequest {
        self.request(HttpMethod::Post, self.pending_share_url(id), None)
    }

    /// `DELETE shares/pending/{id}`
    pub fn build_decline_pending_share(&self, id: &ShareId) -> HttpRequest {
        self.request(HttpMethod::Delete, self.pending_share_url(id), None)
    }

    /// `DELETE shares/{id}`
    pub fn build_delete_share(&self, id: &ShareId) -> HttpRequest {
        self.request(HttpMethod::Delete, self.share_url(id), None)
    }

    /// `GET shares/{id}`
    pub fn build_get_share_info(&self, id: &ShareId) -> HttpRequest {
        self.request(HttpMethod::Get, self.share_url(id), None)
    }

    /// `PUT shares/{id}` with the changed fields as a form body.
    pub fn build_update_share(&self, id: &ShareId, update: &UpdateShare) -> Result<HttpRequest, ApiError> {
        if update.is_empty() {
            return Err(ApiError::EmptyUpdate);
        }
        let mut body = FormBody::new();
        if let Some(permissions) = update.permissions {
            body.push("permissions", permissions.to_string());
        }
        if let Some(password) = &update.password {
            body.push("password", password.as_str());
        }
        if let Some(public_upload) = update.public_upload {
            body.push("publicUpload", public_upload.to_string());
        }
        if let Some(expire_date) = update.expire_date {
            body.push("expireDate", expire_date.format("%Y-%m-%d").to_string());
        }
        Ok(self.request(HttpMethod::Put, self.share_url(id), Some(body)))
    }

    /// `POST notification/notify-public-link-by-email`
    pub fn build_notify_public_link_by_email(&self, notify: &NotifyPublicLink) -> Result<HttpRequest, ApiError> {
        let recipients: Vec<&str> = notify
            .recipients
            .iter()
            .map(|r| r.trim())
            .filter(|r| !r.is_empty())
            .collect();
        if recipients.is_empty() {
            return Err(ApiError::NoRecipients);
        }
        let link = notify.link.trim();
        if link.is_empty() {
            return Err(ApiError::EmptyLink);
        }

        let mut body = FormBody::new();
        body.push_list("recipients", recipients).push("link", link);
        if let Some(note) = &notify.personal_note {
            body.push("personalNote", note.as_str());
        }
        let url = format!("{}/notification/notify-public-link-by-email", self.sharing_url());
        Ok(self.request(HttpMethod::Post, url, Some(body)))
    }

    /// `POST {server}/ocs/v2.php/cloud/user-sync/{user}`
    pub fn build_user_sync(&self, user_id: &str) -> Result<HttpRequest, ApiError> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(ApiError::EmptyUserId);
        }
        let url = format!(
            "{}/{USER_SYNC_PATH}/{}",
            self.server_url,
            form::encode_component(user_id)
        );
        Ok(self.request(HttpMethod::Post, url, None))
    }

    fn share_url(&self, id: &ShareId) -> String {
        format!("{}/shares/{}", self.sharing_url(), form::encode_component(id.as_str()))
    }

    fn pending_share_url(&self, id: &ShareId) -> String {
        format!(
            "{}/shares/pending/{}",
            self.sharing_url(),
            form::encode_component(id.as_str())
        )
    }

    fn request(&self, method: HttpMethod, url: String, body: Option<FormBody>) -> HttpRequest {
        let mut headers = vec![(
            "authorization".to_string(),
            self.credentials.authorization_header(),
        )];
        if body.is_some() {
            headers.push(("content-type".to_string(), form::CONTENT_TYPE.to_string()));
        }
        HttpRequest {
            method,
            url,
            headers,
            body: body.map(|b| b.encode()),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    const SHARING: &str = "https://cloud.example.com/ocs/v1.php/apps/files_sharing/api/v1";

    fn client() -> ShareClient {
        ShareClient::new("https://cloud.example.com", Credentials::new("admin", "admin")).unwrap()
    }

    fn id(raw: &str) -> ShareId {
        ShareId::new(raw).unwrap()
    }

    #[test]
    fn build_accept_pending_share_produces_correct_request() {
        let req = client().build_accept_pending_share(&id("42"));
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, format!("{SHARING}/shares/pending/42"));
        assert_eq!(req.header("authorization"), Some("Basic YWRtaW46YWRtaW4="));
        assert!(req.body.is_none());
        assert!(req.header("content-type").is_none());
    }

    #[test]
    fn build_decline_pending_share_produces_correct_request() {
        let req = client().build_decline_pending_share(&id("42"));
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.url, format!("{SHARING}/shares/pending/42"));
        assert!(req.body.is_none());
    }

    #[test]
    fn build_delete_share_produces_correct_request() {
        let req = client().build_delete_share(&id("115470"));
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.url, format!("{SHARING}/shares/115470"));
        assert_eq!(req.headers.len(), 1);
    }

    #[test]
    fn build_get_share_info_produces_correct_request() {
        let req = client().build_get_share_info(&id("115464"));
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, format!("{SHARING}/shares/115464"));
    }

    #[test]
    fn build_update_share_encodes_form() {
        let update = UpdateShare {
            expire_date: NaiveDate::from_ymd_opt(2017, 1, 1),
            ..UpdateShare::default()
        };
        let req = client().build_update_share(&id("115470"), &update).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.url, format!("{SHARING}/shares/115470"));
        assert_eq!(req.header("content-type"), Some("application/x-www-form-urlencoded"));
        assert_eq!(req.body.as_deref(), Some("expireDate=2017-01-01"));
    }

    #[test]
    fn build_update_share_writes_every_field() {
        let update = UpdateShare {
            permissions: Some(15),
            password: Some("s3cret!".to_string()),
            public_upload: Some(true),
            expire_date: NaiveDate::from_ymd_opt(2030, 12, 31),
        };
        let req = client().build_update_share(&id("9"), &update).unwrap();
        assert_eq!(
            req.body.as_deref(),
            Some("permissions=15&password=s3cret%21&publicUpload=true&expireDate=2030-12-31")
        );
    }

    #[test]
    fn build_update_share_rejects_empty_update() {
        let err = client()
            .build_update_share(&id("9"), &UpdateShare::default())
            .unwrap_err();
        assert_eq!(err, ApiError::EmptyUpdate);
    }

    #[test]
    fn build_notify_public_link_encodes_recipients() {
        let notify = NotifyPublicLink {
            recipients: vec!["user@example.com".to_string()],
            link: "https://cloud.example.com/index.php/s/sfU97LuwePm5omD".to_string(),
            personal_note: Some("A personal note.".to_string()),
        };
        let req = client().build_notify_public_link_by_email(&notify).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, format!("{SHARING}/notification/notify-public-link-by-email"));
        assert_eq!(
            req.body.as_deref(),
            Some(
                "recipients%5B0%5D=user%40example.com\
                 &link=https%3A%2F%2Fcloud.example.com%2Findex.php%2Fs%2FsfU97LuwePm5omD\
                 &personalNote=A%20personal%20note."
            )
        );
    }

    #[test]
    fn build_notify_public_link_skips_blank_recipients() {
        let notify = NotifyPublicLink {
            recipients: vec![" ".to_string(), "b@example.com".to_string()],
            link: "https://x".to_string(),
            personal_note: None,
        };
        let req = client().build_notify_public_link_by_email(&notify).unwrap();
        assert_eq!(
            req.body.as_deref(),
            Some("recipients%5B0%5D=b%40example.com&link=https%3A%2F%2Fx")
        );
    }

    #[test]
    fn build_notify_public_link_requires_recipient_and_link() {
        let mut notify = NotifyPublicLink {
            recipients: Vec::new(),
            link: "https://x".to_string(),
            personal_note: None,
        };
        assert_eq!(
            client().build_notify_public_link_by_email(&notify).unwrap_err(),
            ApiError::NoRecipients
        );
        notify.recipients.push("a@example.com".to_string());
        notify.link = "  ".to_string();
        assert_eq!(
            client().build_notify_public_link_by_email(&notify).unwrap_err(),
            ApiError::EmptyLink
        );
    }

    #[test]
    fn build_user_sync_targets_v2_endpoint() {
        let req = client().build_user_sync("admin").unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "https://cloud.example.com/ocs/v2.php/cloud/user-sync/admin");
        assert!(client().build_user_sync(" ").is_err());
    }

    #[test]
    fn share_id_is_escaped_in_path() {
        let req = client().build_delete_share(&id("a/b c"));
        assert_eq!(req.url, format!("{SHARING}/shares/a%2Fb%20c"));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = ShareClient::new("http://localhost:8080//", Credentials::new("u", "p")).unwrap();
        assert_eq!(client.server_url(), "http://localhost:8080");
        let req = client.build_get_share_info(&id("1"));
        assert_eq!(
            req.url,
            "http://localhost:8080/ocs/v1.php/apps/files_sharing/api/v1/shares/1"
        );
    }

    #[test]
    fn placeholder_server_url_is_rejected() {
        let err = ShareClient::new("{oc-examples-server-url}", Credentials::new("u", "p")).unwrap_err();
        assert!(matches!(err, ApiError::InvalidServerUrl(_)));
    }

    #[test]
    fn server_url_needs_a_host() {
        for bad in [
            "http://",
            "https:///path",
            "ftp://example.com",
            "http://exa mple.com",
            "https://h/?a=1",
            "https://h/cloud?x=y",
            "https://h#frag",
        ] {
            assert!(
                ShareClient::new(bad, Credentials::new("u", "p")).is_err(),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn scheme_is_case_insensitive() {
        let client = ShareClient::new("HTTPS://Cloud.Example.com/", Credentials::new("u", "p")).unwrap();
        let req = client.build_delete_share(&id("3"));
        assert_eq!(
            req.url,
            "HTTPS://Cloud.Example.com/ocs/v1.php/apps/files_sharing/api/v1/shares/3"
        );
        assert!(ShareClient::new("Http://localhost:8080", Credentials::new("u", "p")).is_ok());
    }

    #[test]
    fn query_or_fragment_in_server_url_is_rejected() {
        let err = ShareClient::new("https://h/?a=1", Credentials::new("u", "p")).unwrap_err();
        assert_eq!(err, ApiError::InvalidServerUrl("https://h/?a=1".to_string()));
    }

    #[test]
    fn credentials_flow_into_every_request() {
        let client = ShareClient::new("https://h", Credentials::new("your.username", "your.password")).unwrap();
        let expected = Credentials::new("your.username", "your.password").authorization_header();
        let share = id("1");
        for req in [
            client.build_accept_pending_share(&share),
            client.build_decline_pending_share(&share),
            client.build_delete_share(&share),
            client.build_get_share_info(&share),
        ] {
            assert_eq!(req.header("authorization"), Some(expected.as_str()));
        }
    }
}
