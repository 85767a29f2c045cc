use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::Deserialize;
use tokio::{net::TcpListener, sync::RwLock};

pub const SHARING_PREFIX: &str = "/ocs/v1.php/apps/files_sharing/api/v1";
pub const USER_SYNC_PREFIX: &str = "/ocs/v2.php/cloud/user-sync";

/// Acceptance state of a share, numbered the way the sharing API reports it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShareState {
    Accepted = 0,
    Pending = 1,
    Declined = 2,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Share {
    pub id: u64,
    pub path: String,
    pub state: ShareState,
    pub permissions: u32,
    pub password: Option<String>,
    pub public_upload: bool,
    pub expire_date: Option<String>,
}

impl Share {
    pub fn new(id: u64, path: &str, state: ShareState) -> Self {
        Self {
            id,
            path: path.to_string(),
            state,
            permissions: 1,
            password: None,
            public_upload: false,
            expire_date: None,
        }
    }

    fn to_xml(&self) -> String {
        format!(
            "<element><id>{}</id><path>{}</path><state>{}</state><permissions>{}</permissions>\
             <share_with_password>{}</share_with_password><public_upload>{}</public_upload>\
             <expiration>{}</expiration></element>",
            self.id,
            escape_xml(&self.path),
            self.state as u8,
            self.permissions,
            self.password.is_some(),
            self.public_upload,
            escape_xml(self.expire_date.as_deref().unwrap_or_default()),
        )
    }
}

/// Shared server state: the share table and the one account allowed in.
#[derive(Clone)]
pub struct AppState {
    shares: Arc<RwLock<HashMap<u64, Share>>>,
    username: Arc<str>,
    password: Arc<str>,
}

impl AppState {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            shares: Arc::new(RwLock::new(HashMap::new())),
            username: username.into(),
            password: password.into(),
        }
    }

    /// State preloaded with two pending and two accepted shares.
    pub fn seeded(username: &str, password: &str) -> Self {
        let shares = [
            Share::new(1, "/Shared/report.pdf", ShareState::Pending),
            Share::new(2, "/Shared/photos", ShareState::Pending),
            Share::new(115464, "/Documents", ShareState::Accepted),
            Share::new(115470, "/Project", ShareState::Accepted),
        ];
        Self {
            shares: Arc::new(RwLock::new(shares.into_iter().map(|s| (s.id, s)).collect())),
            ..Self::new(username, password)
        }
    }

    pub async fn insert(&self, share: Share) {
        self.shares.write().await.insert(share.id, share);
    }

    pub async fn share(&self, id: u64) -> Option<Share> {
        self.shares.read().await.get(&id).cloned()
    }
}

pub fn app(state: AppState) -> Router {
    let sharing = Router::new()
        .route(
            "/shares/pending/{id}",
            post(accept_pending_share).delete(decline_pending_share),
        )
        .route(
            "/shares/{id}",
            get(get_share).put(update_share).delete(delete_share),
        )
        .route(
            "/notification/notify-public-link-by-email",
            post(notify_public_link),
        );

    Router::new()
        .nest(SHARING_PREFIX, sharing)
        .route(&format!("{USER_SYNC_PREFIX}/{{user}}"), post(user_sync))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_basic_auth))
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}

async fn require_basic_auth(State(state): State<AppState>, request: Request, next: Next) -> Response {
    match basic_credentials(request.headers()) {
        Some((user, pass)) if user == *state.username && pass == *state.password => next.run(request).await,
        _ => {
            tracing::warn!(uri = %request.uri(), "rejected request without valid credentials");
            let mut response = ocs(StatusCode::UNAUTHORIZED, 997, "Unauthorised", String::new());
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                header::HeaderValue::from_static("Basic realm=\"mock\""),
            );
            response
        }
    }
}

/// Decode `authorization: Basic ...` into `(username, password)`.
pub fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let encoded = value.strip_prefix("Basic ")?;
    let decoded = String::from_utf8(BASE64.decode(encoded).ok()?).ok()?;
    let (user, pass) = decoded.split_once(':')?;
    Some((user.to_string(), pass.to_string()))
}

async fn accept_pending_share(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    let mut shares = state.shares.write().await;
    match shares.get_mut(&id) {
        Some(share) if share.state != ShareState::Accepted => {
            share.state = ShareState::Accepted;
            tracing::info!(id, "share accepted");
            ocs_v1(100, "OK", share.to_xml())
        }
        Some(_) => ocs_v1(404, "Share already accepted", String::new()),
        None => ocs_v1(404, "Wrong share ID, share doesn't exist", String::new()),
    }
}

async fn decline_pending_share(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    let mut shares = state.shares.write().await;
    match shares.get_mut(&id) {
        Some(share) if share.state != ShareState::Declined => {
            share.state = ShareState::Declined;
            tracing::info!(id, "share declined");
            ocs_v1(100, "OK", share.to_xml())
        }
        Some(_) => ocs_v1(404, "Share already declined", String::new()),
        None => ocs_v1(404, "Wrong share ID, share doesn't exist", String::new()),
    }
}

async fn get_share(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    match state.shares.read().await.get(&id) {
        Some(share) => ocs_v1(100, "OK", share.to_xml()),
        None => ocs_v1(404, "Wrong share ID, share doesn't exist", String::new()),
    }
}

async fn delete_share(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    match state.shares.write().await.remove(&id) {
        Some(_) => {
            tracing::info!(id, "share deleted");
            ocs_v1(100, "OK", String::new())
        }
        None => ocs_v1(404, "Wrong share ID, share doesn't exist", String::new()),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateShareForm {
    pub permissions: Option<u32>,
    pub password: Option<String>,
    #[serde(rename = "publicUpload")]
    pub public_upload: Option<String>,
    #[serde(rename = "expireDate")]
    pub expire_date: Option<String>,
}

async fn update_share(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Form(input): Form<UpdateShareForm>,
) -> Response {
    let public_upload = match input.public_upload.as_deref() {
        None => None,
        Some("true") => Some(true),
        Some("false") => Some(false),
        Some(_) => return ocs_v1(400, "Invalid publicUpload value", String::new()),
    };
    if input.permissions.is_none()
        && input.password.is_none()
        && public_upload.is_none()
        && input.expire_date.is_none()
    {
        return ocs_v1(400, "Wrong or no update parameter given", String::new());
    }

    let mut shares = state.shares.write().await;
    let Some(share) = shares.get_mut(&id) else {
        return ocs_v1(404, "Wrong share ID, share doesn't exist", String::new());
    };
    if let Some(permissions) = input.permissions {
        share.permissions = permissions;
    }
    if let Some(password) = input.password {
        share.password = Some(password);
    }
    if let Some(public_upload) = public_upload {
        share.public_upload = public_upload;
    }
    if let Some(expire_date) = input.expire_date {
        share.expire_date = Some(expire_date);
    }
    tracing::info!(id, "share updated");
    ocs_v1(100, "OK", share.to_xml())
}

async fn notify_public_link(Form(fields): Form<Vec<(String, String)>>) -> Response {
    let recipients: Vec<&str> = fields
        .iter()
        .filter(|(name, _)| name.starts_with("recipients["))
        .map(|(_, value)| value.as_str())
        .collect();
    let link = fields
        .iter()
        .find(|(name, _)| name == "link")
        .map(|(_, value)| value.as_str())
        .unwrap_or_default();

    if recipients.is_empty() || link.is_empty() {
        return ocs_v1(400, "Missing recipients or link", String::new());
    }
    tracing::info!(count = recipients.len(), "public link notification sent");
    ocs_v1(100, "OK", String::new())
}

async fn user_sync(Path(user): Path<String>) -> Response {
    tracing::info!(%user, "user synced");
    ocs(StatusCode::OK, 200, "OK", String::new())
}

/// OCS v1 always answers HTTP 200 and reports failures in `statuscode`.
fn ocs_v1(code: u16, message: &str, data: String) -> Response {
    ocs(StatusCode::OK, code, message, data)
}

fn ocs(status: StatusCode, code: u16, message: &str, data: String) -> Response {
    let meta_status = if code == 100 || code == 200 { "ok" } else { "failure" };
    let body = format!(
        "<?xml version=\"1.0\"?>\n<ocs><meta><status>{meta_status}</status><statuscode>{code}</statuscode>\
         <message>{}</message></meta><data>{data}</data></ocs>\n",
        escape_xml(message)
    );
    (status, [(header::CONTENT_TYPE, "text/xml; charset=UTF-8")], body).into_response()
}

fn escape_xml(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
