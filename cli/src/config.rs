//! Connection settings: flags, environment variables, placeholder defaults.
//!
//! The defaults are the placeholders the sharing API documentation ships
//! with. Running without configuring a server therefore fails on the server
//! URL before anything is sent.

use std::time::Duration;

use clap::Args;
use share_core::{ApiError, Credentials, ShareClient};

pub const PLACEHOLDER_SERVER_URL: &str = "{oc-examples-server-url}";

/// Where to send requests and who to authenticate as.
#[derive(Debug, Clone, Args)]
pub struct ConnectionArgs {
    /// Server base URL, e.g. https://cloud.example.com
    #[arg(long, global = true, env = "SHARE_SERVER_URL", default_value = PLACEHOLDER_SERVER_URL)]
    pub server: String,

    /// Basic auth username
    #[arg(long, global = true, env = "SHARE_USERNAME", default_value = "your.username")]
    pub username: String,

    /// Basic auth password
    #[arg(
        long,
        global = true,
        env = "SHARE_PASSWORD",
        default_value = "your.password",
        hide_env_values = true,
        hide_default_value = true
    )]
    pub password: String,

    /// Overall request timeout in seconds
    #[arg(long, global = true, env = "SHARE_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

/// Resolved settings for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server_url: String,
    pub credentials: Credentials,
    pub timeout: Duration,
}

impl Settings {
    pub fn client(&self) -> Result<ShareClient, ApiError> {
        ShareClient::new(&self.server_url, self.credentials.clone())
    }
}

impl From<&ConnectionArgs> for Settings {
    fn from(args: &ConnectionArgs) -> Self {
        Self {
            server_url: args.server.clone(),
            credentials: Credentials::new(args.username.as_str(), args.password.as_str()),
            timeout: Duration::from_secs(args.timeout_secs),
        }
    }
}
