//! CLI command definitions and request dispatch.

use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};
use share_core::{ApiError, HttpRequest, NotifyPublicLink, ShareClient, ShareId, UpdateShare};

use crate::config::ConnectionArgs;

/// Send a single request to the file sharing API and print the response body.
#[derive(Debug, Parser)]
#[command(name = "share", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Accept a pending share
    Accept {
        /// Share ID
        share_id: String,
    },
    /// Decline a pending share
    Decline {
        /// Share ID
        share_id: String,
    },
    /// Delete a share
    Delete {
        /// Share ID
        share_id: String,
    },
    /// Show information about a share
    Info {
        /// Share ID
        share_id: String,
    },
    /// Change properties of a share
    Update(UpdateArgs),
    /// Email a public link to recipients
    NotifyLink(NotifyLinkArgs),
    /// Trigger a sync of one user account
    UserSync {
        /// User ID
        user: String,
    },
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Share ID
    pub share_id: String,

    /// Permission bitmask
    #[arg(long)]
    pub permissions: Option<u32>,

    /// Password protecting a public link
    #[arg(long)]
    pub share_password: Option<String>,

    /// Allow uploads into a public link folder
    #[arg(long, action = ArgAction::Set)]
    pub public_upload: Option<bool>,

    /// Expiration date (YYYY-MM-DD)
    #[arg(long)]
    pub expire_date: Option<NaiveDate>,
}

#[derive(Debug, Args)]
pub struct NotifyLinkArgs {
    /// Recipient email address (repeatable)
    #[arg(long = "recipient", required = true)]
    pub recipients: Vec<String>,

    /// Public link to send
    #[arg(long)]
    pub link: String,

    /// Personal note included in the email
    #[arg(long)]
    pub note: Option<String>,
}

impl Command {
    /// Name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Accept { .. } => "accept",
            Command::Decline { .. } => "decline",
            Command::Delete { .. } => "delete",
            Command::Info { .. } => "info",
            Command::Update(_) => "update",
            Command::NotifyLink(_) => "notify-link",
            Command::UserSync { .. } => "user-sync",
        }
    }

    pub fn build_request(&self, client: &ShareClient) -> Result<HttpRequest, ApiError> {
        match self {
            Command::Accept { share_id } => Ok(client.build_accept_pending_share(&ShareId::new(share_id)?)),
            Command::Decline { share_id } => Ok(client.build_decline_pending_share(&ShareId::new(share_id)?)),
            Command::Delete { share_id } => Ok(client.build_delete_share(&ShareId::new(share_id)?)),
            Command::Info { share_id } => Ok(client.build_get_share_info(&ShareId::new(share_id)?)),
            Command::Update(args) => {
                let update = UpdateShare {
                    permissions: args.permissions,
                    password: args.share_password.clone(),
                    public_upload: args.public_upload,
                    expire_date: args.expire_date,
                };
                client.build_update_share(&ShareId::new(&args.share_id)?, &update)
            }
            Command::NotifyLink(args) => client.build_notify_public_link_by_email(&NotifyPublicLink {
                recipients: args.recipients.clone(),
                link: args.link.clone(),
                personal_note: args.note.clone(),
            }),
            Command::UserSync { user } => client.build_user_sync(user),
        }
    }
}
