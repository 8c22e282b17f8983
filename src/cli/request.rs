//! The `request` subcommand: request an entitlement grant and report the
//! approval link.

use anyhow::{Context, Result};
use clap::{ArgGroup, Args};
use tracing::{debug, warn};

use crate::auth;
use crate::config::Config;
use crate::pam::{PamClient, RequestOptions, ResourceType};
use crate::slack;

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("resource")
        .required(true)
        .args(["project", "folder"])
))]
pub struct RequestArgs {
    /// Entitlement ID to request
    pub entitlement: String,

    /// Project ID hosting the entitlement
    #[arg(short, long)]
    pub project: Option<String>,

    /// Folder ID hosting the entitlement
    #[arg(short, long)]
    pub folder: Option<String>,

    /// Location of the entitlement
    #[arg(short, long, default_value = "global")]
    pub location: String,

    /// Justification attached to the request
    #[arg(short, long, default_value = "")]
    pub justification: String,

    /// Requested duration, e.g. "3600s" (defaults to the entitlement maximum)
    #[arg(short, long, default_value = "")]
    pub duration: String,
}

impl RequestArgs {
    /// Resolve the mutually exclusive resource selectors.
    ///
    /// The clap arg group already guarantees exactly one is present for
    /// parsed invocations; this guards programmatic construction as well.
    fn resource(&self) -> Option<(String, ResourceType)> {
        match (&self.project, &self.folder) {
            (Some(id), None) => Some((id.clone(), ResourceType::Project)),
            (None, Some(id)) => Some((id.clone(), ResourceType::Folder)),
            _ => None,
        }
    }
}

pub async fn run(args: RequestArgs) -> Result<()> {
    let (resource_id, resource_type) = args
        .resource()
        .context("exactly one of --project or --folder must be set")?;

    let options = RequestOptions {
        entitlement_id: args.entitlement,
        location: args.location,
        resource_id,
        justification: args.justification,
        duration: args.duration,
    };

    let access_token = auth::resolve_access_token()
        .await
        .context("unable to resolve Google Cloud credentials")?;

    // Construction failure (including a failed onboarding check) is fatal:
    // proceeding could attempt an unsupported or unauthorized action.
    let client = PamClient::connect(
        &access_token,
        &options.resource_id,
        &options.location,
        resource_type,
    )
    .await
    .context("unable to use the Privileged Access Manager service")?;

    match client
        .request_grant(
            &options.entitlement_id,
            &options.justification,
            &options.duration,
        )
        .await
    {
        Err(e) => {
            // Recoverable at the invocation level: the user can re-run.
            println!("Error requesting entitlement: {}", e);
        }
        Ok(link) if link.is_empty() => {
            debug!("Grant needs no approval, nothing to report");
        }
        Ok(link) => {
            deliver_link(&options, &link).await;
        }
    }

    Ok(())
}

/// Relay the approval link to Slack when configured, printing it otherwise.
///
/// A failed notification degrades to printing; the link is always surfaced
/// exactly once.
async fn deliver_link(options: &RequestOptions, link: &str) {
    let config = Config::load();

    if config.notification_enabled() {
        if let Err(e) = slack::send_grant_notification(&config, options, link).await {
            warn!("Slack notification failed: {}", e);
            println!("Link to request: {}", link);
        }
    } else {
        println!("Link to request: {}", link);
    }
}
