//! Slack notification for grant approval links.
//!
//! Posts a single `chat.postMessage` call. Failures are returned to the
//! caller, which falls back to printing the link; nothing here is ever
//! fatal to the invocation.

use std::time::Duration as StdDuration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::Config;
use crate::error::SlackError;
use crate::pam::RequestOptions;

/// Slack Web API base URL.
const SLACK_BASE_URL: &str = "https://slack.com/api";

/// HTTP request timeout.
const HTTP_TIMEOUT: StdDuration = StdDuration::from_secs(30);

/// HTTP connection timeout.
const HTTP_CONNECT_TIMEOUT: StdDuration = StdDuration::from_secs(10);

/// Minimal Slack Web API client.
pub struct SlackClient {
    http_client: reqwest::Client,
    base_url: String,
    token: String,
}

impl SlackClient {
    /// Create a client against the production Slack API.
    pub fn new(token: impl Into<String>) -> Result<Self, SlackError> {
        Self::with_base_url(SLACK_BASE_URL, token)
    }

    /// Create a client against an explicit API endpoint.
    pub fn with_base_url(base_url: &str, token: impl Into<String>) -> Result<Self, SlackError> {
        let http_client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .connect_timeout(HTTP_CONNECT_TIMEOUT)
            .build()
            .map_err(SlackError::Network)?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    /// Post a plain-text message to a channel.
    ///
    /// Slack reports API-level failures as HTTP 200 with `ok: false`; both
    /// transport and API failures surface as `SlackError`.
    pub async fn post_message(&self, channel: &str, text: &str) -> Result<(), SlackError> {
        let url = format!("{}/chat.postMessage", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&PostMessageBody { channel, text })
            .send()
            .await
            .map_err(SlackError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SlackError::Api(format!("HTTP {}", status)));
        }

        let body: PostMessageResponse = response
            .json()
            .await
            .map_err(|e| SlackError::InvalidResponse(e.to_string()))?;

        if body.ok {
            Ok(())
        } else {
            Err(SlackError::Api(
                body.error.unwrap_or_else(|| "unknown error".to_string()),
            ))
        }
    }
}

/// Send the approval link for a grant request to the configured channel.
pub async fn send_grant_notification(
    config: &Config,
    options: &RequestOptions,
    link: &str,
) -> Result<(), SlackError> {
    let client = SlackClient::new(&config.slack.token)?;
    client
        .post_message(&config.slack.channel, &notification_text(options, link))
        .await?;

    info!("Sent approval link to Slack channel {}", config.slack.channel);
    Ok(())
}

/// Message text for a grant notification.
fn notification_text(options: &RequestOptions, link: &str) -> String {
    let mut text = format!(
        "Privileged access requested: entitlement `{}` on `{}` (location `{}`)",
        options.entitlement_id, options.resource_id, options.location
    );

    if !options.justification.is_empty() {
        text.push_str(&format!("\nJustification: {}", options.justification));
    }

    text.push_str(&format!("\nApprove or inspect: {}", link));
    text
}

// --- API Request/Response Types ---

#[derive(Debug, Serialize)]
struct PostMessageBody<'a> {
    channel: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> RequestOptions {
        RequestOptions {
            entitlement_id: "ent-1".to_string(),
            location: "global".to_string(),
            resource_id: "proj-a".to_string(),
            justification: "incident 1234".to_string(),
            duration: String::new(),
        }
    }

    #[test]
    fn test_notification_text_contains_request_details() {
        let text = notification_text(&options(), "https://approve.example/ent-1");

        assert!(text.contains("ent-1"));
        assert!(text.contains("proj-a"));
        assert!(text.contains("global"));
        assert!(text.contains("incident 1234"));
        assert!(text.contains("https://approve.example/ent-1"));
    }

    #[test]
    fn test_notification_text_skips_empty_justification() {
        let mut opts = options();
        opts.justification = String::new();

        let text = notification_text(&opts, "https://approve.example/ent-1");
        assert!(!text.contains("Justification"));
    }
}
