//! Error types for the pamjit application.
//!
//! Uses `thiserror` for library-style errors with automatic `Display` and `Error` implementations.

use thiserror::Error;

/// Privileged Access Manager API errors.
#[derive(Error, Debug)]
pub enum PamError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unauthorized (401): token may be expired")]
    Unauthorized,

    #[error("permission denied (403)")]
    Forbidden,

    #[error("resource is not onboarded to Privileged Access Manager, findings: [{}]", .findings.join("; "))]
    NotOnboarded { findings: Vec<String> },

    #[error("grant request failed: {0}")]
    GrantRequestFailed(String),

    #[error("invalid API response: {0}")]
    InvalidResponse(String),
}

/// Slack notification errors. Always absorbed by the caller; a failed
/// notification falls back to printing the link.
#[derive(Error, Debug)]
pub enum SlackError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Slack API error: {0}")]
    Api(String),

    #[error("invalid Slack response: {0}")]
    InvalidResponse(String),
}

/// Ambient credential resolution errors.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("failed to run gcloud: {0}")]
    GcloudUnavailable(String),

    #[error("gcloud auth print-access-token failed: {0}")]
    GcloudFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_onboarded_lists_every_finding() {
        let err = PamError::NotOnboarded {
            findings: vec![
                "IAM access denied for: user:a@example.com".to_string(),
                "IAM access denied for: group:ops@example.com".to_string(),
            ],
        };
        let message = err.to_string();
        assert!(message.contains("user:a@example.com"));
        assert!(message.contains("group:ops@example.com"));
    }

    #[test]
    fn test_slack_api_error_message() {
        let err = SlackError::Api("channel_not_found".into());
        assert_eq!(err.to_string(), "Slack API error: channel_not_found");
    }
}
