//! Ambient Google Cloud credential resolution.
//!
//! Checks in order:
//! 1. `GOOGLE_OAUTH_ACCESS_TOKEN` - static token from the environment
//! 2. `gcloud auth print-access-token` - the gcloud CLI's cached credentials
//!
//! No token is stored, cached, or refreshed by this application.

use tokio::process::Command;
use tracing::debug;

use crate::error::AuthError;

/// Environment variable holding a ready-to-use access token.
const TOKEN_ENV_VAR: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";

/// Resolve an access token for the PAM API.
pub async fn resolve_access_token() -> Result<String, AuthError> {
    if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
        if !token.is_empty() {
            debug!("Using access token from {}", TOKEN_ENV_VAR);
            return Ok(token);
        }
    }

    debug!("Resolving access token via gcloud");

    let output = Command::new("gcloud")
        .args(["auth", "print-access-token"])
        .output()
        .await
        .map_err(|e| AuthError::GcloudUnavailable(e.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AuthError::GcloudFailed(stderr.trim().to_string()));
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Err(AuthError::GcloudFailed("no token printed".to_string()));
    }

    Ok(token)
}
