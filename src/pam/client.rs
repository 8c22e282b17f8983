//! Privileged Access Manager API client for grant requests.
//!
//! Uses the PAM REST API to check onboarding status and submit grant
//! requests for a single resource scope.

use std::time::Duration as StdDuration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use super::models::{CheckOnboardingStatusResponse, ResourceType};
use crate::error::PamError;

/// PAM API base URL.
const PAM_BASE_URL: &str = "https://privilegedaccessmanager.googleapis.com";

/// PAM API version segment.
const API_VERSION: &str = "v1";

/// Cloud Console view listing the caller's own grant requests.
const CONSOLE_GRANTS_URL: &str =
    "https://console.cloud.google.com/iam-admin/pam/grants/my-requests";

/// Grant state meaning an approver still has to act on the request.
const GRANT_STATE_APPROVAL_AWAITED: &str = "APPROVAL_AWAITED";

/// HTTP request timeout.
const HTTP_TIMEOUT: StdDuration = StdDuration::from_secs(30);

/// HTTP connection timeout.
const HTTP_CONNECT_TIMEOUT: StdDuration = StdDuration::from_secs(10);

/// PAM API client scoped to one project or folder.
#[derive(Debug)]
pub struct PamClient {
    http_client: Client,
    base_url: String,
    access_token: String,
    resource_id: String,
    resource_type: ResourceType,
    location: String,
}

impl PamClient {
    /// Connect to the production PAM endpoint.
    ///
    /// Performs the onboarding-status check as a construction precondition;
    /// a client is only handed out for a resource that is usable.
    pub async fn connect(
        access_token: &str,
        resource_id: &str,
        location: &str,
        resource_type: ResourceType,
    ) -> Result<Self, PamError> {
        Self::connect_to(PAM_BASE_URL, access_token, resource_id, location, resource_type).await
    }

    /// Connect against an explicit API endpoint.
    pub async fn connect_to(
        base_url: &str,
        access_token: &str,
        resource_id: &str,
        location: &str,
        resource_type: ResourceType,
    ) -> Result<Self, PamError> {
        let http_client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .connect_timeout(HTTP_CONNECT_TIMEOUT)
            .build()
            .map_err(PamError::Network)?;

        let client = Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
            resource_id: resource_id.to_string(),
            resource_type,
            location: location.to_string(),
        };

        client.check_onboarding_status().await?;

        Ok(client)
    }

    /// Parent resource name scoping every API call made by this client.
    fn parent(&self) -> String {
        format!(
            "{}/{}/locations/{}",
            self.resource_type.path_segment(),
            self.resource_id,
            self.location
        )
    }

    /// Check that the resource is onboarded to PAM.
    ///
    /// Permission denied on the status endpoint is treated as onboarded
    /// (fail-open): the caller may lack visibility into onboarding state
    /// while still being allowed to request grants, and the grant request
    /// itself remains subject to the service's own authorization.
    async fn check_onboarding_status(&self) -> Result<(), PamError> {
        let url = format!(
            "{}/{}/{}:checkOnboardingStatus",
            self.base_url,
            API_VERSION,
            self.parent()
        );

        debug!("Checking onboarding status at {}", url);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(PamError::Network)?;

        let status = response.status();
        match status.as_u16() {
            200 => {
                let body: CheckOnboardingStatusResponse = response
                    .json()
                    .await
                    .map_err(|e| PamError::InvalidResponse(e.to_string()))?;

                if body.findings.is_empty() {
                    info!("Resource {} is onboarded", self.parent());
                    Ok(())
                } else {
                    let findings: Vec<String> =
                        body.findings.iter().map(ToString::to_string).collect();
                    Err(PamError::NotOnboarded { findings })
                }
            }
            403 => {
                // Fail-open branch: treat permission denied as onboarded.
                // The response body is intentionally not inspected here.
                warn!(
                    "Onboarding status check denied for {}, treating as onboarded",
                    self.parent()
                );
                Ok(())
            }
            401 => Err(PamError::Unauthorized),
            _ => {
                let body = response.text().await.unwrap_or_default();
                error!(
                    "Onboarding status check failed: HTTP {} - {}",
                    status, body
                );
                Err(PamError::InvalidResponse(format!("HTTP {}", status)))
            }
        }
    }

    /// Request a grant for an entitlement under this client's resource scope.
    ///
    /// Returns the link the requester can use to inspect the request while it
    /// waits for approval. An empty link means no further action is needed
    /// (the grant was auto-approved).
    pub async fn request_grant(
        &self,
        entitlement_id: &str,
        justification: &str,
        duration: &str,
    ) -> Result<String, PamError> {
        let url = format!(
            "{}/{}/{}/entitlements/{}/grants",
            self.base_url,
            API_VERSION,
            self.parent(),
            entitlement_id
        );

        let body = CreateGrantBody {
            requested_duration: (!duration.is_empty()).then(|| duration.to_string()),
            justification: (!justification.is_empty()).then(|| Justification {
                unstructured_justification: justification.to_string(),
            }),
        };

        info!(
            "Requesting grant for entitlement {} on {}",
            entitlement_id,
            self.parent()
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(PamError::Network)?;

        let status = response.status();
        match status.as_u16() {
            200 | 201 => {
                let grant: GrantResponse = response
                    .json()
                    .await
                    .map_err(|e| PamError::InvalidResponse(e.to_string()))?;

                info!("Created grant {} in state {}", grant.name, grant.state);
                Ok(self.approval_link(&grant))
            }
            401 => Err(PamError::Unauthorized),
            403 => Err(PamError::Forbidden),
            _ => {
                let body = response.text().await.unwrap_or_default();
                error!("Grant request failed: HTTP {} - {}", status, body);
                Err(PamError::GrantRequestFailed(format!("HTTP {}", status)))
            }
        }
    }

    /// Link for a grant that still needs approval; empty for any other state.
    fn approval_link(&self, grant: &GrantResponse) -> String {
        if grant.state != GRANT_STATE_APPROVAL_AWAITED {
            debug!("Grant {} is {}, no approval pending", grant.name, grant.state);
            return String::new();
        }

        format!(
            "{}?{}={}",
            CONSOLE_GRANTS_URL,
            self.resource_type.console_query_key(),
            self.resource_id
        )
    }
}

// --- API Request/Response Types ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateGrantBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    requested_duration: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    justification: Option<Justification>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Justification {
    unstructured_justification: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GrantResponse {
    #[serde(default)]
    name: String,

    #[serde(default)]
    state: String,
}
