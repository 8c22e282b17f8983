//! Data models for Google Cloud Privileged Access Manager.

use std::fmt;

use serde::Deserialize;

/// Kind of resource a grant request is scoped to.
///
/// Selects which path segment prefixes the resource identifier in the API
/// parent path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Project,
    Folder,
}

impl ResourceType {
    /// Path segment used when building the parent resource name.
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Project => "projects",
            Self::Folder => "folders",
        }
    }

    /// Cloud Console query parameter selecting this resource kind.
    pub fn console_query_key(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Folder => "folder",
        }
    }
}

/// Parameters for a single grant request.
///
/// Built once from CLI input, never mutated.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Entitlement identifier under the target resource.
    pub entitlement_id: String,

    /// Entitlement location (e.g. "global").
    pub location: String,

    /// Project or folder identifier.
    pub resource_id: String,

    /// Justification attached to the request; may be empty.
    pub justification: String,

    /// Requested duration (e.g. "3600s"); empty defers to the entitlement
    /// maximum.
    pub duration: String,
}

/// Response from the `checkOnboardingStatus` endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckOnboardingStatusResponse {
    /// Service account PAM uses to act on the resource.
    #[serde(default)]
    pub service_account: String,

    /// Onboarding deficiencies; empty when the resource is ready for use.
    #[serde(default)]
    pub findings: Vec<Finding>,
}

/// A single onboarding deficiency reported by the status check.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub iam_access_denied: Option<IamAccessDenied>,
}

/// Principals whose IAM policy blocks PAM from operating on the resource.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IamAccessDenied {
    #[serde(default)]
    pub members_blocking_access: Vec<String>,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.iam_access_denied {
            Some(denied) => write!(
                f,
                "IAM access denied for: {}",
                denied.members_blocking_access.join(", ")
            ),
            None => write!(f, "unknown finding"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_type_path_segments() {
        assert_eq!(ResourceType::Project.path_segment(), "projects");
        assert_eq!(ResourceType::Folder.path_segment(), "folders");
    }

    #[test]
    fn test_finding_display() {
        let finding = Finding {
            iam_access_denied: Some(IamAccessDenied {
                members_blocking_access: vec![
                    "user:a@example.com".to_string(),
                    "group:ops@example.com".to_string(),
                ],
            }),
        };
        assert_eq!(
            finding.to_string(),
            "IAM access denied for: user:a@example.com, group:ops@example.com"
        );

        let opaque = Finding {
            iam_access_denied: None,
        };
        assert_eq!(opaque.to_string(), "unknown finding");
    }

    #[test]
    fn test_onboarding_response_deserialization() {
        let body = r#"{
            "serviceAccount": "pam@proj-a.iam.gserviceaccount.com",
            "findings": [
                {"iamAccessDenied": {"membersBlockingAccess": ["user:a@example.com"]}}
            ]
        }"#;

        let response: CheckOnboardingStatusResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.service_account, "pam@proj-a.iam.gserviceaccount.com");
        assert_eq!(response.findings.len(), 1);
        assert_eq!(
            response.findings[0]
                .iam_access_denied
                .as_ref()
                .unwrap()
                .members_blocking_access,
            vec!["user:a@example.com".to_string()]
        );
    }

    #[test]
    fn test_onboarding_response_defaults() {
        let response: CheckOnboardingStatusResponse = serde_json::from_str("{}").unwrap();
        assert!(response.service_account.is_empty());
        assert!(response.findings.is_empty());
    }
}
