//! Google Cloud Privileged Access Manager (PAM) integration.
//!
//! This module provides functionality for:
//! - Building the parent resource path for a project or folder scope
//! - Checking onboarding status before any grant is attempted
//! - Requesting just-in-time entitlement grants

pub mod client;
pub mod models;

pub use client::PamClient;
pub use models::{CheckOnboardingStatusResponse, Finding, RequestOptions, ResourceType};
