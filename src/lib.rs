//! pamjit
//!
//! A command-line utility for requesting just-in-time privileged access
//! grants from Google Cloud Privileged Access Manager (PAM).
//!
//! This crate provides:
//! - A PAM API client that checks onboarding status and submits grant
//!   requests scoped to a project or folder
//! - Optional Slack notification of the resulting approval link
//! - Ambient credential resolution via the environment or the gcloud CLI

#![deny(clippy::all)]

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod pam;
pub mod slack;
