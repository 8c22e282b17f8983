//! Command-line interface definitions and dispatch.

pub mod request;

use clap::{Parser, Subcommand};

/// Request just-in-time privileged access from Google Cloud PAM.
#[derive(Parser, Debug)]
#[command(name = "pamjit", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Request an entitlement grant.
    Request(request::RequestArgs),
}
