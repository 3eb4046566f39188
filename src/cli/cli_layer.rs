// CLI layer - argument parsing, commands and terminal rendering.

#[path = "commands.rs"]
pub mod commands;

#[path = "render.rs"]
pub mod render;

use crate::core::moderation::Role;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Check chat messages for contact details and off-platform payment requests.
#[derive(Debug, Parser)]
#[command(name = "message-moderation", version, about)]
pub struct Cli {
    /// Where verdicts come from
    #[arg(long, env = "MODERATION_BACKEND", value_enum, default_value_t = Backend::Local)]
    pub backend: Backend,

    /// Base URL of the hosted functions (remote backend only)
    #[arg(long, env = "MODERATION_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Bearer token for the hosted functions (remote backend only)
    #[arg(long, env = "MODERATION_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Logged-in user; leave unset to act as a logged-out caller
    #[arg(long, env = "MODERATION_USER_ID")]
    pub user_id: Option<String>,

    /// Role of the logged-in user (admin or member)
    #[arg(long, env = "MODERATION_USER_ROLE", default_value = "member")]
    pub user_role: Role,

    /// Deadline for one moderation call, in seconds
    #[arg(long, env = "MODERATION_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// JSON file overriding the default classifier policy
    #[arg(long, env = "MODERATION_POLICY_FILE")]
    pub policy_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// In-process classifier
    Local,
    /// Hosted `moderate-message` function
    Remote,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Moderate a single message
    Check {
        message: String,

        /// Print the verdict as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the built-in sample messages (admin only)
    Samples,
    /// Print the effective classifier policy
    Policy,
}
