// This is the entry point of the moderation CLI.
//
// **Architecture Overview:**
// - `core/` = Business logic (classifier, detectors, moderation service)
// - `infra/` = Implementations of core traits (remote function, session, policy file)
// - `cli/` = Command-line adapter (arguments, commands, rendering)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Dispatch the requested command

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "cli/cli_layer.rs"]
mod cli;
#[path = "core/core_layer.rs"]
mod core;
#[path = "infra/infra_layer.rs"]
mod infra;

use crate::cli::{commands, Backend, Cli, Command};
use crate::core::moderation::{
    MessageClassifier, MessageModerator, ModerationPolicy, ModerationService, Principal,
};
use crate::infra::moderation::{load_policy, RemoteModerator, StaticSessionProvider};
use anyhow::Context;
use clap::Parser;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if it exists) before clap
    // reads its env fallbacks
    dotenv::dotenv().ok();

    // Logs go to stderr so `check --json` output stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================

    let policy = match &cli.policy_file {
        Some(path) => load_policy(path)?,
        None => ModerationPolicy::default(),
    };

    let timeout = Duration::from_secs(cli.timeout_secs);

    let moderator: Box<dyn MessageModerator> = match cli.backend {
        Backend::Local => Box::new(MessageClassifier::new(policy.clone())),
        Backend::Remote => {
            let endpoint = cli
                .endpoint
                .as_deref()
                .context("MODERATION_ENDPOINT is required for the remote backend")?;
            let token = cli
                .access_token
                .clone()
                .context("MODERATION_ACCESS_TOKEN is required for the remote backend")?;
            Box::new(RemoteModerator::new(endpoint, token, timeout)?)
        }
    };
    tracing::debug!(backend = ?cli.backend, "Moderator ready");

    let principal = cli.user_id.clone().map(|user_id| Principal {
        user_id,
        role: cli.user_role,
    });
    let sessions = StaticSessionProvider::new(principal);

    let service = ModerationService::new(moderator, sessions).with_timeout(timeout);

    // ========================================================================
    // COMMANDS
    // ========================================================================

    match &cli.command {
        Command::Check { message, json } => commands::check(&service, message, *json).await,
        Command::Samples => commands::samples(&service).await,
        Command::Policy => commands::policy(&policy),
    }
}
