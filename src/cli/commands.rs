// CLI command handlers. Each one drives the moderation service and prints the
// result; errors bubble up to `main` as `anyhow` errors.

use super::render::{render_report, render_samples};
use crate::core::moderation::{
    MessageModerator, ModerationPolicy, ModerationService, SessionProvider,
};
use anyhow::{bail, Context};

pub async fn check<M: MessageModerator, S: SessionProvider>(
    service: &ModerationService<M, S>,
    message: &str,
    json: bool,
) -> anyhow::Result<()> {
    let report = service
        .check_message(message)
        .await
        .context("Failed to moderate message")?;

    if json {
        let body =
            serde_json::to_string_pretty(&report.verdict).context("Failed to encode verdict")?;
        println!("{body}");
    } else {
        print!("{}", render_report(&report));
    }

    Ok(())
}

pub async fn samples<M: MessageModerator, S: SessionProvider>(
    service: &ModerationService<M, S>,
) -> anyhow::Result<()> {
    let outcomes = service
        .run_samples()
        .await
        .context("Failed to run sample messages")?;

    print!("{}", render_samples(&outcomes));

    let failed = outcomes.iter().filter(|o| !o.passed()).count();
    if failed > 0 {
        bail!("{failed} sample(s) did not produce the expected verdict");
    }
    Ok(())
}

pub fn policy(policy: &ModerationPolicy) -> anyhow::Result<()> {
    let body = serde_json::to_string_pretty(policy).context("Failed to encode policy")?;
    println!("{body}");
    Ok(())
}
