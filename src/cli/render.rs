// Terminal rendering for reports and sample runs. Pure string building so the
// layout can be tested without capturing stdout.

use crate::core::moderation::{ModerationReport, SampleOutcome, Severity, Verdict};
use std::fmt::Write;

pub fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "🔴 critical",
        Severity::Secondary => "🟠 secondary",
        Severity::Warning => "🟡 warning",
    }
}

/// Verdict body: one line per infraction, then the verdict message.
pub fn render_verdict(verdict: &Verdict) -> String {
    let mut out = String::new();

    if !verdict.infractions.is_empty() {
        out.push_str("Infractions detected:\n");
        for infraction in &verdict.infractions {
            let _ = writeln!(
                out,
                "  [{}] {}: {}",
                severity_label(infraction.severity),
                infraction.infraction_type,
                infraction.matches.join(", ")
            );
        }
    }

    if let Some(message) = &verdict.message {
        let _ = writeln!(out, "{message}");
    }

    out
}

pub fn render_report(report: &ModerationReport) -> String {
    let icon = if report.verdict.is_blocked { "❌" } else { "✅" };
    let mut out = format!("{} {}\n", icon, report.summary());
    out.push_str(&render_verdict(&report.verdict));
    let _ = writeln!(
        out,
        "Checked for {} at {}",
        report.user_id,
        report.checked_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    out
}

/// Sample results grouped by category, with a pass/fail tally at the end.
pub fn render_samples(outcomes: &[SampleOutcome]) -> String {
    let mut out = String::new();
    let mut current_category = None;

    for outcome in outcomes {
        if current_category != Some(outcome.case.category) {
            current_category = Some(outcome.case.category);
            let _ = writeln!(out, "\n{}", outcome.case.category.label());
        }

        let status = if outcome.passed() { "PASS" } else { "FAIL" };
        let detail = match &outcome.result {
            Ok(verdict) => {
                let types: Vec<&str> = verdict
                    .infractions
                    .iter()
                    .map(|i| i.infraction_type.as_str())
                    .collect();
                let decision = if verdict.is_blocked { "blocked" } else { "allowed" };
                if types.is_empty() {
                    decision.to_string()
                } else {
                    format!("{} ({})", decision, types.join(", "))
                }
            }
            Err(e) => format!("error: {e}"),
        };

        let _ = writeln!(
            out,
            "  {} {:?} -> {} [expected {}]",
            status, outcome.case.message, detail, outcome.case.expected
        );
    }

    let passed = outcomes.iter().filter(|o| o.passed()).count();
    let _ = writeln!(out, "\n{}/{} samples passed", passed, outcomes.len());
    out
}
