//! Compare command handler

use anyhow::Context;
use std::fmt::Write;
use std::sync::Arc;

use crate::cli::OutputFormat;
use crate::clients::AnilistClient;
use crate::comparison::ComparisonReport;
use crate::config::Config;
use crate::services::ComparisonService;

pub async fn cmd_compare(
    config: &Config,
    user_a: &str,
    user_b: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let client =
        AnilistClient::new(&config.anilist).context("Failed to build AniList HTTP client")?;
    let service = ComparisonService::new(Arc::new(client));

    let report = service
        .compare_users(user_a, user_b)
        .await
        .with_context(|| format!("Failed to compare {user_a} and {user_b}"))?;

    match format {
        OutputFormat::Text => print!("{}", render_text(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

/// Renders every non-empty category as a heading followed by its titles.
#[must_use]
pub fn render_text(report: &ComparisonReport) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} ({} entries) vs {} ({} entries)",
        report.user_a.username,
        report.user_a.entry_count,
        report.user_b.username,
        report.user_b.entry_count
    );

    if report.results.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Nothing in common to show.");
    }

    for result in &report.results {
        let heading = report.heading(result.category);
        let _ = writeln!(out);
        let _ = writeln!(out, "{heading} ({})", result.entries.len());
        let _ = writeln!(out, "{:-<60}", "");
        for entry in &result.entries {
            let _ = writeln!(out, "• {} [{}]", entry.title, entry.id);
        }
    }

    if !report.anomalies.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Unrecognized statuses (treated as unseen):");
        for anomaly in &report.anomalies {
            let _ = writeln!(
                out,
                "  {} / {}: {}",
                anomaly.username, anomaly.anime_id, anomaly.status
            );
        }
    }

    out
}
