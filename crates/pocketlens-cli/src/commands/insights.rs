//! Insights command implementation

use anyhow::Result;
use pocketlens_core::{
    models::MonthlySummary, ApiClient, Error, InsightLevel, InsightsMode, InsightsProvider,
    InsightsResponse, InsightsSession, Month, ReportsProvider,
};

use super::money;

pub async fn cmd_insights(client: ApiClient, month: Month, json: bool) -> Result<()> {
    let session = InsightsSession::new(InsightsProvider::from_client(client));

    // Headline cards load alongside the insights; a failure only hides them
    let (insights, summary) = tokio::join!(
        session.load(month),
        session.provider().reports().summary(month)
    );

    let response = match insights {
        Ok(Some(response)) => response,
        Ok(None) => return Ok(()),
        Err(e) => anyhow::bail!("Failed to load insights: {}", failure_detail(&e)),
    };

    let summary = match summary {
        Ok(summary) => Some(summary),
        Err(e) => {
            tracing::debug!(error = %e, "Summary unavailable, hiding headline cards");
            None
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print!("{}", render_insights(&response, summary.as_ref()));
    }
    Ok(())
}

/// The API's own message where there is one
fn failure_detail(error: &Error) -> String {
    match error {
        Error::Api { detail, .. } => detail.clone(),
        other => other.to_string(),
    }
}

pub fn level_badge(level: InsightLevel) -> &'static str {
    match level {
        InsightLevel::Good => "✅",
        InsightLevel::Warn => "⚠️ ",
        InsightLevel::Info => "ℹ️ ",
    }
}

/// Text rendering of an insights response
pub fn render_insights(response: &InsightsResponse, summary: Option<&MonthlySummary>) -> String {
    const RULE: &str = "   ─────────────────────────────────────────────────────────────";

    let mut lines = vec![
        String::new(),
        format!("💡 Insights for {}", response.month),
        format!(
            "   Mode: {}  │  Currency: {}",
            response.mode, response.base_currency
        ),
    ];
    if response.mode == InsightsMode::Fallback {
        lines.push(
            "   AI insights unavailable; showing insights derived from your reports.".to_string(),
        );
    }
    lines.push(RULE.to_string());

    if let Some(summary) = summary {
        lines.push(format!(
            "   Income {:>14}  │  Expense {:>14}  │  Net {:>14}",
            money(&summary.income),
            money(&summary.expense),
            money(&summary.net)
        ));
        lines.push(RULE.to_string());
    }

    if response.items.is_empty() {
        lines.push("   No insights for this month.".to_string());
    }
    for item in &response.items {
        let level = item.effective_level();
        lines.push(format!("   {} {} [{}]", level_badge(level), item.title, level));
        lines.push(format!("      {}", item.detail));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
