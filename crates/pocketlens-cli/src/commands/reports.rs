//! Report command implementations

use anyhow::Result;
use pocketlens_core::{
    models::{to_fixed, CategoryType, Granularity, TrendScope},
    ApiClient, Month,
};

use super::{money, truncate};

pub async fn cmd_report_summary(client: &ApiClient, month: Month) -> Result<()> {
    let summary = client.get_reports_summary(month).await?;

    println!();
    println!("📊 Summary for {}", month);
    println!("   ─────────────────────────────────────────────────────────────");
    if let Some(currency) = &summary.base_currency {
        println!("   Currency: {}", currency);
    }
    println!("   Income:  {:>14}", money(&summary.income));
    println!("   Expense: {:>14}", money(&summary.expense));
    println!("   Net:     {:>14}", money(&summary.net));

    Ok(())
}

pub async fn cmd_report_by_category(
    client: &ApiClient,
    month: Month,
    category_type: CategoryType,
) -> Result<()> {
    let breakdown = client.get_reports_by_category(month, category_type).await?;

    println!();
    println!("📊 {} by category for {}", category_type, month);
    println!("   ─────────────────────────────────────────────────────────────");

    if breakdown.items.is_empty() {
        println!("   No category data found for this month.");
        return Ok(());
    }

    let total: f64 = breakdown.items.iter().map(|c| c.total.value()).sum();

    println!("   {:25} │ {:>12} │ {:>6}", "Category", "Amount", "%");
    println!("   ──────────────────────────┼──────────────┼────────");
    for item in &breakdown.items {
        let pct = if total > 0.0 {
            item.total.value() / total * 100.0
        } else {
            0.0
        };
        println!(
            "   {:25} │ {:>12} │ {:>5}%",
            truncate(item.name(), 25),
            money(&item.total),
            to_fixed(pct, 1)
        );
    }
    println!("   ──────────────────────────┼──────────────┼────────");
    println!("   {:25} │ {:>12} │", "Total", to_fixed(total, 2));

    Ok(())
}

pub async fn cmd_report_trend(
    client: &ApiClient,
    month: Month,
    granularity: Granularity,
    scope: TrendScope,
) -> Result<()> {
    let trend = client.get_reports_trend(month, granularity, scope).await?;

    println!();
    println!(
        "📈 {} trend for {} ({})",
        granularity.as_str(),
        month,
        scope.as_str()
    );
    println!("   ─────────────────────────────────────────────────────────────");

    if trend.items.is_empty() {
        println!("   No activity in this period.");
        return Ok(());
    }

    println!("   {:12} │ {:>12} │ {:>12}", "Period", "Expense", "Income");
    println!("   ─────────────┼──────────────┼──────────────");
    for bucket in &trend.items {
        let income = bucket
            .income
            .as_ref()
            .map(money)
            .unwrap_or_else(|| "-".to_string());
        println!(
            "   {:12} │ {:>12} │ {:>12}",
            bucket.bucket.as_deref().unwrap_or("?"),
            money(&bucket.expense),
            income
        );
    }

    Ok(())
}
