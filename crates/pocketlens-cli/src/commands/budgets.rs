//! Budget command implementations

use anyhow::{Context, Result};
use pocketlens_core::{
    models::{to_fixed, BudgetScope, NewBudget},
    ApiClient, Month,
};

use super::{money, truncate};

pub async fn cmd_budgets_list(client: &ApiClient, month: Month) -> Result<()> {
    let budgets = client.list_budgets(month).await?;

    if budgets.is_empty() {
        println!("No budgets for {}. Create one with:", month);
        println!("  pocketlens budgets --month {} add <LIMIT>", month);
        return Ok(());
    }

    println!();
    println!("🎯 Budgets for {}", month);
    println!("   ─────────────────────────────────────────────────────────────");
    for budget in &budgets {
        let target = budget
            .category
            .as_ref()
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "Total".to_string());
        println!(
            "   {:>4} │ {:25} │ {:>12}",
            budget.id,
            truncate(&target, 25),
            money(&budget.limit_base_amount)
        );
    }

    Ok(())
}

pub async fn cmd_budgets_add(
    client: &ApiClient,
    month: Month,
    scope: BudgetScope,
    limit: &str,
    category_id: Option<i64>,
) -> Result<()> {
    let parsed: f64 = limit
        .trim()
        .parse()
        .with_context(|| format!("Invalid budget limit: {}", limit))?;
    if !parsed.is_finite() || parsed <= 0.0 {
        anyhow::bail!("Budget limit must be greater than 0");
    }
    if scope == BudgetScope::Category && category_id.is_none() {
        anyhow::bail!("A category budget needs --category");
    }

    let budget = client
        .create_budget(&NewBudget {
            month,
            scope,
            limit_base_amount: limit.trim().to_string(),
            category_id,
        })
        .await
        .context("Failed to create budget")?;

    println!(
        "✅ Created {} budget for {} (ID: {}, limit {})",
        budget.scope.as_str(),
        budget.month,
        budget.id,
        money(&budget.limit_base_amount)
    );
    Ok(())
}

pub async fn cmd_budgets_delete(client: &ApiClient, id: i64) -> Result<()> {
    client
        .delete_budget(id)
        .await
        .with_context(|| format!("Failed to delete budget {}", id))?;
    println!("🗑️  Deleted budget {}", id);
    Ok(())
}

pub async fn cmd_budgets_status(client: &ApiClient, month: Month) -> Result<()> {
    let status = client.budget_status(month).await?;

    println!();
    println!(
        "🎯 Budget status for {}{}",
        status.month,
        status
            .base_currency
            .as_deref()
            .map(|c| format!(" ({})", c))
            .unwrap_or_default()
    );
    println!("   ─────────────────────────────────────────────────────────────");

    if status.items.is_empty() {
        println!("   No budgets set for this month.");
        return Ok(());
    }

    println!(
        "   {:20} │ {:>12} │ {:>12} │ {:>12} │ {:>6}",
        "Budget", "Limit", "Spent", "Remaining", "Used"
    );
    println!("   ─────────────────────┼──────────────┼──────────────┼──────────────┼────────");
    for item in &status.items {
        let used = item.percent_used.value();
        let flag = if used >= 100.0 {
            " 🔴"
        } else if used >= 80.0 {
            " 🟡"
        } else {
            ""
        };
        println!(
            "   {:20} │ {:>12} │ {:>12} │ {:>12} │ {:>5}%{}",
            truncate(&item.title, 20),
            money(&item.limit),
            money(&item.spent),
            money(&item.remaining),
            to_fixed(used, 1),
            flag
        );
    }

    Ok(())
}
