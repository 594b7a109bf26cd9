//! Category and currency listings

use anyhow::Result;
use pocketlens_core::{models::CategoryType, ApiClient};

use super::truncate;

pub async fn cmd_categories(client: &ApiClient, category_type: CategoryType) -> Result<()> {
    let categories = client.list_categories(category_type).await?;

    if categories.is_empty() {
        println!("No {} categories found.", category_type);
        return Ok(());
    }

    println!();
    println!("🏷️  {} categories", category_type);
    println!("   ─────────────────────────────────────────────────────────────");
    for category in &categories {
        let parent = category
            .parent
            .map(|p| format!("  (parent {})", p))
            .unwrap_or_default();
        println!(
            "   {:>4} │ {}{}",
            category.id,
            truncate(&category.name, 40),
            parent
        );
    }

    Ok(())
}

pub async fn cmd_currencies(client: &ApiClient) -> Result<()> {
    let currencies = client.list_currencies().await?;

    if currencies.is_empty() {
        println!("No currencies found.");
        return Ok(());
    }

    println!();
    println!("💱 Currencies");
    println!("   ─────────────────────────────────────────────────────────────");
    for currency in &currencies {
        println!(
            "   {:>4} │ {:5} │ {:3} │ {}",
            currency.id,
            currency.code,
            currency.symbol.as_deref().unwrap_or(""),
            currency.name
        );
    }

    Ok(())
}
