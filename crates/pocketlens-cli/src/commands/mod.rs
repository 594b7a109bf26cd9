//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `budgets` - Budget commands (list, add, delete, status)
//! - `catalog` - Category and currency listings
//! - `config` - Show resolved settings and the config file path
//! - `insights` - Monthly insights with headline cards
//! - `reports` - Report commands (summary, by-category, trend)
//! - `transactions` - Transaction commands (list, show, add, edit, delete)
//! - `wallets` - Wallet management commands

pub mod budgets;
pub mod catalog;
pub mod config;
pub mod insights;
pub mod reports;
pub mod transactions;
pub mod wallets;

// Re-export command functions for main.rs
pub use budgets::*;
pub use catalog::*;
pub use config::*;
pub use insights::*;
pub use reports::*;
pub use transactions::*;
pub use wallets::*;

use std::path::Path;

use anyhow::{Context, Result};
use pocketlens_core::{
    models::{to_fixed, Amount},
    ApiClient, ClientConfig, Month,
};

/// Load config layers and apply `--api-url` / `--token` on top
pub fn resolve_config(
    path: Option<&Path>,
    api_url: Option<&str>,
    token: Option<&str>,
) -> Result<ClientConfig> {
    let mut config = ClientConfig::load(path).context("Failed to load configuration")?;
    if let Some(url) = api_url {
        config.api_base_url = url.trim().trim_end_matches('/').to_string();
    }
    if let Some(token) = token.filter(|t| !t.is_empty()) {
        config.access_token = Some(token.to_string());
    }
    Ok(config)
}

pub fn build_client(config: &ClientConfig) -> Result<ApiClient> {
    tracing::debug!(api = %config.api_base_url, "Using finance API");
    ApiClient::new(config).context("Failed to create API client")
}

/// `--month` or the current month
pub fn resolve_month(month: Option<Month>) -> Month {
    month.unwrap_or_else(Month::current)
}

/// Amount with two decimals
pub fn money(amount: &Amount) -> String {
    to_fixed(amount.value(), 2)
}

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
