//! PocketLens CLI - Personal finance client
//!
//! Usage:
//!   pocketlens insights --month 2026-02   Monthly insights (AI or derived)
//!   pocketlens report summary             Income, expense and net
//!   pocketlens wallets list               List wallets
//!   pocketlens transactions add 120 -w 1  Record an expense
//!   pocketlens budgets status             Budget usage for the month

mod cli;
mod commands;


use anyhow::{Context, Result};
use clap::Parser;
use pocketlens_core::models::{
    BudgetScope, CategoryType, Granularity, TransactionFilter, TransactionType, TransactionUpdate,
    TrendScope, WalletType,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    let config = commands::resolve_config(
        cli.config.as_deref(),
        cli.api_url.as_deref(),
        cli.token.as_deref(),
    )?;

    // Config commands must work without a reachable API
    if let Commands::Config { action } = &cli.command {
        return match action {
            None | Some(ConfigAction::Show) => commands::cmd_config_show(&config),
            Some(ConfigAction::Path) => commands::cmd_config_path(cli.config.as_deref()),
        };
    }

    let client = commands::build_client(&config)?;

    match cli.command {
        Commands::Insights { month, json } => {
            commands::cmd_insights(client, commands::resolve_month(month), json).await
        }
        Commands::Report { report_type } => match report_type {
            ReportType::Summary { month } => {
                commands::cmd_report_summary(&client, commands::resolve_month(month)).await
            }
            ReportType::ByCategory {
                month,
                category_type,
            } => {
                let category_type: CategoryType = parse_arg(&category_type)?;
                commands::cmd_report_by_category(
                    &client,
                    commands::resolve_month(month),
                    category_type,
                )
                .await
            }
            ReportType::Trend {
                month,
                granularity,
                scope,
            } => {
                let granularity: Granularity = parse_arg(&granularity)?;
                let scope: TrendScope = parse_arg(&scope)?;
                commands::cmd_report_trend(
                    &client,
                    commands::resolve_month(month),
                    granularity,
                    scope,
                )
                .await
            }
        },
        Commands::Wallets { action } => match action {
            None | Some(WalletsAction::List) => commands::cmd_wallets_list(&client).await,
            Some(WalletsAction::Show { id }) => commands::cmd_wallets_show(&client, id).await,
            Some(WalletsAction::Add {
                name,
                wallet_type,
                currency,
                opening_balance,
            }) => {
                let wallet_type: WalletType = parse_arg(&wallet_type)?;
                commands::cmd_wallets_add(&client, &name, wallet_type, currency, &opening_balance)
                    .await
            }
            Some(WalletsAction::Rename { id, name }) => {
                commands::cmd_wallets_rename(&client, id, &name).await
            }
            Some(WalletsAction::Deactivate { id }) => {
                commands::cmd_wallets_deactivate(&client, id).await
            }
            Some(WalletsAction::Delete { id }) => commands::cmd_wallets_delete(&client, id).await,
        },
        Commands::Transactions { action } => match action {
            None => {
                commands::cmd_transactions_list(&client, &TransactionFilter::default(), 50).await
            }
            Some(TransactionsAction::List {
                transaction_type,
                wallet,
                category,
                limit,
            }) => {
                let filter = TransactionFilter {
                    transaction_type: transaction_type
                        .as_deref()
                        .map(parse_arg::<TransactionType>)
                        .transpose()?,
                    wallet,
                    category,
                };
                commands::cmd_transactions_list(&client, &filter, limit).await
            }
            Some(TransactionsAction::Show { id }) => {
                commands::cmd_transactions_show(&client, id).await
            }
            Some(TransactionsAction::Add {
                amount,
                wallet,
                transaction_type,
                category,
                merchant,
                note,
                at,
            }) => {
                let draft = commands::TransactionDraft {
                    transaction_type: parse_arg(&transaction_type)?,
                    amount,
                    wallet_id: wallet,
                    category_id: category,
                    merchant,
                    note,
                    occurred_at: at,
                };
                commands::cmd_transactions_add(&client, draft).await
            }
            Some(TransactionsAction::Edit {
                id,
                amount,
                category,
                merchant,
                note,
                at,
                receipt_url,
            }) => {
                let update = TransactionUpdate {
                    amount: amount.as_deref().map(commands::parse_amount).transpose()?,
                    occurred_at: at
                        .as_deref()
                        .map(commands::parse_occurred_at)
                        .transpose()?,
                    category_id: category,
                    merchant,
                    note,
                    receipt_url,
                };
                commands::cmd_transactions_edit(&client, id, &update).await
            }
            Some(TransactionsAction::Delete { id }) => {
                commands::cmd_transactions_delete(&client, id).await
            }
        },
        Commands::Categories { category_type } => {
            let category_type: CategoryType = parse_arg(&category_type)?;
            commands::cmd_categories(&client, category_type).await
        }
        Commands::Currencies => commands::cmd_currencies(&client).await,
        Commands::Budgets { month, action } => {
            let month = commands::resolve_month(month);
            match action {
                None | Some(BudgetsAction::List) => commands::cmd_budgets_list(&client, month).await,
                Some(BudgetsAction::Add { limit, category }) => {
                    let scope = if category.is_some() {
                        BudgetScope::Category
                    } else {
                        BudgetScope::Total
                    };
                    commands::cmd_budgets_add(&client, month, scope, &limit, category).await
                }
                Some(BudgetsAction::Delete { id }) => {
                    commands::cmd_budgets_delete(&client, id).await
                }
                Some(BudgetsAction::Status) => commands::cmd_budgets_status(&client, month).await,
            }
        }
        Commands::Config { .. } => Ok(()),
    }
}

/// Parse a string flag into one of the core enums
fn parse_arg<T>(value: &str) -> Result<T>
where
    T: std::str::FromStr<Err = String>,
{
    value
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))
        .with_context(|| format!("Invalid value: {}", value))
}
