//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pocketlens_core::Month;

/// PocketLens - See where your money went
#[derive(Parser)]
#[command(name = "pocketlens")]
#[command(about = "Personal finance client with monthly insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Base URL of the finance API (overrides config and POCKETLENS_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Bearer token (overrides config and POCKETLENS_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Config file (default: ~/.config/pocketlens/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show insights for a month (AI when available, derived otherwise)
    Insights {
        /// Month in YYYY-MM form (default: current month)
        #[arg(short, long)]
        month: Option<Month>,

        /// Print the insights response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show report aggregates
    Report {
        #[command(subcommand)]
        report_type: ReportType,
    },

    /// Manage wallets
    Wallets {
        #[command(subcommand)]
        action: Option<WalletsAction>,
    },

    /// Record and review transactions
    Transactions {
        #[command(subcommand)]
        action: Option<TransactionsAction>,
    },

    /// List categories
    Categories {
        /// Category type: expense, income
        #[arg(short = 't', long = "type", default_value = "expense")]
        category_type: String,
    },

    /// List currencies
    Currencies,

    /// Manage monthly budgets
    Budgets {
        /// Month in YYYY-MM form (default: current month)
        #[arg(short, long, global = true)]
        month: Option<Month>,

        #[command(subcommand)]
        action: Option<BudgetsAction>,
    },

    /// Show the resolved configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ReportType {
    /// Income, expense and net
    Summary {
        /// Month in YYYY-MM form (default: current month)
        #[arg(short, long)]
        month: Option<Month>,
    },

    /// Totals per category
    ByCategory {
        /// Month in YYYY-MM form (default: current month)
        #[arg(short, long)]
        month: Option<Month>,

        /// Category type: expense, income
        #[arg(short = 't', long = "type", default_value = "expense")]
        category_type: String,
    },

    /// Totals over time
    Trend {
        /// Month in YYYY-MM form (default: current month)
        #[arg(short, long)]
        month: Option<Month>,

        /// Bucket size: daily, weekly, monthly
        #[arg(short, long, default_value = "daily")]
        granularity: String,

        /// Which totals: all, expense, income
        #[arg(short, long, default_value = "all")]
        scope: String,
    },
}

#[derive(Subcommand)]
pub enum WalletsAction {
    /// List wallets
    List,

    /// Show one wallet
    Show {
        /// Wallet ID
        id: i64,
    },

    /// Create a wallet
    Add {
        /// Wallet name
        name: String,

        /// Wallet type: cash, bank, credit, ewallet
        #[arg(short = 't', long = "type", default_value = "cash")]
        wallet_type: String,

        /// Currency ID (see `pocketlens currencies`)
        #[arg(short, long)]
        currency: i64,

        /// Opening balance
        #[arg(short, long, default_value = "0")]
        opening_balance: String,
    },

    /// Rename a wallet
    Rename {
        /// Wallet ID
        id: i64,
        /// New name
        name: String,
    },

    /// Mark a wallet inactive
    Deactivate {
        /// Wallet ID
        id: i64,
    },

    /// Delete a wallet
    Delete {
        /// Wallet ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum TransactionsAction {
    /// List transactions, newest first
    List {
        /// Only this type: expense, income, transfer_out, transfer_in
        #[arg(short = 't', long = "type")]
        transaction_type: Option<String>,

        /// Only this wallet ID
        #[arg(short, long)]
        wallet: Option<i64>,

        /// Only this category ID
        #[arg(short, long)]
        category: Option<i64>,

        /// Maximum number of rows to show
        #[arg(short, long, default_value = "50")]
        limit: usize,
    },

    /// Show one transaction
    Show {
        /// Transaction ID
        id: i64,
    },

    /// Record an expense or income
    Add {
        /// Amount in the wallet's currency
        amount: String,

        /// Wallet ID (see `pocketlens wallets`)
        #[arg(short, long)]
        wallet: i64,

        /// Transaction type: expense, income
        #[arg(short = 't', long = "type", default_value = "expense")]
        transaction_type: String,

        /// Category ID (see `pocketlens categories`)
        #[arg(short, long)]
        category: Option<i64>,

        /// Merchant or payer
        #[arg(long)]
        merchant: Option<String>,

        /// Free-form note
        #[arg(long)]
        note: Option<String>,

        /// When it happened: YYYY-MM-DD, YYYY-MM-DDTHH:MM or RFC 3339 (default: now)
        #[arg(long)]
        at: Option<String>,
    },

    /// Change fields of a transaction
    Edit {
        /// Transaction ID
        id: i64,

        /// New amount
        #[arg(long)]
        amount: Option<String>,

        /// New category ID
        #[arg(short, long)]
        category: Option<i64>,

        /// New merchant
        #[arg(long)]
        merchant: Option<String>,

        /// New note
        #[arg(long)]
        note: Option<String>,

        /// New date: YYYY-MM-DD, YYYY-MM-DDTHH:MM or RFC 3339
        #[arg(long)]
        at: Option<String>,

        /// Link to a receipt image that is already hosted somewhere
        #[arg(long)]
        receipt_url: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum BudgetsAction {
    /// List budgets for the month
    List,

    /// Create a budget
    Add {
        /// Spending limit in the base currency
        limit: String,

        /// Category ID (omit for a total budget)
        #[arg(short, long)]
        category: Option<i64>,
    },

    /// Delete a budget
    Delete {
        /// Budget ID
        id: i64,
    },

    /// Show spent and remaining per budget
    Status,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the resolved settings
    Show,

    /// Print the config file path
    Path,
}
