//! Transaction command implementations

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone};
use pocketlens_core::{
    models::{NewTransaction, Transaction, TransactionFilter, TransactionType, TransactionUpdate},
    ApiClient,
};

use super::{money, truncate};

/// A transaction as typed on the command line, before validation
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub transaction_type: TransactionType,
    pub amount: String,
    pub wallet_id: i64,
    pub category_id: Option<i64>,
    pub merchant: Option<String>,
    pub note: Option<String>,
    /// Defaults to now
    pub occurred_at: Option<String>,
}

impl TransactionDraft {
    pub fn into_new(self) -> Result<NewTransaction> {
        if self.transaction_type.is_transfer() {
            anyhow::bail!("Only expense and income transactions can be added");
        }
        let occurred_at = match self.occurred_at.as_deref() {
            Some(raw) => parse_occurred_at(raw)?,
            None => Local::now().into(),
        };

        Ok(NewTransaction {
            transaction_type: self.transaction_type,
            occurred_at,
            amount: parse_amount(&self.amount)?,
            wallet_id: self.wallet_id,
            category_id: self.category_id,
            merchant: self.merchant.unwrap_or_default().trim().to_string(),
            note: self.note.unwrap_or_default().trim().to_string(),
        })
    }
}

/// Validate an amount and return it trimmed; the API rejects anything below 0.01
pub fn parse_amount(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let value: f64 = trimmed
        .parse()
        .with_context(|| format!("Invalid amount: {}", raw))?;
    if !value.is_finite() || value < 0.01 {
        anyhow::bail!("Amount must be at least 0.01");
    }
    Ok(trimmed.to_string())
}

/// Accepts RFC 3339, or a local `YYYY-MM-DD[THH:MM]`
pub fn parse_occurred_at(raw: &str) -> Result<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(at);
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .with_context(|| {
            format!(
                "Invalid date: {} (use YYYY-MM-DD, YYYY-MM-DDTHH:MM or RFC 3339)",
                raw
            )
        })?;

    let local = Local
        .from_local_datetime(&naive)
        .earliest()
        .with_context(|| format!("No such local time: {}", raw))?;
    Ok(local.into())
}

pub async fn cmd_transactions_list(
    client: &ApiClient,
    filter: &TransactionFilter,
    limit: usize,
) -> Result<()> {
    let transactions = client.list_transactions(filter).await?;

    if transactions.is_empty() {
        println!("No transactions found. Add one with:");
        println!("  pocketlens transactions add <AMOUNT> --wallet <ID>");
        return Ok(());
    }

    println!();
    println!("🧾 Transactions");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:>5} │ {:10} │ {:12} │ {:>12} │ {:>4} │ {:15} │ {:20}",
        "ID", "Date", "Type", "Amount", "Cur", "Category", "Merchant"
    );
    println!(
        "   ──────┼────────────┼──────────────┼──────────────┼──────┼─────────────────┼─────────────────────"
    );
    for tx in transactions.iter().take(limit) {
        println!(
            "   {:>5} │ {:10} │ {:12} │ {:>12} │ {:>4} │ {:15} │ {:20}",
            tx.id,
            occurred_date(tx),
            tx.transaction_type.as_str(),
            money(&tx.amount),
            currency_code(tx),
            truncate(category_name(tx), 15),
            truncate(&tx.merchant, 20)
        );
    }

    if transactions.len() > limit {
        println!(
            "   ... and {} more (raise --limit to see them)",
            transactions.len() - limit
        );
    }

    Ok(())
}

pub async fn cmd_transactions_show(client: &ApiClient, id: i64) -> Result<()> {
    let tx = client
        .get_transaction(id)
        .await
        .with_context(|| format!("Transaction not found: {}", id))?;
    print_transaction(&tx);
    Ok(())
}

pub async fn cmd_transactions_add(client: &ApiClient, draft: TransactionDraft) -> Result<()> {
    let new = draft.into_new()?;
    let tx = client
        .create_transaction(&new)
        .await
        .context("Failed to create transaction")?;

    println!(
        "✅ Recorded {} of {} {} (ID: {})",
        tx.transaction_type,
        money(&tx.amount),
        currency_code(&tx),
        tx.id
    );
    Ok(())
}

pub async fn cmd_transactions_edit(
    client: &ApiClient,
    id: i64,
    update: &TransactionUpdate,
) -> Result<()> {
    if update.is_empty() {
        anyhow::bail!("Nothing to change; pass at least one field to update");
    }
    let tx = client
        .update_transaction(id, update)
        .await
        .with_context(|| format!("Failed to update transaction {}", id))?;
    println!("✅ Updated transaction {}", tx.id);
    print_transaction(&tx);
    Ok(())
}

pub async fn cmd_transactions_delete(client: &ApiClient, id: i64) -> Result<()> {
    client
        .delete_transaction(id)
        .await
        .with_context(|| format!("Failed to delete transaction {}", id))?;
    println!("🗑️  Deleted transaction {}", id);
    Ok(())
}

fn occurred_date(tx: &Transaction) -> String {
    tx.occurred_at
        .map(|at| at.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn currency_code(tx: &Transaction) -> &str {
    tx.currency
        .as_ref()
        .map(|c| c.code.as_str())
        .unwrap_or("?")
}

fn category_name(tx: &Transaction) -> &str {
    tx.category
        .as_ref()
        .map(|c| c.name.as_str())
        .unwrap_or("-")
}

fn print_transaction(tx: &Transaction) {
    println!();
    println!("🧾 Transaction {}", tx.id);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Type:     {}", tx.transaction_type);
    println!("   Amount:   {} {}", money(&tx.amount), currency_code(tx));
    if tx.fx_rate.value() != 1.0 && tx.fx_rate.value() != 0.0 {
        println!(
            "   Base:     {} (rate {})",
            money(&tx.base_amount),
            tx.fx_rate
        );
    }
    if let Some(at) = tx.occurred_at {
        println!("   When:     {}", at.format("%Y-%m-%d %H:%M"));
    }
    if let Some(wallet) = &tx.wallet {
        println!("   Wallet:   {} (ID: {})", wallet.name, wallet.id);
    }
    println!("   Category: {}", category_name(tx));
    if !tx.merchant.is_empty() {
        println!("   Merchant: {}", tx.merchant);
    }
    if !tx.note.is_empty() {
        println!("   Note:     {}", tx.note);
    }
    if !tx.receipt_url.is_empty() {
        println!("   Receipt:  {}", tx.receipt_url);
    }
}
