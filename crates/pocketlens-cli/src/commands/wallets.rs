//! Wallet command implementations

use anyhow::{Context, Result};
use pocketlens_core::{
    models::{NewWallet, Wallet, WalletType, WalletUpdate},
    ApiClient,
};

use super::{money, truncate};

pub async fn cmd_wallets_list(client: &ApiClient) -> Result<()> {
    let wallets = client.list_wallets().await?;

    if wallets.is_empty() {
        println!("No wallets yet. Create one with:");
        println!("  pocketlens wallets add <NAME> --currency <ID>");
        return Ok(());
    }

    println!();
    println!("👛 Wallets");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:>4} │ {:20} │ {:8} │ {:>5} │ {:>12}",
        "ID", "Name", "Type", "Cur", "Opening"
    );
    println!("   ─────┼──────────────────────┼──────────┼───────┼──────────────");
    for wallet in &wallets {
        println!(
            "   {:>4} │ {:20} │ {:8} │ {:>5} │ {:>12}{}",
            wallet.id,
            truncate(&wallet.name, 20),
            wallet.wallet_type.as_str(),
            currency_code(wallet),
            money(&wallet.opening_balance),
            if wallet.is_active { "" } else { "  (inactive)" }
        );
    }

    Ok(())
}

pub async fn cmd_wallets_show(client: &ApiClient, id: i64) -> Result<()> {
    let wallet = client
        .get_wallet(id)
        .await
        .with_context(|| format!("Wallet not found: {}", id))?;
    print_wallet(&wallet);
    Ok(())
}

pub async fn cmd_wallets_add(
    client: &ApiClient,
    name: &str,
    wallet_type: WalletType,
    currency_id: i64,
    opening_balance: &str,
) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("Wallet name cannot be empty");
    }

    let wallet = client
        .create_wallet(&NewWallet {
            name: name.to_string(),
            wallet_type,
            currency_id,
            opening_balance: opening_balance.to_string(),
            is_active: true,
        })
        .await
        .context("Failed to create wallet")?;

    println!("✅ Created wallet '{}' (ID: {})", wallet.name, wallet.id);
    Ok(())
}

pub async fn cmd_wallets_rename(client: &ApiClient, id: i64, name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("Wallet name cannot be empty");
    }

    let update = WalletUpdate {
        name: Some(name.to_string()),
        ..Default::default()
    };
    let wallet = client.update_wallet(id, &update).await?;
    println!("✅ Renamed wallet {} to '{}'", wallet.id, wallet.name);
    Ok(())
}

pub async fn cmd_wallets_deactivate(client: &ApiClient, id: i64) -> Result<()> {
    let update = WalletUpdate {
        is_active: Some(false),
        ..Default::default()
    };
    let wallet = client.update_wallet(id, &update).await?;
    println!("✅ Deactivated wallet '{}' (ID: {})", wallet.name, wallet.id);
    Ok(())
}

pub async fn cmd_wallets_delete(client: &ApiClient, id: i64) -> Result<()> {
    client
        .delete_wallet(id)
        .await
        .with_context(|| format!("Failed to delete wallet {}", id))?;
    println!("🗑️  Deleted wallet {}", id);
    Ok(())
}

fn currency_code(wallet: &Wallet) -> &str {
    wallet
        .currency
        .as_ref()
        .map(|c| c.code.as_str())
        .unwrap_or("?")
}

fn print_wallet(wallet: &Wallet) {
    println!();
    println!("👛 {} (ID: {})", wallet.name, wallet.id);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Type:            {}", wallet.wallet_type);
    println!("   Currency:        {}", currency_code(wallet));
    println!("   Opening balance: {}", money(&wallet.opening_balance));
    println!(
        "   Status:          {}",
        if wallet.is_active { "active" } else { "inactive" }
    );
    if let Some(created) = wallet.created_at {
        println!("   Created:         {}", created.format("%Y-%m-%d %H:%M"));
    }
}
