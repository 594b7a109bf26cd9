//! Wallet endpoints

use crate::error::Result;
use crate::models::{NewWallet, Wallet, WalletUpdate};

use super::{ApiClient, NO_QUERY};

impl ApiClient {
    /// List the current user's wallets (newest first, as ordered by the API)
    pub async fn list_wallets(&self) -> Result<Vec<Wallet>> {
        self.get_list("/api/wallets/", NO_QUERY).await
    }

    pub async fn get_wallet(&self, id: i64) -> Result<Wallet> {
        self.get(&format!("/api/wallets/{}/", id), NO_QUERY).await
    }

    pub async fn create_wallet(&self, wallet: &NewWallet) -> Result<Wallet> {
        let created: Wallet = self.post("/api/wallets/", wallet).await?;
        tracing::info!(id = created.id, name = %created.name, "Created wallet");
        Ok(created)
    }

    /// Partially update a wallet; unset fields are left alone
    pub async fn update_wallet(&self, id: i64, update: &WalletUpdate) -> Result<Wallet> {
        self.patch(&format!("/api/wallets/{}/", id), update).await
    }

    pub async fn delete_wallet(&self, id: i64) -> Result<()> {
        self.delete(&format!("/api/wallets/{}/", id)).await?;
        tracing::info!(id, "Deleted wallet");
        Ok(())
    }
}
