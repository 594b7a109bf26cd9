//! Transaction endpoints

use crate::error::Result;
use crate::models::{NewTransaction, Transaction, TransactionFilter, TransactionUpdate};

use super::{ApiClient, NO_QUERY};

impl ApiClient {
    /// Live transactions, newest first, narrowed by `filter`
    pub async fn list_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        self.get_list("/api/transactions/", filter).await
    }

    pub async fn get_transaction(&self, id: i64) -> Result<Transaction> {
        self.get(&format!("/api/transactions/{}/", id), NO_QUERY)
            .await
    }

    pub async fn create_transaction(&self, transaction: &NewTransaction) -> Result<Transaction> {
        let created: Transaction = self.post("/api/transactions/", transaction).await?;
        tracing::info!(
            id = created.id,
            kind = %created.transaction_type,
            amount = %created.amount,
            "Created transaction"
        );
        Ok(created)
    }

    pub async fn update_transaction(
        &self,
        id: i64,
        update: &TransactionUpdate,
    ) -> Result<Transaction> {
        self.patch(&format!("/api/transactions/{}/", id), update)
            .await
    }

    /// The server keeps deleted transactions but hides them from every listing
    pub async fn delete_transaction(&self, id: i64) -> Result<()> {
        self.delete(&format!("/api/transactions/{}/", id)).await?;
        tracing::info!(id, "Deleted transaction");
        Ok(())
    }
}
