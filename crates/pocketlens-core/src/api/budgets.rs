//! Budget endpoints

use crate::error::Result;
use crate::models::{Budget, BudgetStatus, Month, NewBudget};

use super::ApiClient;

impl ApiClient {
    /// Budgets for a month (bare or paginated)
    pub async fn list_budgets(&self, month: Month) -> Result<Vec<Budget>> {
        let month = month.to_string();
        self.get_list("/api/budgets/", &[("month", month.as_str())])
            .await
    }

    pub async fn create_budget(&self, budget: &NewBudget) -> Result<Budget> {
        let created: Budget = self.post("/api/budgets/", budget).await?;
        tracing::info!(id = created.id, month = %created.month, "Created budget");
        Ok(created)
    }

    pub async fn delete_budget(&self, id: i64) -> Result<()> {
        self.delete(&format!("/api/budgets/{}/", id)).await
    }

    /// Spent/remaining per budget for a month
    pub async fn budget_status(&self, month: Month) -> Result<BudgetStatus> {
        let month = month.to_string();
        self.get("/api/budgets/status/", &[("month", month.as_str())])
            .await
    }
}
