//! Category and currency lookups

use crate::error::Result;
use crate::models::{Category, CategoryType, Currency};

use super::{ApiClient, NO_QUERY};

impl ApiClient {
    /// `GET /api/categories/?type=`
    pub async fn list_categories(&self, category_type: CategoryType) -> Result<Vec<Category>> {
        self.get_list("/api/categories/", &[("type", category_type.as_str())])
            .await
    }

    /// `GET /api/currencies/` (bare or paginated)
    pub async fn list_currencies(&self) -> Result<Vec<Currency>> {
        self.get_list("/api/currencies/", NO_QUERY).await
    }
}
