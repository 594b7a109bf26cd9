//! Report endpoints

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    CategoryBreakdown, CategoryType, Granularity, Month, MonthlySummary, Trend, TrendScope,
};
use crate::reports::ReportsProvider;

use super::ApiClient;

impl ApiClient {
    /// `GET /api/reports/summary/?month=`
    pub async fn get_reports_summary(&self, month: Month) -> Result<MonthlySummary> {
        let month = month.to_string();
        self.get("/api/reports/summary/", &[("month", month.as_str())])
            .await
    }

    /// `GET /api/reports/by-category/?month=&type=`
    pub async fn get_reports_by_category(
        &self,
        month: Month,
        category_type: CategoryType,
    ) -> Result<CategoryBreakdown> {
        let month = month.to_string();
        self.get(
            "/api/reports/by-category/",
            &[("month", month.as_str()), ("type", category_type.as_str())],
        )
        .await
    }

    /// `GET /api/reports/trend/?month=&granularity=&scope=`
    pub async fn get_reports_trend(
        &self,
        month: Month,
        granularity: Granularity,
        scope: TrendScope,
    ) -> Result<Trend> {
        let month = month.to_string();
        self.get(
            "/api/reports/trend/",
            &[
                ("month", month.as_str()),
                ("granularity", granularity.as_str()),
                ("scope", scope.as_str()),
            ],
        )
        .await
    }
}

#[async_trait]
impl ReportsProvider for ApiClient {
    async fn summary(&self, month: Month) -> Result<MonthlySummary> {
        self.get_reports_summary(month).await
    }

    async fn by_category(
        &self,
        month: Month,
        category_type: CategoryType,
    ) -> Result<CategoryBreakdown> {
        self.get_reports_by_category(month, category_type).await
    }

    async fn trend(
        &self,
        month: Month,
        granularity: Granularity,
        scope: TrendScope,
    ) -> Result<Trend> {
        self.get_reports_trend(month, granularity, scope).await
    }
}
