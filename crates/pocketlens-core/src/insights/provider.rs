//! Insights provider - AI first, report-derived fallback second

use async_trait::async_trait;

use crate::api::ApiClient;
use crate::error::Result;
use crate::models::{CategoryType, Granularity, Month, TrendScope};
use crate::reports::ReportsProvider;

use super::fallback::derive_fallback_insights;
use super::types::InsightsResponse;

/// Source of AI-generated insights
///
/// Any failure is reported as `None`; the provider never sees AI errors.
#[async_trait]
pub trait AiInsightsSource: Send + Sync {
    async fn try_ai_insights(&self, month: Month) -> Option<InsightsResponse>;
}

/// `None` disables the AI path entirely
#[async_trait]
impl<A: AiInsightsSource> AiInsightsSource for Option<A> {
    async fn try_ai_insights(&self, month: Month) -> Option<InsightsResponse> {
        match self {
            Some(ai) => ai.try_ai_insights(month).await,
            None => None,
        }
    }
}

/// Produces insights for a month, falling back to local derivation
pub struct InsightsProvider<R, A> {
    reports: R,
    ai: A,
}

impl InsightsProvider<ApiClient, ApiClient> {
    /// Use one API client for both the AI endpoint and the reports
    pub fn from_client(client: ApiClient) -> Self {
        Self::new(client.clone(), client)
    }
}

impl<R, A> InsightsProvider<R, A>
where
    R: ReportsProvider,
    A: AiInsightsSource,
{
    pub fn new(reports: R, ai: A) -> Self {
        Self { reports, ai }
    }

    pub fn reports(&self) -> &R {
        &self.reports
    }

    /// Insights for `month`
    ///
    /// Fails only when the AI path is unavailable and at least one of the
    /// report fetches fails; that report error is returned unchanged.
    pub async fn get_insights(&self, month: Month) -> Result<InsightsResponse> {
        if let Some(response) = self.ai.try_ai_insights(month).await {
            tracing::info!(month = %month, mode = "ai", items = response.items.len(), "Insights ready");
            return Ok(response);
        }

        let response = self.fallback_insights(month).await?;
        tracing::info!(
            month = %month,
            mode = "fallback",
            items = response.items.len(),
            "Insights ready"
        );
        Ok(response)
    }

    /// Fetch summary, expense breakdown and daily trend concurrently and derive insights
    pub async fn fallback_insights(&self, month: Month) -> Result<InsightsResponse> {
        let (summary, breakdown, trend) = tokio::try_join!(
            self.reports.summary(month),
            self.reports.by_category(month, CategoryType::Expense),
            self.reports
                .trend(month, Granularity::Daily, TrendScope::All),
        )?;

        Ok(derive_fallback_insights(month, &summary, &breakdown, &trend))
    }
}
