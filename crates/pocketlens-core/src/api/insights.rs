//! AI insights endpoint

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::insights::{normalize_ai_payload, AiInsightsSource, InsightsResponse};
use crate::models::Month;

use super::ApiClient;

impl ApiClient {
    /// `GET /api/insights/?month=`, body untouched
    pub async fn get_insights_raw(&self, month: Month) -> Result<Value> {
        let month = month.to_string();
        self.get_value("/api/insights/", &[("month", month.as_str())])
            .await
    }
}

#[async_trait]
impl AiInsightsSource for ApiClient {
    async fn try_ai_insights(&self, month: Month) -> Option<InsightsResponse> {
        let payload = match self.get_insights_raw(month).await {
            Ok(payload) => payload,
            Err(e) => {
                tracing::debug!(month = %month, error = %e, "AI insights unavailable, using fallback");
                return None;
            }
        };

        match normalize_ai_payload(month, &payload) {
            Ok(response) => Some(response),
            Err(e) => {
                tracing::debug!(month = %month, error = %e, "AI insights unreadable, using fallback");
                None
            }
        }
    }
}
