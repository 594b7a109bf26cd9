//! Reports provider seam
//!
//! The insights fallback only needs three read operations. They sit behind a
//! trait so the provider can run against the HTTP client in production and
//! against in-memory fixtures in tests.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{CategoryBreakdown, CategoryType, Granularity, Month, MonthlySummary, Trend, TrendScope};

/// Read access to monthly report aggregates
#[async_trait]
pub trait ReportsProvider: Send + Sync {
    /// Income, expense and net for a month
    async fn summary(&self, month: Month) -> Result<MonthlySummary>;

    /// Per-category totals for one direction
    async fn by_category(&self, month: Month, category_type: CategoryType)
        -> Result<CategoryBreakdown>;

    /// Time-bucketed totals
    async fn trend(&self, month: Month, granularity: Granularity, scope: TrendScope)
        -> Result<Trend>;
}
