//! PocketLens Core Library
//!
//! Shared functionality for the PocketLens personal finance client:
//! - Typed HTTP client for the finance REST API
//! - Report, wallet, transaction, catalog and budget models
//! - Monthly insights with an AI path and a report-derived fallback
//! - Layered client configuration

pub mod api;
pub mod config;
pub mod error;
pub mod insights;
pub mod models;
pub mod reports;

/// Test utilities including a mock finance API server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use api::{ApiClient, StaticToken, TokenProvider};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use insights::{
    AiInsightsSource, InsightItem, InsightLevel, InsightsMode, InsightsProvider, InsightsResponse,
    InsightsSession,
};
pub use models::{Amount, Month};
pub use reports::ReportsProvider;
