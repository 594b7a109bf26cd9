//! Monthly insights
//!
//! Insights are short, human-readable observations about a month of personal
//! finance data. They come from one of two places:
//!
//! - **AI** - the `/api/insights/` endpoint, whose loosely shaped payload is
//!   normalized by [`normalize_ai_payload`]
//! - **Fallback** - derived locally from the summary, expense breakdown and
//!   daily trend reports by [`derive_fallback_insights`]
//!
//! [`InsightsProvider`] tries the AI path first and silently falls back.
//! [`InsightsSession`] adds stale-response protection for callers that switch
//! months while a request is in flight.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pocketlens_core::{ApiClient, ClientConfig, InsightsProvider};
//!
//! let client = ApiClient::new(&ClientConfig::load(None)?)?;
//! let provider = InsightsProvider::from_client(client);
//! let insights = provider.get_insights("2026-02".parse()?).await?;
//! ```

pub mod fallback;
pub mod guard;
pub mod normalize;
pub mod provider;
pub mod types;

pub use fallback::{derive_fallback_insights, spending_spike, top_categories};
pub use guard::{InsightsSession, RequestGuard, RequestTicket};
pub use normalize::normalize_ai_payload;
pub use provider::{AiInsightsSource, InsightsProvider};
pub use types::{InsightItem, InsightLevel, InsightsMode, InsightsResponse, DEFAULT_CURRENCY};
