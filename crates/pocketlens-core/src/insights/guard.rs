//! Stale-response protection for month switching
//!
//! When the selected month changes while an earlier request is still in
//! flight, the earlier response must not overwrite the newer one. Each load
//! takes a ticket from a generation counter; only the holder of the latest
//! ticket gets its result back.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::Result;
use crate::models::Month;
use crate::reports::ReportsProvider;

use super::provider::{AiInsightsSource, InsightsProvider};
use super::types::InsightsResponse;

/// Identifies one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    generation: u64,
    month: Month,
}

impl RequestTicket {
    pub fn month(&self) -> Month {
        self.month
    }
}

/// Generation counter; the newest ticket is the only current one
#[derive(Debug, Default)]
pub struct RequestGuard {
    generation: AtomicU64,
}

impl RequestGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request, superseding every earlier ticket
    pub fn begin(&self, month: Month) -> RequestTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        RequestTicket { generation, month }
    }

    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.generation
    }
}

/// An insights provider plus the guard for the currently selected month
pub struct InsightsSession<R, A> {
    provider: InsightsProvider<R, A>,
    guard: RequestGuard,
}

impl<R, A> InsightsSession<R, A>
where
    R: ReportsProvider,
    A: AiInsightsSource,
{
    pub fn new(provider: InsightsProvider<R, A>) -> Self {
        Self {
            provider,
            guard: RequestGuard::new(),
        }
    }

    pub fn provider(&self) -> &InsightsProvider<R, A> {
        &self.provider
    }

    /// Load insights for `month`
    ///
    /// Returns `Ok(None)` if another `load` started before this one finished;
    /// the result (success or error) of a superseded load is dropped.
    pub async fn load(&self, month: Month) -> Result<Option<InsightsResponse>> {
        let ticket = self.guard.begin(month);
        let result = self.provider.get_insights(month).await;

        if !self.guard.is_current(&ticket) {
            tracing::debug!(month = %ticket.month(), "Discarding superseded insights response");
            return Ok(None);
        }
        result.map(Some)
    }
}
