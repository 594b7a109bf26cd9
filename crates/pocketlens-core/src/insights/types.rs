//! Core types for insights

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::Month;

/// Currency reported when no source names one
pub const DEFAULT_CURRENCY: &str = "THB";

/// How an insight should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightLevel {
    /// Neutral observation
    Info,
    /// Something going well
    Good,
    /// Worth attention
    Warn,
}

impl InsightLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightLevel::Info => "info",
            InsightLevel::Good => "good",
            InsightLevel::Warn => "warn",
        }
    }
}

impl fmt::Display for InsightLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(InsightLevel::Info),
            "good" => Ok(InsightLevel::Good),
            "warn" => Ok(InsightLevel::Warn),
            _ => Err(format!("Unknown insight level: {}", s)),
        }
    }
}

/// Where a response came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightsMode {
    /// The AI-backed endpoint answered
    Ai,
    /// Derived locally from report aggregates
    Fallback,
}

impl InsightsMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightsMode::Ai => "ai",
            InsightsMode::Fallback => "fallback",
        }
    }
}

impl fmt::Display for InsightsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One displayable insight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightItem {
    pub title: String,
    pub detail: String,
    /// Unset for AI items whose level was missing or not one of
    /// `info`/`good`/`warn`; unknown level names are dropped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<InsightLevel>,
}

impl InsightItem {
    pub fn new(title: impl Into<String>, detail: impl Into<String>, level: InsightLevel) -> Self {
        Self {
            title: title.into(),
            detail: detail.into(),
            level: Some(level),
        }
    }

    /// Level used for display; missing levels show as info
    pub fn effective_level(&self) -> InsightLevel {
        self.level.unwrap_or(InsightLevel::Info)
    }
}

/// Insights for one month, in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightsResponse {
    pub month: Month,
    pub base_currency: String,
    pub mode: InsightsMode,
    pub items: Vec<InsightItem>,
}
