//! Fallback insights derived from report aggregates
//!
//! Used when the AI endpoint is unavailable. Produces, in this order:
//!
//! 1. Net balance (always)
//! 2. Spending rate (always)
//! 3. Top expense categories (always)
//! 4. Highest spending day (only when some day has expense > 0)
//! 5. Suggestion (only when the top category has total > 0)
//!
//! All amounts render with two decimals and the spending ratio with one, with
//! exact halves rounded away from zero.

use crate::models::{
    finite_or_zero, to_fixed, CategoryBreakdown, CategoryTotal, Month, MonthlySummary, Trend,
    TrendBucket,
};

use super::types::{InsightItem, InsightLevel, InsightsMode, InsightsResponse, DEFAULT_CURRENCY};

/// How many categories the top-categories insight lists
pub const TOP_CATEGORY_COUNT: usize = 3;

/// Spending ratio (percent of income) above which the rate is a warning
pub const SPENDING_RATE_WARN_PERCENT: f64 = 80.0;

/// Derive the fallback response for `month`
pub fn derive_fallback_insights(
    month: Month,
    summary: &MonthlySummary,
    breakdown: &CategoryBreakdown,
    trend: &Trend,
) -> InsightsResponse {
    let currency = summary
        .base_currency
        .as_deref()
        .or(breakdown.base_currency.as_deref())
        .or(trend.base_currency.as_deref())
        .unwrap_or(DEFAULT_CURRENCY)
        .to_string();

    let income = summary.income.value();
    let expense = summary.expense.value();
    let net = summary.net.value();

    let top_cats = top_categories(&breakdown.items, TOP_CATEGORY_COUNT);
    let spike = spending_spike(&trend.items);

    let mut items = Vec::with_capacity(5);

    items.push(InsightItem::new(
        "Net balance",
        format!(
            "Your net for this month is {} {} (income {} - expense {}).",
            money(net),
            currency,
            money(income),
            money(expense)
        ),
        if net >= 0.0 {
            InsightLevel::Good
        } else {
            InsightLevel::Warn
        },
    ));

    items.push(spending_rate(income, expense));

    if top_cats.is_empty() {
        items.push(InsightItem::new(
            "Top expense categories",
            "No category spending data found.",
            InsightLevel::Info,
        ));
    } else {
        let listed = top_cats
            .iter()
            .map(|c| format!("{} ({} {})", c.name(), money(c.total.value()), currency))
            .collect::<Vec<_>>()
            .join(", ");
        items.push(InsightItem::new(
            "Top expense categories",
            format!("Top categories: {}.", listed),
            InsightLevel::Info,
        ));
    }

    if let Some((day, amount)) = spike {
        items.push(InsightItem::new(
            "Highest spending day",
            format!(
                "Your highest expense day was {} with {} {}.",
                day,
                money(amount),
                currency
            ),
            InsightLevel::Info,
        ));
    }

    if let Some(top) = top_cats.first().filter(|c| c.total.value() > 0.0) {
        items.push(InsightItem::new(
            "Suggestion",
            format!(
                "Consider setting a budget for \"{}\" to control your biggest spending area.",
                top.name()
            ),
            InsightLevel::Good,
        ));
    }

    tracing::debug!(month = %month, count = items.len(), "Derived fallback insights");

    InsightsResponse {
        month,
        base_currency: currency,
        mode: InsightsMode::Fallback,
        items,
    }
}

fn spending_rate(income: f64, expense: f64) -> InsightItem {
    if income > 0.0 {
        let ratio = finite_or_zero(expense / income * 100.0);
        InsightItem::new(
            "Spending rate",
            format!("You spent {}% of your income.", to_fixed(ratio, 1)),
            if ratio > SPENDING_RATE_WARN_PERCENT {
                InsightLevel::Warn
            } else {
                InsightLevel::Info
            },
        )
    } else {
        InsightItem::new(
            "Spending rate",
            "Income is 0 this month, so expense tracking is critical.",
            InsightLevel::Warn,
        )
    }
}

/// Largest `n` categories by total; equal totals keep their input order
pub fn top_categories(items: &[CategoryTotal], n: usize) -> Vec<&CategoryTotal> {
    let mut sorted: Vec<&CategoryTotal> = items.iter().collect();
    // sort_by is stable
    sorted.sort_by(|a, b| b.total.value().total_cmp(&a.total.value()));
    sorted.truncate(n);
    sorted
}

/// Bucket with the largest expense (first one on ties) and that expense
///
/// `None` when there are no buckets, the maximum is not positive, or the
/// winning bucket has no label.
pub fn spending_spike(items: &[TrendBucket]) -> Option<(&str, f64)> {
    let mut best: Option<(&TrendBucket, f64)> = None;
    for item in items {
        let expense = item.expense.value();
        match best {
            Some((_, max)) if expense <= max => {}
            _ => best = Some((item, expense)),
        }
    }

    let (bucket, max) = best?;
    let label = bucket.bucket.as_deref().filter(|b| !b.is_empty())?;
    (max > 0.0).then_some((label, max))
}

fn money(v: f64) -> String {
    to_fixed(v, 2)
}
