//! Data models for Pocketlens
//!
//! Typed mirrors of the finance API payloads. Monetary values arrive as decimal
//! strings (sometimes bare numbers or null), so they are wrapped in [`Amount`],
//! which keeps the raw text for display and coerces to a finite `f64` for math.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Treat an explicit JSON `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ========== Month ==========

/// A calendar month in `YYYY-MM` form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// The month containing today's local date
    pub fn current() -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bytes = s.as_bytes();
        if bytes.len() != 7 || bytes[4] != b'-' {
            return Err(format!("Invalid month: {} (expected YYYY-MM)", s));
        }
        let date = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
            .map_err(|_| format!("Invalid month: {} (expected YYYY-MM)", s))?;
        Ok(Self {
            year: date.year(),
            month: date.month(),
        })
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ========== Amount ==========

/// A monetary value as sent by the API
///
/// `value()` never returns NaN or infinity: anything that does not parse to a
/// finite number (including a missing field) counts as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Amount {
    raw: String,
}

impl Amount {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The text exactly as received (empty when the field was missing)
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn value(&self) -> f64 {
        finite_or_zero(self.raw.trim().parse::<f64>().unwrap_or(0.0))
    }
}

/// Map NaN and infinities to zero, and `-0.0` to `0.0`
pub fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() && v != 0.0 {
        v
    } else {
        0.0
    }
}

/// Fixed-point text with `digits` decimals, rounding exact ties away from zero
///
/// The std formatter rounds ties to even, so `10.125` would print as `10.12`.
/// Values that are only close to a tie in binary (like `1.005`) round by
/// their true value.
pub fn to_fixed(v: f64, digits: usize) -> String {
    let v = finite_or_zero(v);
    let abs = v.abs();
    let exact = format!("{:.1074}", abs);
    let is_tie = exact.split_once('.').is_some_and(|(_, frac)| {
        frac.as_bytes().get(digits) == Some(&b'5')
            && frac.as_bytes()[digits + 1..].iter().all(|&b| b == b'0')
    });
    let rounded = if is_tie {
        f64::from_bits(abs.to_bits() + 1)
    } else {
        abs
    };
    let sign = if v < 0.0 { "-" } else { "" };
    format!("{}{:.*}", sign, digits, rounded)
}

impl From<f64> for Amount {
    fn from(v: f64) -> Self {
        Self { raw: v.to_string() }
    }
}

impl From<&str> for Amount {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.raw.is_empty() {
            write!(f, "0")
        } else {
            write!(f, "{}", self.raw)
        }
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawAmount {
            Text(String),
            Number(serde_json::Number),
        }

        let raw = match Option::<RawAmount>::deserialize(deserializer)? {
            Some(RawAmount::Text(s)) => s,
            Some(RawAmount::Number(n)) => n.to_string(),
            None => String::new(),
        };
        Ok(Self { raw })
    }
}

// ========== Report parameters ==========

/// Transaction/category direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryType {
    Expense,
    Income,
}

impl CategoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CategoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            _ => Err(format!(
                "Unknown category type: {} (valid: expense, income)",
                s
            )),
        }
    }
}

/// Trend bucket size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl std::str::FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(format!(
                "Unknown granularity: {} (valid: daily, weekly, monthly)",
                s
            )),
        }
    }
}

/// Which transactions a trend covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendScope {
    All,
    Expense,
    Income,
}

impl TrendScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }
}

impl std::str::FromStr for TrendScope {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            _ => Err(format!(
                "Unknown trend scope: {} (valid: all, expense, income)",
                s
            )),
        }
    }
}

// ========== Reports ==========

/// Income/expense/net for one month
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    #[serde(default)]
    pub base_currency: Option<String>,
    #[serde(default)]
    pub income: Amount,
    #[serde(default)]
    pub expense: Amount,
    #[serde(default)]
    pub net: Amount,
}

/// Spending or income per category, unordered
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    #[serde(default)]
    pub base_currency: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<CategoryTotal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub total: Amount,
}

impl CategoryTotal {
    pub fn new(name: impl Into<String>, total: impl Into<Amount>) -> Self {
        Self {
            category_name: Some(name.into()),
            total: total.into(),
        }
    }

    /// Display name; the API sends null for uncategorized spending
    pub fn name(&self) -> &str {
        self.category_name.as_deref().unwrap_or("Uncategorized")
    }
}

/// Time-bucketed totals, in chronological order as received
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    #[serde(default)]
    pub base_currency: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<TrendBucket>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendBucket {
    #[serde(default)]
    pub bucket: Option<String>,
    #[serde(default)]
    pub expense: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income: Option<Amount>,
}

impl TrendBucket {
    pub fn new(bucket: impl Into<String>, expense: impl Into<Amount>) -> Self {
        Self {
            bucket: Some(bucket.into()),
            expense: expense.into(),
            income: None,
        }
    }
}

// ========== Wallets ==========

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalletType {
    Cash,
    Bank,
    Credit,
    Ewallet,
}

impl WalletType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Bank => "bank",
            Self::Credit => "credit",
            Self::Ewallet => "ewallet",
        }
    }
}

impl fmt::Display for WalletType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WalletType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cash" => Ok(Self::Cash),
            "bank" => Ok(Self::Bank),
            "credit" => Ok(Self::Credit),
            "ewallet" | "e-wallet" => Ok(Self::Ewallet),
            _ => Err(format!(
                "Unknown wallet type: {} (valid: cash, bank, credit, ewallet)",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type", default = "default_wallet_type")]
    pub wallet_type: WalletType,
    #[serde(default)]
    pub currency: Option<Currency>,
    #[serde(default)]
    pub opening_balance: Amount,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<FixedOffset>>,
}

fn default_wallet_type() -> WalletType {
    WalletType::Cash
}

fn default_true() -> bool {
    true
}

/// Body for creating a wallet
#[derive(Debug, Clone, Serialize)]
pub struct NewWallet {
    pub name: String,
    #[serde(rename = "type")]
    pub wallet_type: WalletType,
    pub currency_id: i64,
    pub opening_balance: String,
    pub is_active: bool,
}

/// Partial update for a wallet (PATCH)
#[derive(Debug, Clone, Default, Serialize)]
pub struct WalletUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub wallet_type: Option<WalletType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

// ========== Currencies & categories ==========

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    pub id: i64,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: CategoryType,
    #[serde(default)]
    pub parent: Option<i64>,
}

/// Category as nested inside budgets and transactions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type", default)]
    pub category_type: Option<CategoryType>,
    #[serde(default)]
    pub parent: Option<i64>,
}

// ========== Transactions ==========

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Expense,
    Income,
    TransferOut,
    TransferIn,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
            Self::TransferOut => "transfer_out",
            Self::TransferIn => "transfer_in",
        }
    }

    /// Transfer legs are created in pairs by the transfer endpoint, never directly
    pub fn is_transfer(&self) -> bool {
        matches!(self, Self::TransferOut | Self::TransferIn)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            "transfer_out" => Ok(Self::TransferOut),
            "transfer_in" => Ok(Self::TransferIn),
            _ => Err(format!(
                "Unknown transaction type: {} (valid: expense, income, transfer_out, transfer_in)",
                s
            )),
        }
    }
}

/// A ledger entry. Amounts are in the wallet's currency; `base_amount` is the
/// same value converted at `fx_rate` into the user's base currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(default)]
    pub occurred_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub amount: Amount,
    #[serde(default)]
    pub wallet: Option<Wallet>,
    #[serde(default)]
    pub currency: Option<Currency>,
    #[serde(default)]
    pub fx_rate: Amount,
    #[serde(default)]
    pub base_amount: Amount,
    #[serde(default)]
    pub category: Option<CategoryRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub merchant: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub note: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub receipt_url: String,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<FixedOffset>>,
}

/// Body for creating a transaction
#[derive(Debug, Clone, Serialize)]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub occurred_at: DateTime<FixedOffset>,
    pub amount: String,
    pub wallet_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    pub merchant: String,
    pub note: String,
}

/// Partial update for a transaction (PATCH)
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransactionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurred_at: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_url: Option<String>,
}

impl TransactionUpdate {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.occurred_at.is_none()
            && self.category_id.is_none()
            && self.merchant.is_none()
            && self.note.is_none()
            && self.receipt_url.is_none()
    }
}

/// Query filters for listing transactions; unset fields are not sent
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransactionFilter {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<i64>,
}

// ========== Budgets ==========

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetScope {
    Total,
    Category,
}

impl BudgetScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Total => "total",
            Self::Category => "category",
        }
    }
}

impl FromStr for BudgetScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "total" => Ok(Self::Total),
            "category" => Ok(Self::Category),
            _ => Err(format!("Unknown budget scope: {} (valid: total, category)", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub month: String,
    pub scope: BudgetScope,
    #[serde(default)]
    pub limit_base_amount: Amount,
    #[serde(default)]
    pub category: Option<CategoryRef>,
    #[serde(default)]
    pub created_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub alert_80_sent: Option<bool>,
    #[serde(default)]
    pub alert_100_sent: Option<bool>,
}

/// Body for creating a budget
#[derive(Debug, Clone, Serialize)]
pub struct NewBudget {
    pub month: Month,
    pub scope: BudgetScope,
    pub limit_base_amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatusItem {
    pub budget_id: i64,
    pub title: String,
    pub scope: BudgetScope,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub limit: Amount,
    #[serde(default)]
    pub spent: Amount,
    #[serde(default)]
    pub remaining: Amount,
    #[serde(default)]
    pub percent_used: Amount,
    #[serde(default)]
    pub alert_80_sent: bool,
    #[serde(default)]
    pub alert_100_sent: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub month: String,
    #[serde(default)]
    pub base_currency: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<BudgetStatusItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_parse_and_display() {
        let m: Month = "2026-03".parse().unwrap();
        assert_eq!(m.year(), 2026);
        assert_eq!(m.month(), 3);
        assert_eq!(m.to_string(), "2026-03");
    }

    #[test]
    fn test_month_rejects_bad_input() {
        assert!("2026-13".parse::<Month>().is_err());
        assert!("2026-1".parse::<Month>().is_err());
        assert!("202603".parse::<Month>().is_err());
        assert!("march".parse::<Month>().is_err());
    }

    #[test]
    fn test_to_fixed_rounds_ties_away_from_zero() {
        assert_eq!(to_fixed(10.125, 2), "10.13");
        assert_eq!(to_fixed(12.25, 1), "12.3");
        assert_eq!(to_fixed(0.5, 0), "1");
        assert_eq!(to_fixed(-2.5, 0), "-3");
        assert_eq!(to_fixed(-10.125, 2), "-10.13");
    }

    #[test]
    fn test_to_fixed_uses_binary_value() {
        // 1.005 is stored just below the tie
        assert_eq!(to_fixed(1.005, 2), "1.00");
        assert_eq!(to_fixed(1234.5, 2), "1234.50");
        assert_eq!(to_fixed(2.0 / 3.0, 1), "0.7");
    }

    #[test]
    fn test_to_fixed_non_finite_and_negative_zero() {
        assert_eq!(to_fixed(f64::NAN, 2), "0.00");
        assert_eq!(to_fixed(f64::INFINITY, 1), "0.0");
        assert_eq!(to_fixed(-0.0, 2), "0.00");
    }

    #[test]
    fn test_transaction_type_parse() {
        assert_eq!("Expense".parse::<TransactionType>(), Ok(TransactionType::Expense));
        assert_eq!(
            "transfer-out".parse::<TransactionType>(),
            Ok(TransactionType::TransferOut)
        );
        assert!("refund".parse::<TransactionType>().is_err());
        assert!(TransactionType::TransferIn.is_transfer());
        assert!(!TransactionType::Income.is_transfer());
    }

    #[test]
    fn test_transaction_deserializes_nested_payload() {
        let tx: Transaction = serde_json::from_value(serde_json::json!({
            "id": 7,
            "type": "expense",
            "occurred_at": "2026-02-03T12:30:00+07:00",
            "amount": "120.50",
            "wallet": { "id": 1, "name": "Cash", "type": "cash" },
            "currency": { "id": 1, "code": "THB", "name": "Thai Baht", "symbol": "฿" },
            "fx_rate": "1.00000000",
            "base_amount": "120.50",
            "category": { "id": 3, "type": "expense", "name": "Food", "parent": null },
            "merchant": "Noodle shop",
            "note": null,
            "is_deleted": false
        }))
        .unwrap();

        assert_eq!(tx.transaction_type, TransactionType::Expense);
        assert_eq!(tx.amount.value(), 120.5);
        assert_eq!(tx.wallet.unwrap().name, "Cash");
        assert_eq!(tx.category.unwrap().name, "Food");
        assert_eq!(tx.note, "");
        assert_eq!(tx.receipt_url, "");
        assert!(tx.created_at.is_none());
    }

    #[test]
    fn test_transaction_filter_and_update_skip_unset() {
        let filter = TransactionFilter {
            transaction_type: Some(TransactionType::Income),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            serde_json::json!({ "type": "income" })
        );

        let update = TransactionUpdate {
            note: Some("lunch".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({ "note": "lunch" })
        );
    }

    #[test]
    fn test_amount_coercion() {
        assert_eq!(Amount::new("1234.50").value(), 1234.5);
        assert_eq!(Amount::new(" 12 ").value(), 12.0);
        assert_eq!(Amount::new("").value(), 0.0);
        assert_eq!(Amount::new("abc").value(), 0.0);
        assert_eq!(Amount::new("NaN").value(), 0.0);
        assert_eq!(Amount::new("inf").value(), 0.0);
        assert!(Amount::new("-0").value().is_sign_positive());
    }

    #[test]
    fn test_amount_deserializes_string_number_and_null() {
        let summary: MonthlySummary = serde_json::from_value(serde_json::json!({
            "base_currency": "THB",
            "income": "1000.00",
            "expense": 250.5,
            "net": null
        }))
        .unwrap();

        assert_eq!(summary.income.raw(), "1000.00");
        assert_eq!(summary.expense.value(), 250.5);
        assert_eq!(summary.net.value(), 0.0);
    }

    #[test]
    fn test_breakdown_null_items() {
        let breakdown: CategoryBreakdown =
            serde_json::from_value(serde_json::json!({ "items": null })).unwrap();
        assert!(breakdown.items.is_empty());
        assert!(breakdown.base_currency.is_none());
    }

    #[test]
    fn test_category_total_name_fallback() {
        let total: CategoryTotal =
            serde_json::from_value(serde_json::json!({ "category_name": null, "total": "5" }))
                .unwrap();
        assert_eq!(total.name(), "Uncategorized");
    }

    #[test]
    fn test_wallet_deserialize() {
        let wallet: Wallet = serde_json::from_value(serde_json::json!({
            "id": 3,
            "name": "Daily cash",
            "type": "cash",
            "currency": { "id": 1, "code": "THB", "name": "Thai Baht", "symbol": "฿" },
            "opening_balance": "500.00",
            "is_active": true,
            "created_at": "2026-01-02T10:00:00+07:00",
            "updated_at": "2026-01-02T10:00:00+07:00"
        }))
        .unwrap();

        assert_eq!(wallet.wallet_type, WalletType::Cash);
        assert_eq!(wallet.currency.unwrap().code, "THB");
        assert_eq!(wallet.opening_balance.value(), 500.0);
    }

    #[test]
    fn test_wallet_update_skips_unset_fields() {
        let update = WalletUpdate {
            name: Some("Savings".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "Savings" }));
    }

    #[test]
    fn test_new_budget_serializes_month() {
        let budget = NewBudget {
            month: "2026-02".parse().unwrap(),
            scope: BudgetScope::Total,
            limit_base_amount: "15000".to_string(),
            category_id: None,
        };
        let json = serde_json::to_value(&budget).unwrap();
        assert_eq!(json["month"], "2026-02");
        assert_eq!(json["scope"], "total");
        assert!(json.get("category_id").is_none());
    }
}
