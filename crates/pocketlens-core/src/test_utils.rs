//! Test utilities for pocketlens-core
//!
//! - [`MockApiServer`]: a mock finance API on a random local port, for
//!   integration tests and CLI tests that exercise the real HTTP client.
//! - [`FixtureReports`] / [`StaticAi`]: in-memory stand-ins for the reports and
//!   AI seams of the insights provider.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::sync::oneshot;

use crate::error::{Error, Result};
use crate::insights::{AiInsightsSource, InsightsResponse};
use crate::models::{
    CategoryBreakdown, CategoryTotal, CategoryType, Granularity, Month, MonthlySummary, Trend,
    TrendBucket, TrendScope,
};
use crate::reports::ReportsProvider;

// ========== In-memory seams ==========

/// Report fixtures with switchable failures
pub struct FixtureReports {
    pub summary: MonthlySummary,
    pub breakdown: CategoryBreakdown,
    pub trend: Trend,
    pub fail_summary: bool,
    pub fail_by_category: bool,
    pub fail_trend: bool,
    /// Fail every fetch for this month
    pub fail_month: Option<Month>,
    /// Sleep before answering for this month
    pub delay_for: Option<(Month, Duration)>,
    calls: AtomicUsize,
}

impl FixtureReports {
    pub fn new(summary: MonthlySummary, breakdown: CategoryBreakdown, trend: Trend) -> Self {
        Self {
            summary,
            breakdown,
            trend,
            fail_summary: false,
            fail_by_category: false,
            fail_trend: false,
            fail_month: None,
            delay_for: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// A typical month: positive net, three categories, one spike day
    pub fn sample() -> Self {
        Self::new(
            MonthlySummary {
                base_currency: Some("THB".to_string()),
                income: "30000.00".into(),
                expense: "12000.50".into(),
                net: "17999.50".into(),
            },
            CategoryBreakdown {
                base_currency: Some("THB".to_string()),
                items: vec![
                    CategoryTotal::new("Food", "5000.00"),
                    CategoryTotal::new("Rent", "6000.00"),
                    CategoryTotal::new("Transport", "1000.50"),
                ],
            },
            Trend {
                base_currency: Some("THB".to_string()),
                items: vec![
                    TrendBucket::new("2026-02-01", "200.00"),
                    TrendBucket::new("2026-02-02", "6000.00"),
                    TrendBucket::new("2026-02-03", "5800.50"),
                ],
            },
        )
    }

    /// Number of report fetches served so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn enter(&self, month: Month, fail: bool) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some((slow, delay)) = self.delay_for {
            if slow == month {
                tokio::time::sleep(delay).await;
            }
        }
        if fail || self.fail_month == Some(month) {
            return Err(Error::Api {
                status: 503,
                detail: "reports unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ReportsProvider for FixtureReports {
    async fn summary(&self, month: Month) -> Result<MonthlySummary> {
        self.enter(month, self.fail_summary).await?;
        Ok(self.summary.clone())
    }

    async fn by_category(
        &self,
        month: Month,
        _category_type: CategoryType,
    ) -> Result<CategoryBreakdown> {
        self.enter(month, self.fail_by_category).await?;
        Ok(self.breakdown.clone())
    }

    async fn trend(
        &self,
        month: Month,
        _granularity: Granularity,
        _scope: TrendScope,
    ) -> Result<Trend> {
        self.enter(month, self.fail_trend).await?;
        Ok(self.trend.clone())
    }
}

/// AI source with a canned answer (or none)
#[derive(Debug, Clone, Default)]
pub struct StaticAi(Option<InsightsResponse>);

impl StaticAi {
    pub fn answering(response: InsightsResponse) -> Self {
        Self(Some(response))
    }

    pub fn unavailable() -> Self {
        Self(None)
    }
}

#[async_trait]
impl AiInsightsSource for StaticAi {
    async fn try_ai_insights(&self, _month: Month) -> Option<InsightsResponse> {
        self.0.clone()
    }
}

// ========== Mock HTTP server ==========

/// One request as seen by the mock server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
}

/// What the mock AI endpoint does
#[derive(Debug, Clone)]
pub enum AiBehavior {
    /// Answer with this status and a `{"detail": ...}` body
    Status(u16),
    /// Answer 200 with this JSON body
    Body(Value),
    /// Answer 200 with a non-JSON body
    Garbage,
}

struct MockState {
    ai: AiBehavior,
    summary: Value,
    by_category: Value,
    trend: Value,
    reports_failure: Option<u16>,
    wallets: Vec<Value>,
    transactions: Vec<Value>,
    budgets: Vec<Value>,
    next_id: i64,
    requests: Vec<RecordedRequest>,
}

type Shared = Arc<Mutex<MockState>>;

impl Default for MockState {
    fn default() -> Self {
        let cash = json!({
            "id": 1,
            "name": "Cash",
            "type": "cash",
            "currency": { "id": 1, "code": "THB", "name": "Thai Baht", "symbol": "฿" },
            "opening_balance": "1000.00",
            "is_active": true,
            "created_at": "2026-01-01T09:00:00+07:00",
            "updated_at": "2026-01-01T09:00:00+07:00"
        });
        let lunch = json!({
            "id": 1,
            "type": "expense",
            "occurred_at": "2026-02-03T12:30:00+07:00",
            "amount": "120.50",
            "wallet": cash,
            "currency": cash["currency"],
            "fx_rate": "1.00000000",
            "base_amount": "120.50",
            "category": category_by_id(&json!(1)),
            "merchant": "Noodle shop",
            "note": "",
            "receipt_url": "",
            "is_deleted": false,
            "created_at": "2026-02-03T12:31:00+07:00"
        });

        Self {
            ai: AiBehavior::Status(404),
            summary: json!({
                "base_currency": "THB",
                "income": "30000.00",
                "expense": "12000.50",
                "net": "17999.50"
            }),
            by_category: json!({
                "base_currency": "THB",
                "items": [
                    { "category_name": "Food", "total": "5000.00" },
                    { "category_name": "Rent", "total": "6000.00" },
                    { "category_name": "Transport", "total": "1000.50" }
                ]
            }),
            trend: json!({
                "base_currency": "THB",
                "items": [
                    { "bucket": "2026-02-01", "expense": "200.00", "income": "0.00" },
                    { "bucket": "2026-02-02", "expense": "6000.00", "income": "30000.00" },
                    { "bucket": "2026-02-03", "expense": "5800.50", "income": "0.00" }
                ]
            }),
            reports_failure: None,
            wallets: vec![cash],
            transactions: vec![lunch],
            budgets: Vec::new(),
            next_id: 100,
            requests: Vec::new(),
        }
    }
}

/// Mock finance API server for testing
pub struct MockApiServer {
    addr: SocketAddr,
    state: Shared,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockApiServer {
    /// Start the mock server on an available port
    ///
    /// Defaults: AI endpoint answers 404, reports return a sample month.
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(MockState::default()));

        let app = Router::new()
            .route("/api/insights/", get(handle_insights))
            .route("/api/reports/summary/", get(handle_summary))
            .route("/api/reports/by-category/", get(handle_by_category))
            .route("/api/reports/trend/", get(handle_trend))
            .route("/api/wallets/", get(handle_list_wallets).post(handle_create_wallet))
            .route(
                "/api/wallets/:id/",
                get(handle_get_wallet)
                    .patch(handle_patch_wallet)
                    .delete(handle_delete_wallet),
            )
            .route(
                "/api/transactions/",
                get(handle_list_transactions).post(handle_create_transaction),
            )
            .route(
                "/api/transactions/:id/",
                get(handle_get_transaction)
                    .patch(handle_patch_transaction)
                    .delete(handle_delete_transaction),
            )
            .route("/api/categories/", get(handle_categories))
            .route("/api/currencies/", get(handle_currencies))
            .route("/api/budgets/", get(handle_list_budgets).post(handle_create_budget))
            .route("/api/budgets/status/", get(handle_budget_status))
            .route(
                "/api/budgets/:id/",
                axum::routing::delete(handle_delete_budget),
            )
            .layer(middleware::from_fn_with_state(state.clone(), record_request))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            state,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn set_ai(&self, behavior: AiBehavior) {
        self.state.lock().unwrap().ai = behavior;
    }

    /// Make every report endpoint answer with this status (None restores them)
    pub fn set_reports_failure(&self, status: Option<u16>) {
        self.state.lock().unwrap().reports_failure = status;
    }

    pub fn set_summary(&self, body: Value) {
        self.state.lock().unwrap().summary = body;
    }

    pub fn set_by_category(&self, body: Value) {
        self.state.lock().unwrap().by_category = body;
    }

    pub fn set_trend(&self, body: Value) {
        self.state.lock().unwrap().trend = body;
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Requests received for one path
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockApiServer {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn record_request(State(state): State<Shared>, request: Request, next: Next) -> Response {
    let recorded = RecordedRequest {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        query: request.uri().query().map(str::to_string),
        authorization: request
            .headers()
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    };
    state.lock().unwrap().requests.push(recorded);
    next.run(request).await
}

fn error_response(status: u16, detail: &str) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({ "detail": detail }))).into_response()
}

fn report_response(state: &Shared, pick: fn(&MockState) -> &Value) -> Response {
    let state = state.lock().unwrap();
    match state.reports_failure {
        Some(status) => error_response(status, "Reports temporarily unavailable"),
        None => Json(pick(&state).clone()).into_response(),
    }
}

async fn handle_insights(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !params.contains_key("month") {
        return error_response(400, "month is required");
    }
    let ai = state.lock().unwrap().ai.clone();
    match ai {
        AiBehavior::Status(status) => error_response(status, "Not found. Generate via POST first."),
        AiBehavior::Body(body) => Json(body).into_response(),
        AiBehavior::Garbage => (StatusCode::OK, "<html>oops</html>").into_response(),
    }
}

async fn handle_summary(State(state): State<Shared>) -> Response {
    report_response(&state, |s| &s.summary)
}

async fn handle_by_category(State(state): State<Shared>) -> Response {
    report_response(&state, |s| &s.by_category)
}

async fn handle_trend(State(state): State<Shared>) -> Response {
    report_response(&state, |s| &s.trend)
}

async fn handle_list_wallets(State(state): State<Shared>) -> Json<Value> {
    Json(Value::Array(state.lock().unwrap().wallets.clone()))
}

async fn handle_get_wallet(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let state = state.lock().unwrap();
    match state.wallets.iter().find(|w| w["id"] == id) {
        Some(wallet) => Json(wallet.clone()).into_response(),
        None => error_response(404, "Not found."),
    }
}

async fn handle_create_wallet(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let Some(name) = body.get("name").and_then(Value::as_str).filter(|n| !n.is_empty()) else {
        return error_response(400, "name is required");
    };

    let mut state = state.lock().unwrap();
    state.next_id += 1;
    let wallet = json!({
        "id": state.next_id,
        "name": name,
        "type": body.get("type").cloned().unwrap_or(json!("cash")),
        "currency": { "id": body["currency_id"], "code": "THB", "name": "Thai Baht" },
        "opening_balance": body.get("opening_balance").cloned().unwrap_or(json!("0")),
        "is_active": body.get("is_active").cloned().unwrap_or(json!(true)),
    });
    state.wallets.push(wallet.clone());
    (StatusCode::CREATED, Json(wallet)).into_response()
}

async fn handle_patch_wallet(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    let Some(wallet) = state.wallets.iter_mut().find(|w| w["id"] == id) else {
        return error_response(404, "Not found.");
    };
    if let (Some(target), Some(patch)) = (wallet.as_object_mut(), body.as_object()) {
        for (k, v) in patch {
            target.insert(k.clone(), v.clone());
        }
    }
    Json(wallet.clone()).into_response()
}

async fn handle_delete_wallet(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let mut state = state.lock().unwrap();
    let before = state.wallets.len();
    state.wallets.retain(|w| w["id"] != id);
    if state.wallets.len() == before {
        error_response(404, "Not found.")
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

fn categories() -> Vec<Value> {
    vec![
        json!({ "id": 1, "type": "expense", "name": "Food", "parent": null }),
        json!({ "id": 2, "type": "expense", "name": "Rent", "parent": null }),
        json!({ "id": 3, "type": "income", "name": "Salary", "parent": null }),
    ]
}

fn category_by_id(id: &Value) -> Option<Value> {
    categories().into_iter().find(|c| &c["id"] == id)
}

async fn handle_categories(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let wanted = params.get("type").cloned();
    let filtered: Vec<Value> = categories()
        .into_iter()
        .filter(|c| wanted.as_deref().map_or(true, |t| c["type"] == t))
        .collect();
    Json(Value::Array(filtered))
}

async fn handle_currencies() -> Json<Value> {
    // Paginated like a DRF list view
    Json(json!({
        "count": 2,
        "next": null,
        "previous": null,
        "results": [
            { "id": 1, "code": "THB", "name": "Thai Baht", "symbol": "฿" },
            { "id": 2, "code": "USD", "name": "US Dollar", "symbol": "$" }
        ]
    }))
}

fn live_transaction(state: &mut MockState, id: i64) -> Option<&mut Value> {
    state
        .transactions
        .iter_mut()
        .find(|t| t["id"] == id && t["is_deleted"] != true)
}

/// Matches a query filter against a JSON field; absent filters match everything
fn filter_matches(params: &HashMap<String, String>, key: &str, field: &Value) -> bool {
    params.get(key).map_or(true, |wanted| match field {
        Value::String(s) => s == wanted,
        other => other.to_string() == *wanted,
    })
}

async fn handle_list_transactions(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let state = state.lock().unwrap();
    let mut items: Vec<Value> = state
        .transactions
        .iter()
        .filter(|t| t["is_deleted"] != true)
        .filter(|t| filter_matches(&params, "type", &t["type"]))
        .filter(|t| filter_matches(&params, "wallet", &t["wallet"]["id"]))
        .filter(|t| filter_matches(&params, "category", &t["category"]["id"]))
        .cloned()
        .collect();
    items.sort_by(|a, b| b["occurred_at"].as_str().cmp(&a["occurred_at"].as_str()));
    Json(json!({ "count": items.len(), "next": null, "previous": null, "results": items }))
}

async fn handle_get_transaction(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let mut state = state.lock().unwrap();
    match live_transaction(&mut state, id) {
        Some(tx) => Json(tx.clone()).into_response(),
        None => error_response(404, "Not found."),
    }
}

async fn handle_create_transaction(
    State(state): State<Shared>,
    Json(body): Json<Value>,
) -> Response {
    let amount_ok = body["amount"]
        .as_str()
        .and_then(|a| a.parse::<f64>().ok())
        .is_some_and(|a| a >= 0.01);
    if !amount_ok {
        return error_response(400, "Ensure this value is greater than or equal to 0.01.");
    }

    let mut state = state.lock().unwrap();
    let Some(wallet) = state
        .wallets
        .iter()
        .find(|w| w["id"] == body["wallet_id"])
        .cloned()
    else {
        return error_response(400, "Invalid pk for wallet_id - object does not exist.");
    };
    let category = match &body["category_id"] {
        Value::Null => None,
        id => match category_by_id(id) {
            Some(c) => Some(c),
            None => return error_response(400, "Invalid pk for category_id - object does not exist."),
        },
    };

    state.next_id += 1;
    let tx = json!({
        "id": state.next_id,
        "type": body["type"],
        "occurred_at": body["occurred_at"],
        "amount": body["amount"],
        "currency": wallet["currency"],
        "wallet": wallet,
        "fx_rate": "1.00000000",
        "base_amount": body["amount"],
        "category": category,
        "merchant": body.get("merchant").cloned().unwrap_or(json!("")),
        "note": body.get("note").cloned().unwrap_or(json!("")),
        "receipt_url": "",
        "is_deleted": false,
        "created_at": "2026-02-01T00:00:00+00:00"
    });
    state.transactions.push(tx.clone());
    (StatusCode::CREATED, Json(tx)).into_response()
}

async fn handle_patch_transaction(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    let Some(tx) = live_transaction(&mut state, id) else {
        return error_response(404, "Not found.");
    };
    if let (Some(target), Some(patch)) = (tx.as_object_mut(), body.as_object()) {
        for (k, v) in patch {
            match k.as_str() {
                "category_id" => {
                    target.insert("category".to_string(), json!(category_by_id(v)));
                }
                "amount" => {
                    target.insert("amount".to_string(), v.clone());
                    target.insert("base_amount".to_string(), v.clone());
                }
                _ => {
                    target.insert(k.clone(), v.clone());
                }
            }
        }
    }
    Json(tx.clone()).into_response()
}

async fn handle_delete_transaction(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let mut state = state.lock().unwrap();
    match live_transaction(&mut state, id) {
        Some(tx) => {
            tx["is_deleted"] = json!(true);
            StatusCode::NO_CONTENT.into_response()
        }
        None => error_response(404, "Not found."),
    }
}

async fn handle_list_budgets(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let state = state.lock().unwrap();
    let month = params.get("month").cloned().unwrap_or_default();
    let items: Vec<Value> = state
        .budgets
        .iter()
        .filter(|b| b["month"] == month.as_str())
        .cloned()
        .collect();
    Json(json!({ "count": items.len(), "next": null, "previous": null, "results": items }))
}

async fn handle_create_budget(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    state.next_id += 1;
    let budget = json!({
        "id": state.next_id,
        "month": body["month"],
        "scope": body["scope"],
        "limit_base_amount": body["limit_base_amount"],
        "category": null,
        "created_at": "2026-02-01T00:00:00+00:00",
        "alert_80_sent": false,
        "alert_100_sent": false
    });
    state.budgets.push(budget.clone());
    (StatusCode::CREATED, Json(budget)).into_response()
}

async fn handle_delete_budget(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let mut state = state.lock().unwrap();
    let before = state.budgets.len();
    state.budgets.retain(|b| b["id"] != id);
    if state.budgets.len() == before {
        error_response(404, "Not found.")
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

async fn handle_budget_status(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let state = state.lock().unwrap();
    let month = params.get("month").cloned().unwrap_or_default();
    let items: Vec<Value> = state
        .budgets
        .iter()
        .filter(|b| b["month"] == month.as_str())
        .map(|b| {
            json!({
                "budget_id": b["id"],
                "title": "Total",
                "scope": b["scope"],
                "category_id": null,
                "limit": b["limit_base_amount"],
                "spent": "12000.50",
                "remaining": "2999.50",
                "percent_used": "80.00",
                "alert_80_sent": true,
                "alert_100_sent": false
            })
        })
        .collect();
    Json(json!({ "month": month, "base_currency": "THB", "items": items }))
}
