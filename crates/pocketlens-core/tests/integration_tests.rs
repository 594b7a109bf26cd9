//! Integration tests for pocketlens-core
//!
//! These tests run the real HTTP client against the mock finance API and
//! exercise the insights AI → fallback workflow end to end.

use pocketlens_core::{
    models::{
        BudgetScope, CategoryType, NewBudget, NewTransaction, NewWallet, TransactionFilter,
        TransactionType, TransactionUpdate, WalletType, WalletUpdate,
    },
    test_utils::{AiBehavior, MockApiServer},
    ApiClient, ClientConfig, Error, InsightLevel, InsightsMode, InsightsProvider, Month,
};
use serde_json::json;

fn month() -> Month {
    "2026-02".parse().unwrap()
}

fn client_for(server: &MockApiServer) -> ApiClient {
    ApiClient::new(&ClientConfig::with_base_url(&server.url())).unwrap()
}

// =============================================================================
// Insights
// =============================================================================

#[tokio::test]
async fn test_missing_ai_insights_fall_back_to_reports() {
    let server = MockApiServer::start().await;
    let provider = InsightsProvider::from_client(client_for(&server));

    let response = provider.get_insights(month()).await.unwrap();

    assert_eq!(response.mode, InsightsMode::Fallback);
    assert_eq!(response.month, month());
    assert_eq!(response.base_currency, "THB");

    let titles: Vec<&str> = response.items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Net balance",
            "Spending rate",
            "Top expense categories",
            "Highest spending day",
            "Suggestion"
        ]
    );
    assert_eq!(
        response.items[0].detail,
        "Your net for this month is 17999.50 THB (income 30000.00 - expense 12000.50)."
    );
    assert_eq!(response.items[1].detail, "You spent 40.0% of your income.");
    assert_eq!(
        response.items[2].detail,
        "Top categories: Rent (6000.00 THB), Food (5000.00 THB), Transport (1000.50 THB)."
    );
    assert_eq!(
        response.items[3].detail,
        "Your highest expense day was 2026-02-02 with 6000.00 THB."
    );
    assert_eq!(
        response.items[4].detail,
        "Consider setting a budget for \"Rent\" to control your biggest spending area."
    );

    // AI was tried first, then all three reports
    assert_eq!(server.requests_to("/api/insights/").len(), 1);
    assert_eq!(server.requests_to("/api/reports/summary/").len(), 1);
    assert_eq!(server.requests_to("/api/reports/by-category/").len(), 1);
    assert_eq!(server.requests_to("/api/reports/trend/").len(), 1);
}

#[tokio::test]
async fn test_fallback_report_queries() {
    let server = MockApiServer::start().await;
    let provider = InsightsProvider::from_client(client_for(&server));
    provider.get_insights(month()).await.unwrap();

    let query = |path: &str| server.requests_to(path)[0].query.clone().unwrap_or_default();
    assert_eq!(query("/api/insights/"), "month=2026-02");
    assert_eq!(query("/api/reports/summary/"), "month=2026-02");
    assert_eq!(query("/api/reports/by-category/"), "month=2026-02&type=expense");
    assert_eq!(
        query("/api/reports/trend/"),
        "month=2026-02&granularity=daily&scope=all"
    );
}

#[tokio::test]
async fn test_ai_payload_is_normalized() {
    let server = MockApiServer::start().await;
    server.set_ai(AiBehavior::Body(json!({
        "currency": "USD",
        "insights": [{ "text": "hi" }, { "title": "Dining", "detail": "Up 20%", "level": "warn" }]
    })));
    let provider = InsightsProvider::from_client(client_for(&server));

    let response = provider.get_insights(month()).await.unwrap();

    assert_eq!(response.mode, InsightsMode::Ai);
    assert_eq!(response.base_currency, "USD");
    assert_eq!(response.items.len(), 2);
    assert_eq!(response.items[0].title, "Insight");
    assert_eq!(response.items[0].detail, "hi");
    assert_eq!(response.items[0].level, None);
    assert_eq!(response.items[1].level, Some(InsightLevel::Warn));

    // AI answered, so no report was fetched
    assert!(server.requests_to("/api/reports/summary/").is_empty());
}

#[tokio::test]
async fn test_ai_server_error_and_garbage_fall_back() {
    let server = MockApiServer::start().await;
    let provider = InsightsProvider::from_client(client_for(&server));

    server.set_ai(AiBehavior::Status(500));
    let response = provider.get_insights(month()).await.unwrap();
    assert_eq!(response.mode, InsightsMode::Fallback);

    server.set_ai(AiBehavior::Garbage);
    let response = provider.get_insights(month()).await.unwrap();
    assert_eq!(response.mode, InsightsMode::Fallback);

    server.set_ai(AiBehavior::Body(json!({ "items": "not a list" })));
    let response = provider.get_insights(month()).await.unwrap();
    assert_eq!(response.mode, InsightsMode::Fallback);
}

#[tokio::test]
async fn test_report_failure_without_ai_is_an_error() {
    let server = MockApiServer::start().await;
    server.set_reports_failure(Some(500));
    let provider = InsightsProvider::from_client(client_for(&server));

    let err = provider.get_insights(month()).await.unwrap_err();
    match err {
        Error::Api { status, detail } => {
            assert_eq!(status, 500);
            assert_eq!(detail, "Reports temporarily unavailable");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_report_failure_ignored_when_ai_answers() {
    let server = MockApiServer::start().await;
    server.set_reports_failure(Some(500));
    server.set_ai(AiBehavior::Body(json!({ "items": [] })));
    let provider = InsightsProvider::from_client(client_for(&server));

    let response = provider.get_insights(month()).await.unwrap();
    assert_eq!(response.mode, InsightsMode::Ai);
    assert!(response.items.is_empty());
    assert_eq!(response.base_currency, "THB");
}

#[tokio::test]
async fn test_numeric_and_null_report_values() {
    let server = MockApiServer::start().await;
    server.set_summary(json!({ "income": 0, "expense": 250.5, "net": -250.5 }));
    server.set_by_category(json!({ "items": null }));
    server.set_trend(json!({ "items": [{ "bucket": "2026-02-01", "expense": "0.00" }] }));
    let provider = InsightsProvider::from_client(client_for(&server));

    let response = provider.get_insights(month()).await.unwrap();

    assert_eq!(response.base_currency, "THB");
    assert_eq!(response.items.len(), 3);
    assert_eq!(response.items[0].level, Some(InsightLevel::Warn));
    assert_eq!(
        response.items[1].detail,
        "Income is 0 this month, so expense tracking is critical."
    );
    assert_eq!(response.items[2].detail, "No category spending data found.");
}

// =============================================================================
// Client plumbing
// =============================================================================

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let server = MockApiServer::start().await;
    let mut config = ClientConfig::with_base_url(&server.url());
    config.access_token = Some("secret-token".to_string());
    let client = ApiClient::new(&config).unwrap();

    client.list_currencies().await.unwrap();

    let requests = server.requests_to("/api/currencies/");
    assert_eq!(
        requests[0].authorization.as_deref(),
        Some("Bearer secret-token")
    );
}

#[tokio::test]
async fn test_token_provider_is_asked_per_request() {
    let server = MockApiServer::start().await;
    let config = ClientConfig::with_base_url(&server.url());
    let client = ApiClient::with_token_provider(&config, || None::<String>).unwrap();

    client.list_currencies().await.unwrap();
    assert!(server.requests()[0].authorization.is_none());
}

#[tokio::test]
async fn test_unreachable_server_is_http_error() {
    // Bind then drop to get a port nothing listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(&ClientConfig::with_base_url(&format!("http://{addr}"))).unwrap();
    let err = client.get_reports_summary(month()).await.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
    assert_eq!(err.status(), None);
}

// =============================================================================
// Wallets, catalog, budgets
// =============================================================================

#[tokio::test]
async fn test_wallet_crud() {
    let server = MockApiServer::start().await;
    let client = client_for(&server);

    let wallets = client.list_wallets().await.unwrap();
    assert_eq!(wallets.len(), 1);
    assert_eq!(wallets[0].name, "Cash");
    assert_eq!(wallets[0].opening_balance.value(), 1000.0);

    let created = client
        .create_wallet(&NewWallet {
            name: "Savings".to_string(),
            wallet_type: WalletType::Bank,
            currency_id: 1,
            opening_balance: "2500.00".to_string(),
            is_active: true,
        })
        .await
        .unwrap();
    assert_eq!(created.wallet_type, WalletType::Bank);

    let renamed = client
        .update_wallet(
            created.id,
            &WalletUpdate {
                name: Some("Rainy day".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Rainy day");
    assert_eq!(client.get_wallet(created.id).await.unwrap().name, "Rainy day");

    client.delete_wallet(created.id).await.unwrap();
    let err = client.get_wallet(created.id).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

fn salary(amount: &str) -> NewTransaction {
    NewTransaction {
        transaction_type: TransactionType::Income,
        occurred_at: "2026-02-25T09:00:00+07:00".parse().unwrap(),
        amount: amount.to_string(),
        wallet_id: 1,
        category_id: Some(3),
        merchant: "Employer".to_string(),
        note: String::new(),
    }
}

#[tokio::test]
async fn test_transaction_crud_and_soft_delete() {
    let server = MockApiServer::start().await;
    let client = client_for(&server);

    let seeded = client
        .list_transactions(&TransactionFilter::default())
        .await
        .unwrap();
    assert_eq!(seeded.len(), 1);
    assert_eq!(seeded[0].transaction_type, TransactionType::Expense);
    assert_eq!(seeded[0].amount.value(), 120.5);

    let created = client.create_transaction(&salary("30000.00")).await.unwrap();
    assert_eq!(created.transaction_type, TransactionType::Income);
    assert_eq!(created.wallet.as_ref().unwrap().id, 1);
    assert_eq!(created.currency.as_ref().unwrap().code, "THB");
    assert_eq!(created.category.as_ref().unwrap().name, "Salary");

    let posts = server
        .requests_to("/api/transactions/")
        .into_iter()
        .filter(|r| r.method == "POST")
        .count();
    assert_eq!(posts, 1);

    let updated = client
        .update_transaction(
            created.id,
            &TransactionUpdate {
                amount: Some("31000.00".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.amount.raw(), "31000.00");
    assert_eq!(updated.base_amount.raw(), "31000.00");

    client.delete_transaction(created.id).await.unwrap();
    let err = client.get_transaction(created.id).await.unwrap_err();
    assert_eq!(err.status(), Some(404));

    let remaining = client
        .list_transactions(&TransactionFilter::default())
        .await
        .unwrap();
    assert_eq!(remaining.len(), 1);
    assert!(client.delete_transaction(created.id).await.is_err());
}

#[tokio::test]
async fn test_transaction_filters_and_order() {
    let server = MockApiServer::start().await;
    let client = client_for(&server);

    client.create_transaction(&salary("30000.00")).await.unwrap();

    let all = client
        .list_transactions(&TransactionFilter::default())
        .await
        .unwrap();
    let dates: Vec<String> = all
        .iter()
        .map(|t| t.occurred_at.unwrap().format("%Y-%m-%d").to_string())
        .collect();
    assert_eq!(dates, vec!["2026-02-25", "2026-02-03"]);

    let income = client
        .list_transactions(&TransactionFilter {
            transaction_type: Some(TransactionType::Income),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(income.len(), 1);
    assert_eq!(income[0].merchant, "Employer");

    let food = client
        .list_transactions(&TransactionFilter {
            category: Some(1),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(food.len(), 1);
    assert_eq!(food[0].merchant, "Noodle shop");

    let query = server.requests_to("/api/transactions/")[2].query.clone();
    assert_eq!(query.as_deref(), Some("type=income"));
}

#[tokio::test]
async fn test_transaction_rejected_by_api() {
    let server = MockApiServer::start().await;
    let client = client_for(&server);

    let err = client.create_transaction(&salary("0.00")).await.unwrap_err();
    assert_eq!(err.status(), Some(400));

    let mut orphan = salary("10");
    orphan.wallet_id = 999;
    let err = client.create_transaction(&orphan).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn test_categories_and_paginated_currencies() {
    let server = MockApiServer::start().await;
    let client = client_for(&server);

    let income = client.list_categories(CategoryType::Income).await.unwrap();
    assert_eq!(income.len(), 1);
    assert_eq!(income[0].name, "Salary");

    let currencies = client.list_currencies().await.unwrap();
    let codes: Vec<&str> = currencies.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, vec!["THB", "USD"]);
}

#[tokio::test]
async fn test_budget_lifecycle_and_status() {
    let server = MockApiServer::start().await;
    let client = client_for(&server);

    let budget = client
        .create_budget(&NewBudget {
            month: month(),
            scope: BudgetScope::Total,
            limit_base_amount: "15000.00".to_string(),
            category_id: None,
        })
        .await
        .unwrap();
    assert_eq!(budget.month, "2026-02");

    let listed = client.list_budgets(month()).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert!(client
        .list_budgets("2026-03".parse().unwrap())
        .await
        .unwrap()
        .is_empty());

    let status = client.budget_status(month()).await.unwrap();
    assert_eq!(status.items.len(), 1);
    assert_eq!(status.items[0].budget_id, budget.id);
    assert_eq!(status.items[0].percent_used.value(), 80.0);

    client.delete_budget(budget.id).await.unwrap();
    assert!(client.list_budgets(month()).await.unwrap().is_empty());
}
