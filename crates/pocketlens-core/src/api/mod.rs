//! HTTP client for the finance REST API
//!
//! `ApiClient` is a thin JSON wrapper over reqwest exposing `get`, `post`,
//! `patch` and `delete`. Resource-specific calls live in submodules as extra
//! `impl ApiClient` blocks, one per API area:
//!
//! - `reports` - monthly summary, by-category, trend
//! - `insights` - AI insights endpoint (the fallback-aware path lives in
//!   `crate::insights`)
//! - `wallets` - wallet CRUD
//! - `transactions` - transaction CRUD with list filters
//! - `catalog` - categories and currencies
//! - `budgets` - budgets and budget status
//!
//! Auth is injected: the client asks a [`TokenProvider`] for a bearer token on
//! every request instead of reading global state.

mod budgets;
mod catalog;
mod insights;
mod reports;
mod transactions;
mod wallets;

use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// Query for endpoints that take no parameters
pub const NO_QUERY: &[(&str, &str)] = &[];

/// Supplies the bearer token attached to each request
pub trait TokenProvider: Send + Sync {
    fn access_token(&self) -> Option<String>;
}

impl<F> TokenProvider for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn access_token(&self) -> Option<String> {
        self()
    }
}

/// A fixed token (or none), typically from config
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: Option<String>) -> Self {
        Self(token)
    }
}

impl TokenProvider for StaticToken {
    fn access_token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Finance API client
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl ApiClient {
    /// Create a client using the token from `config`, if any
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Self::with_token_provider(config, StaticToken::new(config.access_token.clone()))
    }

    /// Create a client with an explicit token source
    pub fn with_token_provider(
        config: &ClientConfig,
        tokens: impl TokenProvider + 'static,
    ) -> Result<Self> {
        let http = Client::builder()
            .user_agent(format!("pocketlens/{}", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            tokens: Arc::new(tokens),
        })
    }

    /// Base URL (for logging)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!(method = %method, path, "API request");
        let mut builder = self.http.request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = self.tokens.access_token() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T> {
        let response = check_status(builder.send().await?).await?;
        Ok(response.json().await?)
    }

    /// GET `path` with query parameters, decoding the body as `T`
    pub async fn get<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        Self::send_json(self.request(Method::GET, path).query(query)).await
    }

    /// GET `path` and return the body untyped
    pub async fn get_value<Q>(&self, path: &str, query: &Q) -> Result<Value>
    where
        Q: Serialize + ?Sized,
    {
        self.get(path, query).await
    }

    /// POST a JSON body
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        Self::send_json(self.request(Method::POST, path).json(body)).await
    }

    /// PATCH a JSON body
    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        Self::send_json(self.request(Method::PATCH, path).json(body)).await
    }

    /// DELETE `path`; the response body is ignored
    pub async fn delete(&self, path: &str) -> Result<()> {
        check_status(self.request(Method::DELETE, path).send().await?).await?;
        Ok(())
    }

    /// GET a list endpoint that may or may not be paginated
    pub(crate) async fn get_list<T, Q>(&self, path: &str, query: &Q) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        unwrap_list(self.get_value(path, query).await?)
    }
}

/// Turn a non-success response into `Error::Api`
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = error_detail(status, &body);
    tracing::debug!(status = status.as_u16(), detail = %detail, "API error response");
    Err(Error::Api {
        status: status.as_u16(),
        detail,
    })
}

/// Prefer the API's `{"detail": "..."}` message, else the raw body
fn error_detail(status: StatusCode, body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(Value::as_str).map(str::to_string));

    if let Some(detail) = from_json {
        return detail;
    }

    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string()
    } else if body.chars().count() > 200 {
        format!("{}...", body.chars().take(200).collect::<String>())
    } else {
        body.to_string()
    }
}

/// Accept either a bare JSON array or a paginated `{ "results": [...] }` body
///
/// Any other shape yields an empty list.
pub fn unwrap_list<T: DeserializeOwned>(value: Value) -> Result<Vec<T>> {
    match value {
        Value::Array(_) => Ok(serde_json::from_value(value)?),
        Value::Object(mut map) => match map.remove("results") {
            Some(results @ Value::Array(_)) => Ok(serde_json::from_value(results)?),
            _ => Ok(Vec::new()),
        },
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Currency;
    use serde_json::json;

    #[test]
    fn test_error_detail_prefers_json_detail() {
        let detail = error_detail(
            StatusCode::BAD_REQUEST,
            r#"{"detail": "month must be YYYY-MM"}"#,
        );
        assert_eq!(detail, "month must be YYYY-MM");
    }

    #[test]
    fn test_error_detail_raw_body_and_reason() {
        assert_eq!(
            error_detail(StatusCode::BAD_GATEWAY, "upstream down"),
            "upstream down"
        );
        assert_eq!(error_detail(StatusCode::NOT_FOUND, ""), "Not Found");

        let long = "x".repeat(500);
        let detail = error_detail(StatusCode::INTERNAL_SERVER_ERROR, &long);
        assert_eq!(detail.len(), 203);
        assert!(detail.ends_with("..."));
    }

    #[test]
    fn test_unwrap_list_shapes() {
        let bare: Vec<Currency> =
            unwrap_list(json!([{ "id": 1, "code": "THB", "name": "Thai Baht" }])).unwrap();
        assert_eq!(bare.len(), 1);

        let paged: Vec<Currency> = unwrap_list(json!({
            "count": 1,
            "next": null,
            "previous": null,
            "results": [{ "id": 2, "code": "USD", "name": "US Dollar", "symbol": "$" }]
        }))
        .unwrap();
        assert_eq!(paged[0].code, "USD");

        let odd: Vec<Currency> = unwrap_list(json!({ "detail": "nothing here" })).unwrap();
        assert!(odd.is_empty());
        let odd: Vec<Currency> = unwrap_list(json!("nope")).unwrap();
        assert!(odd.is_empty());
    }

    #[test]
    fn test_closure_token_provider() {
        let provider = || Some("abc".to_string());
        assert_eq!(provider.access_token().as_deref(), Some("abc"));
        assert!(StaticToken::default().access_token().is_none());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let mut config = ClientConfig::default();
        config.api_base_url = "http://localhost:8000/".to_string();
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }
}
