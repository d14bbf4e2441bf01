//! reqwest-backed [`FinanceApi`].

use super::FinanceApi;
use crate::{
    config::AppConfig,
    entities::{
        AccessToken, Budget, BudgetInput, CategoryTotal, DashboardSummary, Expense, ExpenseInput,
        LoginForm, NewUser, Period, Series, TrendPoint, User,
    },
    errors::{Error, Result},
};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Conflict text used when a 409 carries no detail.
const DUPLICATE_BUDGET_DETAIL: &str = "A budget for this category and month already exists";

/// How a failed response should be classified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Call {
    /// No credential was sent, so a 401 is a plain rejection (bad login).
    Anonymous,
    /// Bearer credential sent; a 401 means it expired.
    Authenticated,
    /// Budget creation, where 409 signals a duplicate.
    CreateBudget,
}

/// HTTP client for the finance backend.
#[derive(Clone, Debug)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    /// Client rooted at `base_url` (e.g. `http://localhost:8000/api/v1`).
    ///
    /// Without a timeout, the transport's own behavior governs.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Client configured from the application settings.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            &config.api_base_url,
            config.request_timeout_secs.map(Duration::from_secs),
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request carrying the bearer credential.
    fn request(&self, method: Method, path: &str, token: &AccessToken) -> RequestBuilder {
        self.client
            .request(method, self.url(path))
            .bearer_auth(&token.access_token)
    }
}

/// Sends a request and turns any non-2xx status into an error.
async fn send(builder: RequestBuilder, call: Call) -> Result<Response> {
    let response = builder.send().await?;
    let status = response.status();
    debug!("{} {}", response.url().path(), status);
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let error = error_for_status(status.as_u16(), &body, call);
    warn!("Request failed with status {}: {}", status, error);
    Err(error)
}

async fn fetch<T: DeserializeOwned>(builder: RequestBuilder, call: Call) -> Result<T> {
    Ok(send(builder, call).await?.json::<T>().await?)
}

/// Maps a non-2xx response onto the error taxonomy.
fn error_for_status(status: u16, body: &str, call: Call) -> Error {
    let detail = detail_from_body(body);
    match (status, call) {
        (401, Call::Authenticated | Call::CreateBudget) => Error::AuthExpired,
        (409, Call::CreateBudget) => Error::ValidationConflict {
            message: detail.unwrap_or_else(|| DUPLICATE_BUDGET_DETAIL.to_string()),
        },
        _ => Error::Api { status, detail },
    }
}

/// Pulls `detail` out of an error body. Structured details (validation lists)
/// are rendered as compact JSON.
fn detail_from_body(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::Null => None,
        serde_json::Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

impl FinanceApi for HttpApi {
    async fn login(&self, username: &str, password: &str) -> Result<AccessToken> {
        let request = self
            .client
            .post(self.url("/auth/login"))
            .form(&LoginForm { username, password });
        fetch(request, Call::Anonymous).await
    }

    async fn register(&self, email: &str, password: &str) -> Result<User> {
        let request = self
            .client
            .post(self.url("/users/"))
            .json(&NewUser { email, password });
        fetch(request, Call::Anonymous).await
    }

    async fn current_user(&self, token: &AccessToken) -> Result<User> {
        fetch(self.request(Method::GET, "/users/me", token), Call::Authenticated).await
    }

    async fn list_budgets(&self, token: &AccessToken) -> Result<Vec<Budget>> {
        fetch(self.request(Method::GET, "/budgets/", token), Call::Authenticated).await
    }

    async fn create_budget(&self, token: &AccessToken, input: &BudgetInput) -> Result<Budget> {
        let request = self.request(Method::POST, "/budgets/", token).json(input);
        fetch(request, Call::CreateBudget).await
    }

    async fn update_budget(
        &self,
        token: &AccessToken,
        id: i64,
        input: &BudgetInput,
    ) -> Result<Budget> {
        let request = self
            .request(Method::PUT, &format!("/budgets/{id}"), token)
            .json(input);
        fetch(request, Call::Authenticated).await
    }

    async fn delete_budget(&self, token: &AccessToken, id: i64) -> Result<()> {
        let request = self.request(Method::DELETE, &format!("/budgets/{id}"), token);
        send(request, Call::Authenticated).await?;
        Ok(())
    }

    async fn list_expenses(&self, token: &AccessToken) -> Result<Vec<Expense>> {
        fetch(self.request(Method::GET, "/expenses/", token), Call::Authenticated).await
    }

    async fn create_expense(&self, token: &AccessToken, input: &ExpenseInput) -> Result<Expense> {
        let request = self.request(Method::POST, "/expenses/", token).json(input);
        fetch(request, Call::Authenticated).await
    }

    async fn update_expense(
        &self,
        token: &AccessToken,
        id: i64,
        input: &ExpenseInput,
    ) -> Result<Expense> {
        let request = self
            .request(Method::PUT, &format!("/expenses/{id}"), token)
            .json(input);
        fetch(request, Call::Authenticated).await
    }

    async fn delete_expense(&self, token: &AccessToken, id: i64) -> Result<()> {
        let request = self.request(Method::DELETE, &format!("/expenses/{id}"), token);
        send(request, Call::Authenticated).await?;
        Ok(())
    }

    async fn summary(&self, token: &AccessToken, period: Period) -> Result<DashboardSummary> {
        let request = self
            .request(Method::GET, "/analytics/summary", token)
            .query(&period);
        fetch(request, Call::Authenticated).await
    }

    async fn spending_trend(&self, token: &AccessToken, period: Period) -> Result<Vec<TrendPoint>> {
        let request = self
            .request(Method::GET, "/analytics/spending-trend", token)
            .query(&period);
        let series: Series<TrendPoint> = fetch(request, Call::Authenticated).await?;
        Ok(series.data)
    }

    async fn category_breakdown(
        &self,
        token: &AccessToken,
        period: Period,
    ) -> Result<Vec<CategoryTotal>> {
        let request = self
            .request(Method::GET, "/analytics/category-breakdown", token)
            .query(&period);
        let series: Series<CategoryTotal> = fetch(request, Call::Authenticated).await?;
        Ok(series.data)
    }
}
