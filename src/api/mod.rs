//! Remote finance API.
//!
//! [`FinanceApi`] is the seam between command functions and the server.
//! [`HttpApi`] talks to the real backend; tests substitute an in-memory fake.

pub mod http;

pub use http::HttpApi;

use crate::{
    entities::{
        AccessToken, Budget, BudgetInput, CategoryTotal, DashboardSummary, Expense, ExpenseInput,
        Period, TrendPoint, User,
    },
    errors::Result,
};

/// Operations offered by the finance backend.
///
/// Every method except [`login`](Self::login) and [`register`](Self::register)
/// needs a bearer credential. A 401 on those calls surfaces as
/// [`Error::AuthExpired`](crate::errors::Error::AuthExpired).
#[allow(async_fn_in_trait)]
pub trait FinanceApi {
    /// `POST /auth/login` with form-encoded credentials.
    async fn login(&self, username: &str, password: &str) -> Result<AccessToken>;

    /// `POST /users/`
    async fn register(&self, email: &str, password: &str) -> Result<User>;

    /// `GET /users/me`
    async fn current_user(&self, token: &AccessToken) -> Result<User>;

    /// `GET /budgets/`
    async fn list_budgets(&self, token: &AccessToken) -> Result<Vec<Budget>>;

    /// `POST /budgets/`. A duplicate (category, month) is a
    /// [`Error::ValidationConflict`](crate::errors::Error::ValidationConflict).
    async fn create_budget(&self, token: &AccessToken, input: &BudgetInput) -> Result<Budget>;

    /// `PUT /budgets/{id}`
    async fn update_budget(&self, token: &AccessToken, id: i64, input: &BudgetInput)
    -> Result<Budget>;

    /// `DELETE /budgets/{id}`
    async fn delete_budget(&self, token: &AccessToken, id: i64) -> Result<()>;

    /// `GET /expenses/`
    async fn list_expenses(&self, token: &AccessToken) -> Result<Vec<Expense>>;

    /// `POST /expenses/`
    async fn create_expense(&self, token: &AccessToken, input: &ExpenseInput) -> Result<Expense>;

    /// `PUT /expenses/{id}`
    async fn update_expense(
        &self,
        token: &AccessToken,
        id: i64,
        input: &ExpenseInput,
    ) -> Result<Expense>;

    /// `DELETE /expenses/{id}`
    async fn delete_expense(&self, token: &AccessToken, id: i64) -> Result<()>;

    /// `GET /analytics/summary`
    async fn summary(&self, token: &AccessToken, period: Period) -> Result<DashboardSummary>;

    /// `GET /analytics/spending-trend`
    async fn spending_trend(&self, token: &AccessToken, period: Period) -> Result<Vec<TrendPoint>>;

    /// `GET /analytics/category-breakdown`
    async fn category_breakdown(
        &self,
        token: &AccessToken,
        period: Period,
    ) -> Result<Vec<CategoryTotal>>;
}
