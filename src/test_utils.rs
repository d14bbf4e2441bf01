//! Shared test utilities for `budget_buddy`.
//!
//! Record builders with sensible defaults, and [`FakeApi`], an in-memory
//! backend whose failures can be scripted per test.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::{
    api::FinanceApi,
    entities::{
        AccessToken, Budget, BudgetInput, CategoryTotal, DashboardSummary, Expense, ExpenseInput,
        HealthStatus, Period, TrendPoint, User,
    },
    errors::{Error, Result},
};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use std::{
    collections::VecDeque,
    sync::Mutex,
    time::Duration,
};
use tracing_subscriber::EnvFilter;

/// Routes `tracing` output through the test harness.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

fn at_noon(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .expect("valid test date")
}

/// A budget for `category` in the given month.
pub fn budget(id: i64, category: &str, amount: Decimal, year: i32, month: u32) -> Budget {
    Budget {
        id,
        category: category.to_string(),
        amount,
        month: NaiveDate::from_ymd_opt(year, month, 1).expect("valid test month"),
    }
}

/// An expense at noon on the given day.
pub fn expense(
    id: i64,
    category: &str,
    amount: Decimal,
    year: i32,
    month: u32,
    day: u32,
) -> Expense {
    Expense {
        id,
        amount,
        description: format!("Expense {id}"),
        category: category.to_string(),
        date: at_noon(year, month, day),
    }
}

/// An expense with a chosen description and a nominal amount of 10.
pub fn expense_described(
    id: i64,
    category: &str,
    description: &str,
    year: i32,
    month: u32,
    day: u32,
) -> Expense {
    Expense {
        description: description.to_string(),
        ..expense(id, category, Decimal::TEN, year, month, day)
    }
}

/// `n` Food expenses with ids `1..=n`, one minute apart, newest last.
pub fn numbered_expenses(n: usize) -> Vec<Expense> {
    let start = at_noon(2025, 11, 1);
    (1..=n)
        .map(|i| {
            let id = i64::try_from(i).expect("small test count");
            Expense {
                id,
                amount: Decimal::from(id),
                description: format!("Expense {i}"),
                category: "Food".to_string(),
                date: start + chrono::Duration::minutes(id),
            }
        })
        .collect()
}

/// Failure injected into the next [`FakeApi`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Failure {
    /// Connection refused
    Transport,
    /// Server answered 500 without detail
    Server,
}

#[derive(Default)]
struct FakeState {
    users: Vec<(String, String)>,
    budgets: Vec<Budget>,
    expenses: Vec<Expense>,
    next_id: i64,
}

/// In-memory [`FinanceApi`] mirroring the backend's rules.
///
/// Budgets reject duplicate (category, month) pairs with a conflict, and
/// logins issue `token-<email>` credentials.
#[derive(Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
    failures: Mutex<VecDeque<Failure>>,
    expired: Mutex<bool>,
    expense_delays: Mutex<VecDeque<Duration>>,
    calls: Mutex<Vec<&'static str>>,
}

impl FakeApi {
    /// Backend with one registered user.
    pub fn with_user(email: &str, password: &str) -> Self {
        let api = Self::default();
        api.state
            .lock()
            .unwrap()
            .users
            .push((email.to_string(), password.to_string()));
        api
    }

    /// Seeds server-side budgets without going through a session.
    pub fn seed_budgets(&self, budgets: Vec<Budget>) {
        let mut state = self.state.lock().unwrap();
        for b in &budgets {
            state.next_id = state.next_id.max(b.id);
        }
        state.budgets.extend(budgets);
    }

    /// Seeds server-side expenses without going through a session.
    pub fn seed_expenses(&self, expenses: Vec<Expense>) {
        let mut state = self.state.lock().unwrap();
        for e in &expenses {
            state.next_id = state.next_id.max(e.id);
        }
        state.expenses.extend(expenses);
    }

    /// Makes the next call fail with `failure`.
    pub fn fail_next(&self, failure: Failure) {
        self.failures.lock().unwrap().push_back(failure);
    }

    /// Every issued credential is rejected with 401 from now on.
    pub fn expire_credentials(&self) {
        *self.expired.lock().unwrap() = true;
    }

    /// Delays the next `list_expenses` response.
    pub fn delay_next_expense_fetch(&self, delay: Duration) {
        self.expense_delays.lock().unwrap().push_back(delay);
    }

    /// Names of the calls made so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    /// Server-side expense count.
    pub fn expense_count(&self) -> usize {
        self.state.lock().unwrap().expenses.len()
    }

    fn enter(&self, call: &'static str) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        match self.failures.lock().unwrap().pop_front() {
            Some(Failure::Transport) => Err(Error::Transport {
                message: "connection refused".to_string(),
            }),
            Some(Failure::Server) => Err(Error::Api {
                status: 500,
                detail: None,
            }),
            None => Ok(()),
        }
    }

    fn authorize(&self, call: &'static str, token: &AccessToken) -> Result<String> {
        self.enter(call)?;
        if *self.expired.lock().unwrap() {
            return Err(Error::AuthExpired);
        }
        let email = token
            .access_token
            .strip_prefix("token-")
            .ok_or(Error::AuthExpired)?;
        let state = self.state.lock().unwrap();
        if state.users.iter().any(|(known, _)| known == email) {
            Ok(email.to_string())
        } else {
            Err(Error::AuthExpired)
        }
    }

    fn not_found(what: &str) -> Error {
        Error::Api {
            status: 404,
            detail: Some(format!("{what} not found")),
        }
    }
}

impl FinanceApi for FakeApi {
    async fn login(&self, username: &str, password: &str) -> Result<AccessToken> {
        self.enter("login")?;
        let state = self.state.lock().unwrap();
        if state
            .users
            .iter()
            .any(|(email, pw)| email == username && pw == password)
        {
            Ok(AccessToken {
                access_token: format!("token-{username}"),
                token_type: "bearer".to_string(),
            })
        } else {
            Err(Error::Api {
                status: 401,
                detail: Some("Incorrect email or password".to_string()),
            })
        }
    }

    async fn register(&self, email: &str, password: &str) -> Result<User> {
        self.enter("register")?;
        let mut state = self.state.lock().unwrap();
        if state.users.iter().any(|(known, _)| known == email) {
            return Err(Error::Api {
                status: 400,
                detail: Some("The user with this email already exists in the system.".to_string()),
            });
        }
        state.users.push((email.to_string(), password.to_string()));
        let id = i64::try_from(state.users.len()).unwrap_or(i64::MAX);
        Ok(User {
            id,
            email: email.to_string(),
        })
    }

    async fn current_user(&self, token: &AccessToken) -> Result<User> {
        let email = self.authorize("current_user", token)?;
        Ok(User { id: 1, email })
    }

    async fn list_budgets(&self, token: &AccessToken) -> Result<Vec<Budget>> {
        self.authorize("list_budgets", token)?;
        Ok(self.state.lock().unwrap().budgets.clone())
    }

    async fn create_budget(&self, token: &AccessToken, input: &BudgetInput) -> Result<Budget> {
        self.authorize("create_budget", token)?;
        let mut state = self.state.lock().unwrap();
        if state
            .budgets
            .iter()
            .any(|b| b.covers(&input.category, input.month))
        {
            return Err(Error::ValidationConflict {
                message: "Budget for this category and month already exists".to_string(),
            });
        }
        state.next_id += 1;
        let created = Budget {
            id: state.next_id,
            category: input.category.clone(),
            amount: input.amount,
            month: input.month,
        };
        state.budgets.push(created.clone());
        Ok(created)
    }

    async fn update_budget(
        &self,
        token: &AccessToken,
        id: i64,
        input: &BudgetInput,
    ) -> Result<Budget> {
        self.authorize("update_budget", token)?;
        let mut state = self.state.lock().unwrap();
        let existing = state
            .budgets
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| Self::not_found("Budget"))?;
        existing.category.clone_from(&input.category);
        existing.amount = input.amount;
        existing.month = input.month;
        Ok(existing.clone())
    }

    async fn delete_budget(&self, token: &AccessToken, id: i64) -> Result<()> {
        self.authorize("delete_budget", token)?;
        let mut state = self.state.lock().unwrap();
        let before = state.budgets.len();
        state.budgets.retain(|b| b.id != id);
        if state.budgets.len() == before {
            return Err(Self::not_found("Budget"));
        }
        Ok(())
    }

    async fn list_expenses(&self, token: &AccessToken) -> Result<Vec<Expense>> {
        self.authorize("list_expenses", token)?;
        let snapshot = self.state.lock().unwrap().expenses.clone();
        let delay = self.expense_delays.lock().unwrap().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(snapshot)
    }

    async fn create_expense(&self, token: &AccessToken, input: &ExpenseInput) -> Result<Expense> {
        self.authorize("create_expense", token)?;
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let created = Expense {
            id: state.next_id,
            amount: input.amount,
            description: input.description.clone(),
            category: input.category.label().to_string(),
            date: input.date,
        };
        state.expenses.push(created.clone());
        Ok(created)
    }

    async fn update_expense(
        &self,
        token: &AccessToken,
        id: i64,
        input: &ExpenseInput,
    ) -> Result<Expense> {
        self.authorize("update_expense", token)?;
        let mut state = self.state.lock().unwrap();
        let existing = state
            .expenses
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| Self::not_found("Expense"))?;
        existing.amount = input.amount;
        existing.description.clone_from(&input.description);
        existing.category = input.category.label().to_string();
        existing.date = input.date;
        Ok(existing.clone())
    }

    async fn delete_expense(&self, token: &AccessToken, id: i64) -> Result<()> {
        self.authorize("delete_expense", token)?;
        let mut state = self.state.lock().unwrap();
        let before = state.expenses.len();
        state.expenses.retain(|e| e.id != id);
        if state.expenses.len() == before {
            return Err(Self::not_found("Expense"));
        }
        Ok(())
    }

    async fn summary(&self, token: &AccessToken, _period: Period) -> Result<DashboardSummary> {
        self.authorize("summary", token)?;
        let state = self.state.lock().unwrap();
        let spent: Decimal = state.expenses.iter().map(|e| e.amount).sum();
        let budgeted: Decimal = state.budgets.iter().map(|b| b.amount).sum();
        let total_spent = spent.to_f64().unwrap_or_default();
        let total_budget = budgeted.to_f64().unwrap_or_default();
        Ok(DashboardSummary {
            total_spent,
            total_budget,
            remaining_budget: total_budget - total_spent,
            top_category: state
                .expenses
                .first()
                .map_or_else(|| "No Data".to_string(), |e| e.category.clone()),
            status: if total_spent > total_budget {
                HealthStatus::Danger
            } else {
                HealthStatus::Safe
            },
        })
    }

    async fn spending_trend(&self, token: &AccessToken, _period: Period) -> Result<Vec<TrendPoint>> {
        self.authorize("spending_trend", token)?;
        let state = self.state.lock().unwrap();
        Ok(state
            .expenses
            .iter()
            .map(|e| TrendPoint {
                date: e.date.date(),
                amount: e.amount.to_f64().unwrap_or_default(),
            })
            .collect())
    }

    async fn category_breakdown(
        &self,
        token: &AccessToken,
        _period: Period,
    ) -> Result<Vec<CategoryTotal>> {
        self.authorize("category_breakdown", token)?;
        let state = self.state.lock().unwrap();
        let mut totals: Vec<CategoryTotal> = Vec::new();
        for e in &state.expenses {
            let amount = e.amount.to_f64().unwrap_or_default();
            match totals.iter_mut().find(|t| t.category == e.category) {
                Some(total) => total.total_amount += amount,
                None => totals.push(CategoryTotal {
                    category: e.category.clone(),
                    total_amount: amount,
                    percentage: 0.0,
                }),
            }
        }
        let grand: f64 = totals.iter().map(|t| t.total_amount).sum();
        if grand > 0.0 {
            for t in &mut totals {
                t.percentage = t.total_amount / grand * 100.0;
            }
        }
        Ok(totals)
    }
}
