//! Analytics payloads served by the `/analytics` endpoints.

use super::timestamp;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Overall health of the month, as judged by the server.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum HealthStatus {
    /// Plenty of budget left
    Safe,
    /// Under a fifth of the budget left
    Warning,
    /// Spent more than budgeted
    Danger,
    /// Any value this client does not know
    #[serde(other)]
    Unknown,
}

/// `GET /analytics/summary`
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DashboardSummary {
    /// Sum of expenses in the period
    pub total_spent: f64,
    /// Sum of budgets in the period
    #[serde(default)]
    pub total_budget: f64,
    /// Budget minus spend
    pub remaining_budget: f64,
    /// Category with the highest spend, or "No Data"
    pub top_category: String,
    /// Health indicator
    pub status: HealthStatus,
}

/// One day of the spending trend.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TrendPoint {
    /// Calendar day
    #[serde(deserialize_with = "timestamp::deserialize_day")]
    pub date: NaiveDate,
    /// Total spent that day
    pub amount: f64,
}

/// One category slice of the breakdown.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CategoryTotal {
    /// Category name
    pub category: String,
    /// Total spent in the category
    pub total_amount: f64,
    /// Share of all spending, 0-100
    #[serde(default)]
    pub percentage: f64,
}

/// `{ "data": [...] }` wrapper used by the chart endpoints.
#[derive(Clone, Debug, Deserialize)]
pub struct Series<T> {
    /// Data points
    pub data: Vec<T>,
}

/// Optional month/year window for analytics queries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Period {
    /// Month number 1-12
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    /// Four-digit year
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}
