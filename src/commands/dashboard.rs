//! Dashboard command.

use super::Session;
use crate::{
    api::FinanceApi,
    core::report::{RECENT_ACTIVITY_LIMIT, recent_activity},
    entities::{CategoryTotal, DashboardSummary, Expense, Period, TrendPoint},
    errors::Result,
};
use tracing::{debug, instrument};

/// Everything the dashboard shows for one period.
#[derive(Clone, Debug)]
pub struct Dashboard {
    /// Headline totals and health
    pub summary: DashboardSummary,
    /// Spending per day
    pub trend: Vec<TrendPoint>,
    /// Spending per category
    pub breakdown: Vec<CategoryTotal>,
    /// Newest expenses, date descending
    pub recent: Vec<Expense>,
}

impl<A: FinanceApi> Session<A> {
    /// Fetches the analytics series and the expense list together.
    ///
    /// Fails as a whole if any of the four requests fails.
    #[instrument(skip(self))]
    pub async fn dashboard(&self, period: Period) -> Result<Dashboard> {
        let token = self.credential().await?;
        let fetched = tokio::try_join!(
            self.api.summary(&token, period),
            self.api.spending_trend(&token, period),
            self.api.category_breakdown(&token, period),
            self.api.list_expenses(&token),
        );
        let (summary, trend, breakdown, expenses) = self.guard(fetched).await?;
        debug!(
            "Dashboard: {} trend points, {} categories, {} expenses",
            trend.len(),
            breakdown.len(),
            expenses.len()
        );
        Ok(Dashboard {
            summary,
            trend,
            breakdown,
            recent: recent_activity(&expenses, RECENT_ACTIVITY_LIMIT),
        })
    }
}
