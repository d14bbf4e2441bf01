//! Budget reconciliation - joins a budget with the expenses that count toward it.
//!
//! An expense counts toward a budget when the category strings are exactly
//! equal and the expense falls in the same calendar month and year as the
//! budget's month. Progress is recomputed on every call and never cached.

use crate::{
    entities::{Budget, Expense},
    errors::{Error, Result},
};
use chrono::Datelike;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use tracing::{trace, warn};

/// Rounded percentage at which a budget enters the warning tier.
pub const WARNING_THRESHOLD: i64 = 80;
/// Rounded percentage at which a budget is over.
pub const OVER_BUDGET_THRESHOLD: i64 = 100;

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Spend status derived from the rounded percentage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTier {
    /// Below 80%
    Good,
    /// 80% up to 99%
    Warning,
    /// 100% or more
    OverBudget,
}

impl StatusTier {
    /// Tier for a rounded integer percentage. Lower bounds are inclusive.
    #[must_use]
    pub const fn from_percentage(rounded: i64) -> Self {
        if rounded >= OVER_BUDGET_THRESHOLD {
            Self::OverBudget
        } else if rounded >= WARNING_THRESHOLD {
            Self::Warning
        } else {
            Self::Good
        }
    }

    /// Badge text.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Warning => "Warning",
            Self::OverBudget => "Over Budget",
        }
    }
}

impl std::fmt::Display for StatusTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A budget joined with its matching spend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BudgetProgress {
    /// The budget being reported on
    pub budget: Budget,
    /// Sum of matching expense amounts
    pub spent: Decimal,
    /// `spent / amount * 100`, unclamped
    pub raw_percentage: Decimal,
    /// `raw_percentage` rounded half away from zero; drives the tier and label
    pub rounded_percentage: i64,
    /// `raw_percentage` clamped to 0..=100, for the bar width
    pub display_percentage: Decimal,
    /// Status tier
    pub status: StatusTier,
}

impl BudgetProgress {
    /// Ceiling minus spend; negative when over budget.
    #[must_use]
    pub fn remaining(&self) -> Decimal {
        self.budget.amount - self.spent
    }
}

/// Whether `expense` counts toward `budget`.
#[must_use]
pub fn expense_counts_toward(budget: &Budget, expense: &Expense) -> bool {
    expense.category == budget.category
        && expense.date.year() == budget.month.year()
        && expense.date.month() == budget.month.month()
}

/// Sum of all expenses that count toward `budget`.
#[must_use]
pub fn calculate_spent(budget: &Budget, expenses: &[Expense]) -> Decimal {
    expenses
        .iter()
        .filter(|e| expense_counts_toward(budget, e))
        .map(|e| e.amount)
        .sum()
}

/// Computes progress for one budget against the full expense collection.
///
/// # Errors
/// Returns [`Error::DivisionInvalid`] when the budget amount is zero or negative.
pub fn calculate_progress(budget: &Budget, expenses: &[Expense]) -> Result<BudgetProgress> {
    let invalid = || Error::DivisionInvalid {
        budget_id: budget.id,
        amount: budget.amount,
    };
    if budget.amount <= Decimal::ZERO {
        return Err(invalid());
    }

    let spent = calculate_spent(budget, expenses);
    let raw_percentage = spent
        .checked_mul(ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(budget.amount))
        .ok_or_else(invalid)?;
    let rounded_percentage = raw_percentage
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(i64::MAX);
    let display_percentage = raw_percentage.clamp(Decimal::ZERO, ONE_HUNDRED);
    let status = StatusTier::from_percentage(rounded_percentage);

    trace!(
        "Budget {} ({}): spent {} of {} -> {}% {}",
        budget.id, budget.category, spent, budget.amount, rounded_percentage, status
    );

    Ok(BudgetProgress {
        budget: budget.clone(),
        spent,
        raw_percentage,
        rounded_percentage,
        display_percentage,
        status,
    })
}

/// Progress for each budget, in the given order.
///
/// Budgets with a non-positive amount cannot be drawn and are skipped with a warning.
#[must_use]
pub fn progress_for_budgets<'a, I>(budgets: I, expenses: &[Expense]) -> Vec<BudgetProgress>
where
    I: IntoIterator<Item = &'a Budget>,
{
    budgets
        .into_iter()
        .filter_map(|budget| match calculate_progress(budget, expenses) {
            Ok(progress) => Some(progress),
            Err(e) => {
                warn!("Skipping budget in grid: {}", e);
                None
            }
        })
        .collect()
}
