//! Budget entity - a spending ceiling for one category in one calendar month.

use super::{Category, timestamp};
use crate::errors::{Error, Result};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Budget as returned by `GET /budgets/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Server-assigned identifier
    pub id: i64,
    /// Category name as stored by the server
    pub category: String,
    /// Spending ceiling
    pub amount: Decimal,
    /// First day of the budgeted month
    #[serde(with = "timestamp::month")]
    pub month: NaiveDate,
}

impl Budget {
    /// Whether this budget covers `category` in the month containing `month`.
    #[must_use]
    pub fn covers(&self, category: &str, month: NaiveDate) -> bool {
        self.category == category
            && self.month.year() == month.year()
            && self.month.month() == month.month()
    }
}

/// Body of `POST /budgets/` and `PUT /budgets/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BudgetInput {
    /// Category name
    pub category: String,
    /// Spending ceiling; must be positive
    pub amount: Decimal,
    /// Budgeted month, always day 1
    #[serde(with = "timestamp::month")]
    pub month: NaiveDate,
}

impl BudgetInput {
    /// Builds an input for a canonical category, normalizing `month` to day 1.
    pub fn new(category: Category, amount: Decimal, month: NaiveDate) -> Result<Self> {
        let month = timestamp::first_of_month(month).ok_or_else(|| Error::InvalidInput {
            message: format!("Invalid month: {month}"),
        })?;
        Ok(Self {
            category: category.label().to_string(),
            amount,
            month,
        })
    }

    /// Input that changes only the amount of an existing budget.
    #[must_use]
    pub fn amended(existing: &Budget, amount: Decimal) -> Self {
        Self {
            category: existing.category.clone(),
            amount,
            month: existing.month,
        }
    }

    /// Rejects zero or negative ceilings, so no stored budget can divide by zero.
    pub fn validate(&self) -> Result<()> {
        if self.amount <= Decimal::ZERO {
            return Err(Error::InvalidAmount {
                amount: self.amount,
            });
        }
        Ok(())
    }
}
