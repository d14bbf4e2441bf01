//! Expense entity - a single recorded spend.

use super::{Category, timestamp};
use crate::errors::{Error, Result};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Expense as returned by `GET /expenses/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Server-assigned identifier
    pub id: i64,
    /// Positive amount spent
    pub amount: Decimal,
    /// Free-text description
    pub description: String,
    /// Category name as stored by the server
    pub category: String,
    /// When the spend happened (wall-clock)
    #[serde(with = "timestamp::wall_clock")]
    pub date: NaiveDateTime,
}

/// Body of `POST /expenses/` and `PUT /expenses/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExpenseInput {
    /// Amount spent; must be positive
    pub amount: Decimal,
    /// Description; must not be blank
    pub description: String,
    /// One of the canonical categories
    pub category: Category,
    /// When the spend happened
    #[serde(with = "timestamp::wall_clock")]
    pub date: NaiveDateTime,
}

impl ExpenseInput {
    /// Checks the fields a submit form would refuse to send.
    pub fn validate(&self) -> Result<()> {
        if self.amount <= Decimal::ZERO {
            return Err(Error::InvalidAmount {
                amount: self.amount,
            });
        }
        if self.description.trim().is_empty() {
            return Err(Error::InvalidInput {
                message: "Description is required.".to_string(),
            });
        }
        Ok(())
    }
}
