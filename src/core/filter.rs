//! Predicate sets for expense and budget lists.
//!
//! Every predicate is optional and predicates combine with logical AND. Filters
//! are always evaluated against the full collection, never a previous result.

use crate::entities::{ALL_CATEGORIES, Budget, Category, Expense};
use chrono::{Datelike, NaiveDate};

/// Category restriction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every category
    #[default]
    All,
    /// Exactly this category string
    Only(String),
}

impl CategoryFilter {
    /// Reads a picker value; empty and "All Categories" mean no restriction.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() || raw == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Only(raw.to_string())
        }
    }

    /// Whether `category` passes.
    #[must_use]
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }

    /// Whether this is the match-all filter.
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl From<Category> for CategoryFilter {
    fn from(value: Category) -> Self {
        Self::Only(value.label().to_string())
    }
}

/// Predicates for the expense list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpenseFilter {
    /// Case-insensitive substring of the description; empty matches all
    pub search_text: String,
    /// Category restriction
    pub category: CategoryFilter,
    /// Calendar day the expense must fall on
    pub exact_date: Option<NaiveDate>,
}

impl ExpenseFilter {
    /// Whether no predicate is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search_text.is_empty() && self.category.is_all() && self.exact_date.is_none()
    }

    /// Whether `expense` passes every predicate.
    #[must_use]
    pub fn matches(&self, expense: &Expense) -> bool {
        let matches_search = self.search_text.is_empty()
            || expense
                .description
                .to_lowercase()
                .contains(&self.search_text.to_lowercase());
        let matches_date = self
            .exact_date
            .is_none_or(|day| expense.date.date() == day);
        matches_search && self.category.matches(&expense.category) && matches_date
    }
}

/// Expenses passing `filter`, in their original order.
#[must_use]
pub fn filter_expenses<'a>(expenses: &'a [Expense], filter: &ExpenseFilter) -> Vec<&'a Expense> {
    expenses.iter().filter(|e| filter.matches(e)).collect()
}

/// Predicates for the budget grid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BudgetFilter {
    /// Category restriction
    pub category: CategoryFilter,
    /// Selected month (any day inside it); `None` means any time
    pub month: Option<NaiveDate>,
    /// Widen the month selection to its whole year
    pub whole_year: bool,
}

impl BudgetFilter {
    /// Filter showing every category in the month containing `day`.
    #[must_use]
    pub fn for_month(day: NaiveDate) -> Self {
        Self {
            category: CategoryFilter::All,
            month: Some(day),
            whole_year: false,
        }
    }

    /// Whether `budget` passes every predicate.
    #[must_use]
    pub fn matches(&self, budget: &Budget) -> bool {
        let matches_time = self.month.is_none_or(|selected| {
            if self.whole_year {
                budget.month.year() == selected.year()
            } else {
                budget.month.year() == selected.year() && budget.month.month() == selected.month()
            }
        });
        self.category.matches(&budget.category) && matches_time
    }
}

/// Budgets passing `filter`, in their original order.
#[must_use]
pub fn filter_budgets<'a>(budgets: &'a [Budget], filter: &BudgetFilter) -> Vec<&'a Budget> {
    budgets.iter().filter(|b| filter.matches(b)).collect()
}
