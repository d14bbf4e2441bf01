//! Category entity - the fixed set of spending categories.
//!
//! Records carry their category as the server's string so that matching stays
//! exact string equality; this enum is the one place the canonical set and its
//! display style live.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Placeholder used by category pickers to mean "no category restriction".
pub const ALL_CATEGORIES: &str = "All Categories";

/// Spending category
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Groceries and eating out
    Food,
    /// Fuel, fares, car costs
    Transport,
    /// Rent and mortgage
    Housing,
    /// Power, water, internet
    Utilities,
    /// Games, streaming, outings
    Entertainment,
    /// General purchases
    Shopping,
    /// Medical and fitness
    Health,
    /// Courses and books
    Education,
    /// Trips
    Travel,
    /// Personal care
    Personal,
    /// Loan and card repayments
    Debt,
    /// Money set aside
    Savings,
    /// Presents
    Gifts,
    /// Anything else
    Other,
}

/// Icon and color classes used to draw a category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryStyle {
    /// Icon identifier
    pub icon: &'static str,
    /// Color class
    pub color: &'static str,
}

/// Style for category strings outside the canonical set.
pub const DEFAULT_STYLE: CategoryStyle = CategoryStyle {
    icon: "bi-tag",
    color: "bg-soft-coffee text-dark-brown",
};

impl Category {
    /// Every category, in display order.
    pub const ALL: [Self; 14] = [
        Self::Food,
        Self::Transport,
        Self::Housing,
        Self::Utilities,
        Self::Entertainment,
        Self::Shopping,
        Self::Health,
        Self::Education,
        Self::Travel,
        Self::Personal,
        Self::Debt,
        Self::Savings,
        Self::Gifts,
        Self::Other,
    ];

    /// The wire and display name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Housing => "Housing",
            Self::Utilities => "Utilities",
            Self::Entertainment => "Entertainment",
            Self::Shopping => "Shopping",
            Self::Health => "Health",
            Self::Education => "Education",
            Self::Travel => "Travel",
            Self::Personal => "Personal",
            Self::Debt => "Debt",
            Self::Savings => "Savings",
            Self::Gifts => "Gifts",
            Self::Other => "Other",
        }
    }

    /// Canonical style table.
    #[must_use]
    pub const fn style(self) -> CategoryStyle {
        let (icon, color) = match self {
            Self::Food => ("bi-basket", "bg-soft-terracotta text-accent"),
            Self::Transport => ("bi-fuel-pump", "bg-soft-coffee text-primary-cozy"),
            Self::Housing => ("bi-house-door", "bg-soft-green text-success"),
            Self::Utilities => ("bi-lightning-charge", "bg-soft-coffee text-warning"),
            Self::Entertainment => ("bi-controller", "bg-soft-terracotta text-danger"),
            Self::Shopping => ("bi-bag", "bg-soft-terracotta text-danger"),
            Self::Health => ("bi-heart-pulse", "bg-soft-green text-success"),
            Self::Education => ("bi-book", "bg-soft-coffee text-primary-cozy"),
            Self::Travel => ("bi-airplane", "bg-soft-green text-success"),
            Self::Personal => ("bi-person", "bg-soft-terracotta text-accent"),
            Self::Debt => ("bi-bank", "bg-soft-coffee text-dark-brown"),
            Self::Savings => ("bi-piggy-bank", "bg-soft-green text-success"),
            Self::Gifts => ("bi-gift", "bg-soft-terracotta text-danger"),
            Self::Other => ("bi-box", "bg-soft-coffee text-dark-brown"),
        };
        CategoryStyle { icon, color }
    }

    /// Style for an arbitrary category string, falling back to [`DEFAULT_STYLE`].
    #[must_use]
    pub fn style_for(name: &str) -> CategoryStyle {
        name.parse::<Self>()
            .map_or(DEFAULT_STYLE, Self::style)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a string is not one of the canonical category names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category '{}'", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    // Case-sensitive on purpose: "food" is not a category.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
