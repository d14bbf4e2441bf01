//! Entity module - records exchanged with the finance API.
//! Each entity mirrors a JSON payload; input types carry the client-side checks
//! a form performs before submitting.

pub mod analytics;
pub mod budget;
pub mod category;
pub mod expense;
pub mod timestamp;
pub mod user;

pub use analytics::{CategoryTotal, DashboardSummary, HealthStatus, Period, Series, TrendPoint};
pub use budget::{Budget, BudgetInput};
pub use category::{ALL_CATEGORIES, Category, CategoryStyle};
pub use expense::{Expense, ExpenseInput};
pub use user::{AccessToken, LoginForm, NewUser, User};
