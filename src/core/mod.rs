//! Core logic - pure functions over the session's records.
//!
//! Nothing in here performs I/O. Callers pass the current collections in and
//! get freshly computed results back.

/// Expense and budget predicate sets
pub mod filter;
/// Fixed-size pagination
pub mod pagination;
/// Budget progress and status tiers
pub mod reconcile;
/// Text rendering of computed data
pub mod report;
/// Filter state for the expense list and budget grid
pub mod views;
