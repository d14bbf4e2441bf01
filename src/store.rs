//! Record store - the session's in-memory copy of the user's budgets and expenses.
//!
//! Contents are replaced wholesale on every load. Loads are fenced with a
//! monotonically increasing epoch: only the newest load may install its data,
//! so an older response that arrives late is dropped instead of overwriting
//! fresher state.

use crate::entities::{Budget, Expense};
use tracing::{debug, info, warn};

/// Proof that a load was started at a given epoch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    epoch: u64,
}

impl LoadTicket {
    /// The epoch this load was issued at.
    #[must_use]
    pub const fn epoch(self) -> u64 {
        self.epoch
    }
}

/// Budgets and expenses for one user session.
#[derive(Debug, Default)]
pub struct RecordStore {
    budgets: Vec<Budget>,
    expenses: Vec<Expense>,
    loaded: bool,
    epoch: u64,
}

impl RecordStore {
    /// Creates an empty, unloaded store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Budgets, month descending.
    #[must_use]
    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    /// Expenses, date descending.
    #[must_use]
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Whether any load has completed since creation or the last clear.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Current epoch.
    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Replaces both collections.
    ///
    /// Budgets are ordered by month descending and expenses by date descending.
    /// Both sorts are stable, so records with equal keys keep fetch order.
    pub fn load(&mut self, mut budgets: Vec<Budget>, mut expenses: Vec<Expense>) {
        budgets.sort_by(|a, b| b.month.cmp(&a.month));
        expenses.sort_by(|a, b| b.date.cmp(&a.date));
        self.budgets = budgets;
        self.expenses = expenses;
        self.loaded = true;
        info!(
            "Record store loaded with {} budgets and {} expenses.",
            self.budgets.len(),
            self.expenses.len()
        );
    }

    /// Starts a fenced load; any earlier outstanding ticket becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.epoch += 1;
        debug!("Issued load ticket at epoch {}", self.epoch);
        LoadTicket { epoch: self.epoch }
    }

    /// Installs a fetched snapshot if `ticket` is still the newest.
    ///
    /// Returns `false` and leaves the store untouched for a stale ticket.
    pub fn apply_load(
        &mut self,
        ticket: LoadTicket,
        budgets: Vec<Budget>,
        expenses: Vec<Expense>,
    ) -> bool {
        if ticket.epoch != self.epoch {
            warn!(
                "Discarding stale load (ticket epoch {}, current epoch {})",
                ticket.epoch, self.epoch
            );
            return false;
        }
        self.load(budgets, expenses);
        true
    }

    /// Makes every outstanding [`LoadTicket`] stale without touching the data.
    ///
    /// Call after a server-side delete so a load fetched before it cannot
    /// bring the record back, whether or not the store held the record yet.
    pub fn invalidate_loads(&mut self) {
        self.epoch += 1;
        debug!("Invalidated in-flight loads, now at epoch {}", self.epoch);
    }

    /// Removes the expense with `id`, if present.
    ///
    /// Returns whether anything was removed. An absent id is a no-op.
    pub fn remove_expense(&mut self, id: i64) -> bool {
        let before = self.expenses.len();
        self.expenses.retain(|e| e.id != id);
        self.expenses.len() != before
    }

    /// Removes the budget with `id`, if present. See [`Self::remove_expense`].
    pub fn remove_budget(&mut self, id: i64) -> bool {
        let before = self.budgets.len();
        self.budgets.retain(|b| b.id != id);
        self.budgets.len() != before
    }

    /// Looks up a budget by id.
    #[must_use]
    pub fn budget(&self, id: i64) -> Option<&Budget> {
        self.budgets.iter().find(|b| b.id == id)
    }

    /// Looks up an expense by id.
    #[must_use]
    pub fn expense(&self, id: i64) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    /// Drops all records and invalidates outstanding loads.
    pub fn clear(&mut self) {
        self.budgets.clear();
        self.expenses.clear();
        self.loaded = false;
        self.epoch += 1;
    }
}
