//! List view state for the expense list and the budget grid.
//!
//! Both views move between two states: Unfiltered (default predicates) and
//! Filtered (anything else). Every change re-evaluates against the full
//! collection; `reset` returns to Unfiltered.

use super::{
    filter::{BudgetFilter, CategoryFilter, ExpenseFilter, filter_budgets, filter_expenses},
    pagination::{Page, paginate},
    reconcile::{BudgetProgress, progress_for_budgets},
};
use crate::entities::{Budget, Expense};
use chrono::NaiveDate;

/// Whether a view shows its default selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterState {
    /// Default predicates
    Unfiltered,
    /// At least one predicate differs from the default
    Filtered,
}

/// Paginated, filterable expense list.
#[derive(Clone, Debug)]
pub struct ExpenseView {
    filter: ExpenseFilter,
    current_page: usize,
}

impl Default for ExpenseView {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpenseView {
    /// Unfiltered view on page 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            filter: ExpenseFilter::default(),
            current_page: 1,
        }
    }

    /// Active predicates.
    #[must_use]
    pub const fn filter(&self) -> &ExpenseFilter {
        &self.filter
    }

    /// Page shown by the last render (or requested since).
    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> FilterState {
        if self.filter.is_empty() {
            FilterState::Unfiltered
        } else {
            FilterState::Filtered
        }
    }

    /// Sets the search text and returns to page 1.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.filter.search_text = text.into();
        self.current_page = 1;
    }

    /// Sets the category restriction and returns to page 1.
    pub fn set_category(&mut self, category: CategoryFilter) {
        self.filter.category = category;
        self.current_page = 1;
    }

    /// Sets the exact-day restriction and returns to page 1.
    pub fn set_exact_date(&mut self, date: Option<NaiveDate>) {
        self.filter.exact_date = date;
        self.current_page = 1;
    }

    /// Clears every predicate and returns to page 1.
    pub fn reset(&mut self) {
        self.filter = ExpenseFilter::default();
        self.current_page = 1;
    }

    /// Requests a page; it is clamped on the next render.
    pub fn go_to_page(&mut self, page: usize) {
        self.current_page = page;
    }

    /// Filters `expenses` and cuts out the current page.
    ///
    /// The stored page is re-clamped, so a page emptied by a delete falls back
    /// to the new last page instead of rendering empty.
    pub fn render(&mut self, expenses: &[Expense]) -> Page<Expense> {
        let filtered: Vec<Expense> = filter_expenses(expenses, &self.filter)
            .into_iter()
            .cloned()
            .collect();
        let page = paginate(&filtered, self.current_page);
        self.current_page = page.current_page;
        page
    }
}

/// Budget grid with category and month/year selection.
#[derive(Clone, Debug)]
pub struct BudgetView {
    filter: BudgetFilter,
    default_month: NaiveDate,
}

impl BudgetView {
    /// View defaulting to the month containing `today`.
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            filter: BudgetFilter::for_month(today),
            default_month: today,
        }
    }

    /// Active predicates.
    #[must_use]
    pub const fn filter(&self) -> &BudgetFilter {
        &self.filter
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> FilterState {
        if self.filter == BudgetFilter::for_month(self.default_month) {
            FilterState::Unfiltered
        } else {
            FilterState::Filtered
        }
    }

    /// Sets the category restriction.
    pub fn set_category(&mut self, category: CategoryFilter) {
        self.filter.category = category;
    }

    /// Selects a month, or any time with `None`.
    pub fn set_month(&mut self, month: Option<NaiveDate>) {
        self.filter.month = month;
    }

    /// Widens (or narrows back) the month selection to its whole year.
    pub fn set_whole_year(&mut self, whole_year: bool) {
        self.filter.whole_year = whole_year;
    }

    /// Clears the category, turns off whole-year, and reselects the default month.
    pub fn reset(&mut self) {
        self.filter = BudgetFilter::for_month(self.default_month);
    }

    /// Budgets passing the filter, each reconciled against every expense.
    #[must_use]
    pub fn render(&self, budgets: &[Budget], expenses: &[Expense]) -> Vec<BudgetProgress> {
        progress_for_budgets(filter_budgets(budgets, &self.filter), expenses)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::store::RecordStore;
    use crate::test_utils::{budget, expense, expense_described, numbered_expenses};
    use rust_decimal_macros::dec;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_twenty_three_expenses_paginate() {
        let expenses = numbered_expenses(23);
        let mut view = ExpenseView::new();
        assert_eq!(view.render(&expenses).page_count, 3);

        view.go_to_page(0);
        assert_eq!(view.render(&expenses).current_page, 1);
        view.go_to_page(99);
        assert_eq!(view.render(&expenses).current_page, 3);
        assert_eq!(view.current_page(), 3);
    }

    #[test]
    fn test_deleting_last_item_on_last_page_reclamps() {
        let mut store = RecordStore::new();
        store.load(vec![], numbered_expenses(21));
        let mut view = ExpenseView::new();
        view.go_to_page(3);
        let page = view.render(store.expenses());
        assert_eq!(page.current_page, 3);
        assert_eq!(page.items.len(), 1);

        let last_id = page.items[0].id;
        assert!(store.remove_expense(last_id));

        let page = view.render(store.expenses());
        assert_eq!(page.page_count, 2);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.items.len(), 10);
    }

    #[test]
    fn test_delete_keeps_current_page_when_in_range() {
        let mut store = RecordStore::new();
        store.load(vec![], numbered_expenses(25));
        let mut view = ExpenseView::new();
        view.go_to_page(2);
        let first = view.render(store.expenses()).items[0].id;
        store.remove_expense(first);
        assert_eq!(view.render(store.expenses()).current_page, 2);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let expenses = numbered_expenses(30);
        let mut view = ExpenseView::new();
        view.go_to_page(3);
        view.render(&expenses);
        view.set_search("expense");
        assert_eq!(view.current_page(), 1);
        assert_eq!(view.state(), FilterState::Filtered);
    }

    #[test]
    fn test_filters_do_not_compound() {
        let expenses = vec![
            expense_described(1, "Food", "Pizza", 2025, 11, 1),
            expense_described(2, "Transport", "Taxi", 2025, 11, 1),
        ];
        let mut view = ExpenseView::new();
        view.set_category(CategoryFilter::parse("Food"));
        assert_eq!(view.render(&expenses).total_items, 1);
        view.set_category(CategoryFilter::parse("Transport"));
        let page = view.render(&expenses);
        assert_eq!(page.total_items, 1);
        assert_eq!(page.items[0].id, 2);
    }

    #[test]
    fn test_expense_reset_clears_everything() {
        let expenses = numbered_expenses(15);
        let mut view = ExpenseView::new();
        view.set_search("zzz");
        view.set_exact_date(Some(day(2025, 1, 1)));
        view.set_category(CategoryFilter::parse("Gifts"));
        assert_eq!(view.render(&expenses).total_items, 0);

        view.go_to_page(2);
        view.reset();
        assert_eq!(view.state(), FilterState::Unfiltered);
        assert_eq!(view.current_page(), 1);
        assert_eq!(view.render(&expenses).total_items, 15);
    }

    #[test]
    fn test_budget_view_defaults_to_current_month() {
        let budgets = vec![
            budget(1, "Food", dec!(200), 2025, 11),
            budget(2, "Food", dec!(200), 2025, 10),
        ];
        let expenses = vec![expense(1, "Food", dec!(50), 2025, 11, 5)];
        let view = BudgetView::new(day(2025, 11, 18));
        assert_eq!(view.state(), FilterState::Unfiltered);
        let grid = view.render(&budgets, &expenses);
        assert_eq!(grid.len(), 1);
        assert_eq!(grid[0].spent, dec!(50));
    }

    #[test]
    fn test_budget_view_whole_year_and_reset() {
        let budgets = vec![
            budget(1, "Food", dec!(200), 2025, 11),
            budget(2, "Health", dec!(200), 2025, 2),
            budget(3, "Food", dec!(200), 2024, 12),
        ];
        let mut view = BudgetView::new(day(2025, 11, 18));
        view.set_whole_year(true);
        assert_eq!(view.state(), FilterState::Filtered);
        assert_eq!(view.render(&budgets, &[]).len(), 2);

        view.set_category(CategoryFilter::parse("Health"));
        let grid = view.render(&budgets, &[]);
        assert_eq!(grid.len(), 1);
        assert_eq!(grid[0].budget.id, 2);

        view.set_month(None);
        assert_eq!(view.render(&budgets, &[]).len(), 1);

        view.reset();
        assert_eq!(view.state(), FilterState::Unfiltered);
        assert_eq!(view.filter().month, Some(day(2025, 11, 18)));
        assert!(!view.filter().whole_year);
        assert_eq!(view.render(&budgets, &[]).len(), 1);
    }
}
