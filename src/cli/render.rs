//! Text views for the REPL.

use crate::{
    commands::Dashboard,
    core::{
        filter::{BudgetFilter, CategoryFilter},
        pagination::Page,
        reconcile::BudgetProgress,
        report::{
            format_amount, format_breakdown_chart, format_budget_progress, format_expense_row,
            format_trend_chart,
        },
        views::FilterState,
    },
    entities::{ALL_CATEGORIES, Category, Expense, HealthStatus},
};
use chrono::Datelike;
use rust_decimal::{Decimal, prelude::FromPrimitive};

const CHART_WIDTH: usize = 30;

pub(crate) const NO_EXPENSES: &str = "No expenses found.";
pub(crate) const NO_BUDGETS: &str = "No budgets found for this period.";

fn money(value: f64) -> String {
    format_amount(Decimal::from_f64(value).unwrap_or_default())
}

fn category_label(filter: &CategoryFilter) -> &str {
    match filter {
        CategoryFilter::All => ALL_CATEGORIES,
        CategoryFilter::Only(name) => name.as_str(),
    }
}

pub(crate) fn expense_page(page: &Page<Expense>, state: FilterState) -> String {
    let mut out = Vec::new();
    if state == FilterState::Filtered {
        out.push(format!("Expenses (filtered, {} matching)", page.total_items));
    } else {
        out.push(format!("Expenses ({} total)", page.total_items));
    }
    if page.items.is_empty() {
        out.push(NO_EXPENSES.to_string());
        return out.join("\n");
    }
    for expense in &page.items {
        let icon = Category::style_for(&expense.category).icon;
        out.push(format!("{icon:<16} {}", format_expense_row(expense)));
    }
    out.push(format!(
        "Page {} of {}{}{}",
        page.current_page,
        page.page_count,
        if page.has_previous() { "  [prev]" } else { "" },
        if page.has_next() { "  [next]" } else { "" },
    ));
    out.join("\n")
}

pub(crate) fn budget_grid(grid: &[BudgetProgress], filter: &BudgetFilter) -> String {
    let window = match (filter.month, filter.whole_year) {
        (None, _) => "Any time".to_string(),
        (Some(month), true) => format!("{} (whole year)", month.year()),
        (Some(month), false) => month.format("%B %Y").to_string(),
    };
    let mut out = vec![format!("Budgets · {window} · {}", category_label(&filter.category))];
    if grid.is_empty() {
        out.push(NO_BUDGETS.to_string());
    } else {
        out.extend(grid.iter().map(format_budget_progress));
    }
    out.join("\n")
}

const fn health_label(status: HealthStatus) -> &'static str {
    match status {
        HealthStatus::Safe => "On track",
        HealthStatus::Warning => "Running low",
        HealthStatus::Danger => "Over budget",
        HealthStatus::Unknown => "Unknown",
    }
}

pub(crate) fn dashboard(name: &str, dashboard: &Dashboard) -> String {
    let summary = &dashboard.summary;
    let mut out = vec![
        format!("Welcome back, {name}!"),
        format!(
            "Spent {} of {} · Remaining {} · {}",
            money(summary.total_spent),
            money(summary.total_budget),
            money(summary.remaining_budget),
            health_label(summary.status)
        ),
        format!("Top category: {}", summary.top_category),
        String::new(),
        "Spending trend".to_string(),
    ];
    if dashboard.trend.is_empty() {
        out.push("  (no spending yet)".to_string());
    } else {
        out.extend(
            format_trend_chart(&dashboard.trend, CHART_WIDTH)
                .into_iter()
                .map(|line| format!("  {line}")),
        );
    }

    out.push(String::new());
    out.push("By category".to_string());
    if dashboard.breakdown.is_empty() {
        out.push("  (no spending yet)".to_string());
    } else {
        out.extend(
            format_breakdown_chart(&dashboard.breakdown, CHART_WIDTH)
                .into_iter()
                .map(|line| format!("  {line}")),
        );
    }

    out.push(String::new());
    out.push("Recent activity".to_string());
    if dashboard.recent.is_empty() {
        out.push(format!("  {NO_EXPENSES}"));
    } else {
        out.extend(
            dashboard
                .recent
                .iter()
                .map(|e| format!("  {}", format_expense_row(e))),
        );
    }
    out.join("\n")
}

pub(crate) fn categories() -> String {
    Category::ALL
        .iter()
        .map(|c| {
            let style = c.style();
            format!("  {:<14} {:<20} {}", c.label(), style.icon, style.color)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
