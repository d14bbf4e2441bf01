//! Report formatting.
//!
//! Turns already-computed data (budget progress, expense pages, analytics
//! series) into display strings. Nothing here fetches or recomputes totals.

use crate::{
    core::reconcile::BudgetProgress,
    entities::{CategoryTotal, Expense, TrendPoint},
};
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

/// Number of expenses shown in the dashboard activity feed.
pub const RECENT_ACTIVITY_LIMIT: usize = 10;

/// Formats an amount with thousands separators and two decimals.
/// e.g. `1234567.8` → `"$1,234,567.80"`, `-4.5` → `"-$4.50"`
#[must_use]
pub fn format_amount(value: Decimal) -> String {
    let rounded = value
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let formatted = format!("{rounded:.2}");
    let (int_part, dec_part) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), "00"));

    let with_commas = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    if value < Decimal::ZERO {
        format!("-${with_commas}.{dec_part}")
    } else {
        format!("${with_commas}.{dec_part}")
    }
}

/// Generates a progress bar like `[████████░░] 80%`.
///
/// The fill is clamped to the bar; the label shows the percentage as given.
#[must_use]
pub fn format_progress_bar(fill_percent: f64, label_percent: i64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let filled = filled_cells(fill_percent, length);
    let empty = length.saturating_sub(filled);

    let filled_str = "█".repeat(filled);
    let empty_str = "░".repeat(empty);

    format!("[{filled_str}{empty_str}] {label_percent}%")
}

// Cast safety: the clamped ratio is in [0, 1] and length is small.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn filled_cells(percent: f64, length: usize) -> usize {
    if !percent.is_finite() {
        return 0;
    }
    ((percent.clamp(0.0, 100.0) / 100.0) * length as f64).round() as usize
}

/// One budget card as a text line:
/// `Food · November 2025 · Good\n  $120.00 / $200.00  [██████░░░░] 60% used`
#[must_use]
pub fn format_budget_progress(progress: &BudgetProgress) -> String {
    let budget = &progress.budget;
    let bar = format_progress_bar(
        progress.display_percentage.to_f64().unwrap_or(0.0),
        progress.rounded_percentage,
        None,
    );
    format!(
        "#{} {} · {} · {}\n  {} / {}  {} used",
        budget.id,
        budget.category,
        budget.month.format("%B %Y"),
        progress.status,
        format_amount(progress.spent),
        format_amount(budget.amount),
        bar
    )
}

/// One expense row: `#12  Nov 5, 2025  Food  Lunch  -$12.50`
#[must_use]
pub fn format_expense_row(expense: &Expense) -> String {
    format!(
        "#{:<5} {:<13} {:<13} {}  -{}",
        expense.id,
        expense.date.format("%b %-d, %Y").to_string(),
        expense.category,
        expense.description,
        format_amount(expense.amount)
    )
}

/// Greeting name from an email: local part with its first letter upper-cased.
#[must_use]
pub fn display_name(email: &str) -> String {
    let local = email.split('@').next().unwrap_or(email);
    let mut chars = local.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// The newest `limit` expenses, date descending (stable for equal dates).
#[must_use]
pub fn recent_activity(expenses: &[Expense], limit: usize) -> Vec<Expense> {
    let mut sorted = expenses.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(limit);
    sorted
}

/// Daily spending as bars scaled to the busiest day.
#[must_use]
pub fn format_trend_chart(points: &[TrendPoint], width: usize) -> Vec<String> {
    let max = points.iter().map(|p| p.amount).fold(0.0_f64, f64::max);
    points
        .iter()
        .map(|p| {
            let percent = if max > 0.0 { p.amount / max * 100.0 } else { 0.0 };
            let cells = filled_cells(percent, width);
            format!(
                "{}  {:<width$} {:.2}",
                p.date.format("%Y-%m-%d"),
                "█".repeat(cells),
                p.amount
            )
        })
        .collect()
}

/// Category shares as percentage bars.
#[must_use]
pub fn format_breakdown_chart(totals: &[CategoryTotal], width: usize) -> Vec<String> {
    totals
        .iter()
        .map(|t| {
            let cells = filled_cells(t.percentage, width);
            format!(
                "{:<13} {:<width$} {:>5.1}%  {:.2}",
                t.category,
                "█".repeat(cells),
                t.percentage,
                t.total_amount
            )
        })
        .collect()
}
