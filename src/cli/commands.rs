//! Command registry and argument parsing for the REPL.

use crate::{
    entities::{Category, Period, timestamp},
    errors::{Error, Result},
};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::{collections::HashMap, str::FromStr, sync::LazyLock};

/// What a command line asks the REPL to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    Help,
    Quit,
    Login,
    Register,
    Logout,
    Profile,
    Reload,
    Categories,
    Expenses,
    Search,
    ExpenseCategory,
    OnDate,
    Page,
    NextPage,
    PrevPage,
    ResetExpenses,
    AddExpense,
    EditExpense,
    DeleteExpense,
    Budgets,
    BudgetCategory,
    BudgetMonth,
    BudgetYear,
    ResetBudgets,
    AddBudget,
    SetBudget,
    DeleteBudget,
    Dashboard,
}

pub(crate) struct Command {
    pub(crate) usage: &'static str,
    pub(crate) description: &'static str,
    pub(crate) action: Action,
}

macro_rules! register_command {
    ($name:expr, $usage:expr, $desc:expr, $action:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                usage: $usage,
                description: $desc,
                action: $action,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("help", "help", "Show available commands", Action::Help, r);
    register_command!("h", "help", "Show available commands", Action::Help, r);
    register_command!("quit", "quit", "Leave the session", Action::Quit, r);
    register_command!("q", "quit", "Leave the session", Action::Quit, r);
    register_command!(
        "login",
        "login <email> <password>",
        "Log in and load your records",
        Action::Login,
        r
    );
    register_command!(
        "register",
        "register <email> <password> <confirm>",
        "Create an account",
        Action::Register,
        r
    );
    register_command!("logout", "logout", "Log out and forget records", Action::Logout, r);
    register_command!("me", "me", "Show who is logged in", Action::Profile, r);
    register_command!("reload", "reload", "Refetch budgets and expenses", Action::Reload, r);
    register_command!("r", "reload", "Refetch budgets and expenses", Action::Reload, r);
    register_command!(
        "categories",
        "categories",
        "List categories with their icons",
        Action::Categories,
        r
    );
    register_command!(
        "expenses",
        "expenses",
        "Show the current expense page",
        Action::Expenses,
        r
    );
    register_command!("e", "expenses", "Show the current expense page", Action::Expenses, r);
    register_command!(
        "search",
        "search [text]",
        "Filter expenses by description (empty clears)",
        Action::Search,
        r
    );
    register_command!(
        "category",
        "category <name|all>",
        "Filter expenses by category",
        Action::ExpenseCategory,
        r
    );
    register_command!(
        "on",
        "on <YYYY-MM-DD|any>",
        "Filter expenses by day",
        Action::OnDate,
        r
    );
    register_command!("page", "page <n>", "Go to an expense page", Action::Page, r);
    register_command!("next", "next", "Next expense page", Action::NextPage, r);
    register_command!("n", "next", "Next expense page", Action::NextPage, r);
    register_command!("prev", "prev", "Previous expense page", Action::PrevPage, r);
    register_command!("p", "prev", "Previous expense page", Action::PrevPage, r);
    register_command!(
        "reset",
        "reset",
        "Clear every expense filter",
        Action::ResetExpenses,
        r
    );
    register_command!(
        "add-expense",
        "add-expense <amount> <YYYY-MM-DD> <category> <description>",
        "Record an expense",
        Action::AddExpense,
        r
    );
    register_command!(
        "edit-expense",
        "edit-expense <id> <amount> <YYYY-MM-DD> <category> <description>",
        "Replace an expense",
        Action::EditExpense,
        r
    );
    register_command!(
        "delete-expense",
        "delete-expense <id>",
        "Delete an expense",
        Action::DeleteExpense,
        r
    );
    register_command!("budgets", "budgets", "Show the budget grid", Action::Budgets, r);
    register_command!("b", "budgets", "Show the budget grid", Action::Budgets, r);
    register_command!(
        "budget-category",
        "budget-category <name|all>",
        "Filter budgets by category",
        Action::BudgetCategory,
        r
    );
    register_command!(
        "budget-month",
        "budget-month <YYYY-MM|any>",
        "Select the budget month",
        Action::BudgetMonth,
        r
    );
    register_command!(
        "budget-year",
        "budget-year <on|off>",
        "Show the whole year of the selected month",
        Action::BudgetYear,
        r
    );
    register_command!(
        "budget-reset",
        "budget-reset",
        "Back to this month, all categories",
        Action::ResetBudgets,
        r
    );
    register_command!(
        "add-budget",
        "add-budget <category> <amount> [YYYY-MM]",
        "Set a monthly budget (default: this month)",
        Action::AddBudget,
        r
    );
    register_command!(
        "set-budget",
        "set-budget <id> <amount>",
        "Change a budget's amount",
        Action::SetBudget,
        r
    );
    register_command!(
        "delete-budget",
        "delete-budget <id>",
        "Delete a budget",
        Action::DeleteBudget,
        r
    );
    register_command!(
        "dashboard",
        "dashboard [YYYY-MM]",
        "Summary, trend, and breakdown",
        Action::Dashboard,
        r
    );
    register_command!("d", "dashboard", "Summary, trend, and breakdown", Action::Dashboard, r);

    r
});

/// Help text, one line per command (aliases folded).
pub(crate) fn help_text() -> String {
    let mut lines: Vec<(&str, &str)> = COMMANDS
        .values()
        .map(|c| (c.usage, c.description))
        .collect();
    lines.sort_unstable();
    lines.dedup();
    lines
        .iter()
        .map(|(usage, description)| format!("  {usage:<62} {description}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Closest registered command name, for "did you mean" hints.
pub(crate) fn find_closest(input: &str) -> &'static str {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1)
        .min_by_key(|k| levenshtein(input, k))
        .copied()
        .unwrap_or("help")
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

fn invalid(message: String) -> Error {
    Error::InvalidInput { message }
}

/// Fails with the command's usage unless at least `count` arguments are present.
pub(crate) fn require_args(args: &[&str], count: usize, usage: &str) -> Result<()> {
    if args.len() < count {
        return Err(invalid(format!("Usage: {usage}")));
    }
    Ok(())
}

pub(crate) fn parse_amount(raw: &str) -> Result<Decimal> {
    Decimal::from_str(raw.trim_start_matches('$').replace(',', "").as_str())
        .map_err(|_| invalid(format!("Not an amount: {raw}")))
}

pub(crate) fn parse_id(raw: &str) -> Result<i64> {
    raw.trim_start_matches('#')
        .parse()
        .map_err(|_| invalid(format!("Not an id: {raw}")))
}

pub(crate) fn parse_day(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| invalid(format!("Expected a date like 2025-11-05, got {raw}")))
}

/// `YYYY-MM` (or a full date) to the first of that month.
pub(crate) fn parse_month(raw: &str) -> Result<NaiveDate> {
    timestamp::parse_month(raw)
        .ok_or_else(|| invalid(format!("Expected a month like 2025-11, got {raw}")))
}

pub(crate) fn parse_category(raw: &str) -> Result<Category> {
    Category::from_str(raw).map_err(|_| {
        let known: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();
        invalid(format!(
            "Unknown category \"{raw}\". Choose one of: {}",
            known.join(", ")
        ))
    })
}

/// Whether a filter argument means "no restriction".
pub(crate) fn is_wildcard(raw: &str) -> bool {
    matches!(raw.to_ascii_lowercase().as_str(), "" | "all" | "any" | "none" | "clear")
}

/// A day entered without a time, stamped with the current time of day so
/// same-day entries keep their entry order.
pub(crate) fn with_time_of(day: NaiveDate, now: NaiveDateTime) -> NaiveDateTime {
    day.and_time(now.time())
}

/// Analytics window from an optional `YYYY-MM` argument.
pub(crate) fn period_arg(raw: Option<&str>) -> Result<Period> {
    match raw {
        None => Ok(Period::default()),
        Some(raw) => {
            let month = parse_month(raw)?;
            Ok(Period {
                month: Some(month.month()),
                year: Some(month.year()),
            })
        }
    }
}
