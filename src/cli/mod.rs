//! Interactive terminal session.
//!
//! Reads one command per line, runs it against the [`Session`], and prints a
//! text view of the result. Failures are reported and the loop carries on.

mod commands;
mod render;

use crate::{
    api::FinanceApi,
    commands::Session,
    core::{
        filter::CategoryFilter,
        report::display_name,
        views::{BudgetView, ExpenseView},
    },
    entities::{BudgetInput, ExpenseInput},
    errors::{Error, Result},
};
use chrono::{Local, NaiveDate};
use commands::{
    Action, COMMANDS, find_closest, help_text, is_wildcard, parse_amount, parse_category,
    parse_day, parse_id, parse_month, period_arg, require_args, with_time_of,
};
use std::io::{self, BufRead, Write};
use tracing::{debug, error, warn};

/// Whether the loop keeps reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line
    Continue,
    /// Stop the session
    Quit,
}

/// REPL state: the session plus the two list views.
pub struct Repl<A> {
    session: Session<A>,
    expenses: ExpenseView,
    budgets: BudgetView,
}

impl<A: FinanceApi> Repl<A> {
    /// A REPL whose budget grid starts at the month containing `today`.
    pub fn new(session: Session<A>, today: NaiveDate) -> Self {
        Self {
            session,
            expenses: ExpenseView::new(),
            budgets: BudgetView::new(today),
        }
    }

    /// Runs one command line and returns the text to print.
    pub async fn execute(&mut self, line: &str) -> Result<(Flow, String)> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok((Flow::Continue, String::new()));
        };
        let args: Vec<&str> = words.collect();
        let Some(command) = COMMANDS.get(name) else {
            return Ok((
                Flow::Continue,
                format!("Unknown command: {name}. Did you mean {}?", find_closest(name)),
            ));
        };
        debug!("Running {:?} with {} args", command.action, args.len());

        let output = match command.action {
            Action::Quit => return Ok((Flow::Quit, "Goodbye.".to_string())),
            Action::Help => help_text(),
            Action::Login => {
                require_args(&args, 2, command.usage)?;
                self.session.login(args[0], args[1]).await?;
                self.expenses.reset();
                self.budgets.reset();
                let greeting = format!("Logged in as {}.", args[0]);
                match self.session.reload().await {
                    Ok(_) => greeting,
                    Err(e) => {
                        warn!("Initial load after login failed: {}", e);
                        format!("{greeting}\nCould not load your records: {}", e.user_message())
                    }
                }
            }
            Action::Register => {
                require_args(&args, 3, command.usage)?;
                let user = self.session.register(args[0], args[1], args[2]).await?;
                format!("Registration successful for {}. Please login.", user.email)
            }
            Action::Logout => {
                self.session.logout().await;
                "Logged out.".to_string()
            }
            Action::Profile => {
                let user = self.session.profile().await?;
                format!("{} ({})", display_name(&user.email), user.email)
            }
            Action::Reload => {
                if self.session.reload().await? {
                    self.show_expenses().await
                } else {
                    "A newer load superseded this one.".to_string()
                }
            }
            Action::Categories => render::categories(),
            Action::Expenses => self.show_expenses().await,
            Action::Search => {
                self.expenses.set_search(args.join(" "));
                self.show_expenses().await
            }
            Action::ExpenseCategory => {
                require_args(&args, 1, command.usage)?;
                self.expenses.set_category(category_filter(args[0])?);
                self.show_expenses().await
            }
            Action::OnDate => {
                require_args(&args, 1, command.usage)?;
                let day = if is_wildcard(args[0]) {
                    None
                } else {
                    Some(parse_day(args[0])?)
                };
                self.expenses.set_exact_date(day);
                self.show_expenses().await
            }
            Action::Page => {
                require_args(&args, 1, command.usage)?;
                let page = args[0].parse().map_err(|_| Error::InvalidInput {
                    message: format!("Not a page number: {}", args[0]),
                })?;
                self.expenses.go_to_page(page);
                self.show_expenses().await
            }
            Action::NextPage => {
                self.expenses
                    .go_to_page(self.expenses.current_page().saturating_add(1));
                self.show_expenses().await
            }
            Action::PrevPage => {
                self.expenses
                    .go_to_page(self.expenses.current_page().saturating_sub(1));
                self.show_expenses().await
            }
            Action::ResetExpenses => {
                self.expenses.reset();
                self.show_expenses().await
            }
            Action::AddExpense => {
                require_args(&args, 4, command.usage)?;
                let input = expense_input(&args, Local::now().naive_local())?;
                let created = self.session.submit_expense(input).await?;
                let view = self.show_expenses().await;
                format!("Expense #{} added.\n{view}", created.id)
            }
            Action::EditExpense => {
                require_args(&args, 5, command.usage)?;
                let id = parse_id(args[0])?;
                let original_time = {
                    let store = self.session.store();
                    let store = store.read().await;
                    store.expense(id).map(|e| e.date)
                };
                let input = expense_input(
                    &args[1..],
                    original_time.unwrap_or_else(|| Local::now().naive_local()),
                )?;
                self.session.update_expense(id, input).await?;
                let view = self.show_expenses().await;
                format!("Expense #{id} updated.\n{view}")
            }
            Action::DeleteExpense => {
                require_args(&args, 1, command.usage)?;
                let id = parse_id(args[0])?;
                self.session.delete_expense(id).await?;
                let view = self.show_expenses().await;
                format!("Expense #{id} deleted.\n{view}")
            }
            Action::Budgets => self.show_budgets().await,
            Action::BudgetCategory => {
                require_args(&args, 1, command.usage)?;
                self.budgets.set_category(category_filter(args[0])?);
                self.show_budgets().await
            }
            Action::BudgetMonth => {
                require_args(&args, 1, command.usage)?;
                let month = if is_wildcard(args[0]) {
                    None
                } else {
                    Some(parse_month(args[0])?)
                };
                self.budgets.set_month(month);
                self.show_budgets().await
            }
            Action::BudgetYear => {
                require_args(&args, 1, command.usage)?;
                let whole_year = match args[0] {
                    "on" | "yes" | "true" => true,
                    "off" | "no" | "false" => false,
                    other => {
                        return Err(Error::InvalidInput {
                            message: format!("Expected on or off, got {other}"),
                        });
                    }
                };
                self.budgets.set_whole_year(whole_year);
                self.show_budgets().await
            }
            Action::ResetBudgets => {
                self.budgets.reset();
                self.show_budgets().await
            }
            Action::AddBudget => {
                require_args(&args, 2, command.usage)?;
                let category = parse_category(args[0])?;
                let amount = parse_amount(args[1])?;
                let month = match args.get(2) {
                    Some(raw) => parse_month(raw)?,
                    None => Local::now().date_naive(),
                };
                let created = self
                    .session
                    .submit_budget(BudgetInput::new(category, amount, month)?)
                    .await?;
                let view = self.show_budgets().await;
                format!("Budget #{} saved.\n{view}", created.id)
            }
            Action::SetBudget => {
                require_args(&args, 2, command.usage)?;
                let id = parse_id(args[0])?;
                let amount = parse_amount(args[1])?;
                self.session.update_budget_amount(id, amount).await?;
                let view = self.show_budgets().await;
                format!("Budget #{id} updated.\n{view}")
            }
            Action::DeleteBudget => {
                require_args(&args, 1, command.usage)?;
                let id = parse_id(args[0])?;
                self.session.delete_budget(id).await?;
                let view = self.show_budgets().await;
                format!("Budget #{id} deleted.\n{view}")
            }
            Action::Dashboard => {
                let period = period_arg(args.first().copied())?;
                let user = self.session.profile().await?;
                let dashboard = self.session.dashboard(period).await?;
                render::dashboard(&display_name(&user.email), &dashboard)
            }
        };
        Ok((Flow::Continue, output))
    }

    async fn show_expenses(&mut self) -> String {
        let store = self.session.store();
        let store = store.read().await;
        let page = self.expenses.render(store.expenses());
        render::expense_page(&page, self.expenses.state())
    }

    async fn show_budgets(&self) -> String {
        let store = self.session.store();
        let store = store.read().await;
        let grid = self.budgets.render(store.budgets(), store.expenses());
        render::budget_grid(&grid, self.budgets.filter())
    }
}

fn category_filter(raw: &str) -> Result<CategoryFilter> {
    if is_wildcard(raw) {
        Ok(CategoryFilter::All)
    } else {
        Ok(parse_category(raw)?.into())
    }
}

/// `<amount> <YYYY-MM-DD> <category> <description...>`; the day takes its time
/// of day from `time_source`.
fn expense_input(args: &[&str], time_source: chrono::NaiveDateTime) -> Result<ExpenseInput> {
    Ok(ExpenseInput {
        amount: parse_amount(args[0])?,
        description: args[3..].join(" "),
        category: parse_category(args[2])?,
        date: with_time_of(parse_day(args[1])?, time_source),
    })
}

/// Reads commands from stdin until `quit` or end of input.
pub async fn run<A: FinanceApi>(mut repl: Repl<A>) -> Result<()> {
    println!("Budget Buddy. Type `help` for commands.");
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();
    loop {
        print!("> ");
        stdout.flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        match repl.execute(line.trim()).await {
            Ok((flow, output)) => {
                if !output.is_empty() {
                    println!("{output}");
                }
                if flow == Flow::Quit {
                    break;
                }
            }
            Err(e) => {
                error!("Command failed: {}", e);
                println!("{}", e.user_message());
            }
        }
    }
    Ok(())
}
