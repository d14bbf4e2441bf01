//! Expense commands.

use super::Session;
use crate::{
    api::FinanceApi,
    entities::{Expense, ExpenseInput},
    errors::Result,
};
use tracing::{info, instrument};

impl<A: FinanceApi> Session<A> {
    /// Records a new expense, then reloads the store.
    ///
    /// # Errors
    /// Local validation errors are returned before any request is sent.
    #[instrument(skip(self))]
    pub async fn submit_expense(&self, input: ExpenseInput) -> Result<Expense> {
        input.validate()?;
        let token = self.credential().await?;
        let result = self.api.create_expense(&token, &input).await;
        let created = self.guard(result).await?;
        info!(
            "Created expense {} ({} {})",
            created.id, created.category, created.amount
        );
        self.reload().await?;
        Ok(created)
    }

    /// Replaces every field of expense `id`, then reloads the store.
    #[instrument(skip(self))]
    pub async fn update_expense(&self, id: i64, input: ExpenseInput) -> Result<Expense> {
        input.validate()?;
        let token = self.credential().await?;
        let result = self.api.update_expense(&token, id, &input).await;
        let updated = self.guard(result).await?;
        info!("Updated expense {}", updated.id);
        self.reload().await?;
        Ok(updated)
    }

    /// Deletes expense `id` and drops it from the store without refetching.
    #[instrument(skip(self))]
    pub async fn delete_expense(&self, id: i64) -> Result<()> {
        let token = self.credential().await?;
        let result = self.api.delete_expense(&token, id).await;
        self.guard(result).await?;
        let mut store = self.store.write().await;
        store.invalidate_loads();
        store.remove_expense(id);
        info!("Deleted expense {}", id);
        Ok(())
    }
}
