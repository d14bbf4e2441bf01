//! Budget commands.

use super::Session;
use crate::{
    api::FinanceApi,
    entities::{Budget, BudgetInput},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use tracing::{info, instrument, warn};

impl<A: FinanceApi> Session<A> {
    /// Creates a budget, then reloads the store.
    ///
    /// # Errors
    /// * [`Error::InvalidAmount`] for a zero or negative amount.
    /// * [`Error::DuplicateBudget`] when the store already holds a budget for
    ///   the same category and month; nothing is sent.
    /// * [`Error::ValidationConflict`] when the server rejects it as a duplicate.
    #[instrument(skip(self))]
    pub async fn submit_budget(&self, input: BudgetInput) -> Result<Budget> {
        input.validate()?;
        let token = self.credential().await?;
        {
            let store = self.store.read().await;
            if store
                .budgets()
                .iter()
                .any(|b| b.covers(&input.category, input.month))
            {
                warn!(
                    "Rejected duplicate budget for {} in {}",
                    input.category, input.month
                );
                return Err(Error::DuplicateBudget {
                    category: input.category.clone(),
                    month: input.month,
                });
            }
        }
        let result = self.api.create_budget(&token, &input).await;
        let created = self.guard(result).await?;
        info!(
            "Created budget {} ({} {} for {})",
            created.id, created.category, created.amount, created.month
        );
        self.reload().await?;
        Ok(created)
    }

    /// Changes only the amount of budget `id`; category and month are kept.
    ///
    /// # Errors
    /// [`Error::InvalidInput`] if the store holds no budget with `id`.
    #[instrument(skip(self))]
    pub async fn update_budget_amount(&self, id: i64, amount: Decimal) -> Result<Budget> {
        let input = {
            let store = self.store.read().await;
            let existing = store.budget(id).ok_or_else(|| Error::InvalidInput {
                message: format!("No budget with id {id}."),
            })?;
            BudgetInput::amended(existing, amount)
        };
        input.validate()?;
        let token = self.credential().await?;
        let result = self.api.update_budget(&token, id, &input).await;
        let updated = self.guard(result).await?;
        info!("Budget {} amount set to {}", updated.id, updated.amount);
        self.reload().await?;
        Ok(updated)
    }

    /// Deletes budget `id` and drops it from the store without refetching.
    #[instrument(skip(self))]
    pub async fn delete_budget(&self, id: i64) -> Result<()> {
        let token = self.credential().await?;
        let result = self.api.delete_budget(&token, id).await;
        self.guard(result).await?;
        let mut store = self.store.write().await;
        store.invalidate_loads();
        store.remove_budget(id);
        info!("Deleted budget {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        entities::Category,
        test_utils::{FakeApi, budget},
    };
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::time::Duration;

    async fn session_with(budgets: Vec<Budget>) -> Result<Session<FakeApi>> {
        let api = FakeApi::with_user("cy@example.com", "pw");
        api.seed_budgets(budgets);
        let session = Session::new(api);
        session.login("cy@example.com", "pw").await?;
        session.reload().await?;
        Ok(session)
    }

    fn november(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, day).unwrap()
    }

    #[tokio::test]
    async fn test_submit_normalizes_month() -> Result<()> {
        let session = session_with(vec![]).await?;
        let input = BudgetInput::new(Category::Food, dec!(200), november(18))?;
        let created = session.submit_budget(input).await?;
        assert_eq!(created.month, november(1));
        assert_eq!(session.store().read().await.budgets().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_caught_before_sending() -> Result<()> {
        let session = session_with(vec![budget(1, "Food", dec!(200), 2025, 11)]).await?;
        let calls_before = session.api().calls().len();
        let input = BudgetInput::new(Category::Food, dec!(50), november(3))?;
        let err = session.submit_budget(input).await.unwrap_err();
        assert!(matches!(err, Error::DuplicateBudget { .. }));
        assert!(err.user_message().contains("\"Food\""));
        assert_eq!(session.api().calls().len(), calls_before);
        Ok(())
    }

    #[tokio::test]
    async fn test_server_conflict_is_validation_conflict() -> Result<()> {
        let session = session_with(vec![]).await?;
        // Created elsewhere after our last reload.
        session
            .api()
            .seed_budgets(vec![budget(7, "Food", dec!(200), 2025, 11)]);
        let input = BudgetInput::new(Category::Food, dec!(80), november(1))?;
        let err = session.submit_budget(input).await.unwrap_err();
        assert!(matches!(err, Error::ValidationConflict { .. }));
        assert_eq!(
            err.user_message(),
            "Duplicate budget! You already have this budget."
        );
        assert!(session.store().read().await.budgets().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_zero_amount_rejected_at_creation() -> Result<()> {
        let session = session_with(vec![]).await?;
        let input = BudgetInput::new(Category::Health, Decimal::ZERO, november(1))?;
        assert!(matches!(
            session.submit_budget(input).await,
            Err(Error::InvalidAmount { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_amount_keeps_category_and_month() -> Result<()> {
        let session = session_with(vec![budget(4, "Travel", dec!(300), 2025, 6)]).await?;
        let updated = session.update_budget_amount(4, dec!(450)).await?;
        assert_eq!(updated.amount, dec!(450));
        assert_eq!(updated.category, "Travel");
        assert_eq!(updated.month, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());

        assert!(matches!(
            session.update_budget_amount(99, dec!(1)).await,
            Err(Error::InvalidInput { .. })
        ));
        assert!(matches!(
            session.update_budget_amount(4, dec!(-5)).await,
            Err(Error::InvalidAmount { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_removes_from_store() -> Result<()> {
        let session = session_with(vec![
            budget(1, "Food", dec!(200), 2025, 11),
            budget(2, "Health", dec!(100), 2025, 11),
        ])
        .await?;
        session.delete_budget(1).await?;
        let store = session.store();
        let store = store.read().await;
        assert!(store.budget(1).is_none());
        assert!(store.budget(2).is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_unseen_budget_during_load_stays_deleted() -> Result<()> {
        let session = session_with(vec![]).await?;
        // Created elsewhere since the last reload.
        session
            .api()
            .seed_budgets(vec![budget(6, "Gifts", dec!(40), 2025, 12)]);

        session.api().delay_next_expense_fetch(Duration::from_millis(50));
        let (reloaded, deleted) = tokio::join!(session.reload(), session.delete_budget(6));
        deleted?;

        assert!(!reloaded?);
        assert!(session.store().read().await.budget(6).is_none());
        Ok(())
    }
}
