use chrono::{DateTime, Utc};

use crate::{
    Amount, EngineError, LedgerStore, NewTransaction, ResultEngine, Transaction,
    TransactionKind, UserId,
};

use super::Engine;

impl<S: LedgerStore> Engine<S> {
    pub async fn ensure_user(&self, external_id: &str) -> ResultEngine<UserId> {
        self.store.ensure_user(external_id).await
    }

    pub async fn resolve_internal_id(&self, external_id: &str) -> ResultEngine<Option<UserId>> {
        self.store.resolve_internal_id(external_id).await
    }

    /// Same as [`Self::resolve_internal_id`], with a missing user reported as
    /// [`EngineError::NoData`].
    pub async fn require_user(&self, external_id: &str) -> ResultEngine<UserId> {
        self.resolve_internal_id(external_id)
            .await?
            .ok_or(EngineError::NoData)
    }

    /// Records an income with the configured income label.
    pub async fn income(
        &self,
        external_id: &str,
        amount: Amount,
        description: Option<&str>,
        occurred_at: DateTime<Utc>,
    ) -> ResultEngine<Transaction> {
        let tx = NewTransaction::new(
            external_id,
            TransactionKind::Income,
            amount,
            self.categories.income(),
            occurred_at,
        )
        .description(description.unwrap_or_default());
        self.append(tx).await
    }

    /// Records an expense; `category` must belong to the configured set.
    pub async fn expense(
        &self,
        external_id: &str,
        amount: Amount,
        category: &str,
        description: Option<&str>,
        occurred_at: DateTime<Utc>,
    ) -> ResultEngine<Transaction> {
        let category = self
            .categories
            .find_expense(category)
            .ok_or_else(|| EngineError::InvalidCategory(category.to_string()))?;
        let tx = NewTransaction::new(
            external_id,
            TransactionKind::Expense,
            amount,
            category,
            occurred_at,
        )
        .description(description.unwrap_or_default());
        self.append(tx).await
    }

    async fn append(&self, tx: NewTransaction) -> ResultEngine<Transaction> {
        let recorded = self.store.append(tx).await?;
        tracing::info!(
            "recorded {} #{} for user {}: {} ({})",
            recorded.kind.as_str(),
            recorded.id,
            recorded.user_id,
            recorded.amount,
            recorded.category
        );
        Ok(recorded)
    }
}
