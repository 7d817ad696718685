use chrono::{DateTime, Utc};

use crate::{
    CategoryTotal, LedgerStore, Report, ResultEngine, Summary, TimeWindow, TransactionKind,
    UserId, reports::category_breakdown,
};

use super::Engine;

impl<S: LedgerStore> Engine<S> {
    async fn summary(&self, user_id: UserId, window: TimeWindow) -> ResultEngine<Summary> {
        let txs = self.store.transactions(user_id, window).await?;
        Ok(Summary::from_transactions(&txs))
    }

    /// Totals for the UTC day containing `now`.
    pub async fn daily_summary(&self, user_id: UserId, now: DateTime<Utc>) -> ResultEngine<Summary> {
        self.summary(user_id, TimeWindow::day(now)).await
    }

    /// Totals from seven days before today up to now.
    pub async fn weekly_summary(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> ResultEngine<Summary> {
        self.summary(user_id, TimeWindow::trailing_week(now)).await
    }

    /// Totals since the start of the current calendar month.
    pub async fn monthly_summary(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> ResultEngine<Summary> {
        self.summary(user_id, TimeWindow::month_to_date(now)).await
    }

    /// Lifetime expense totals per category, largest first.
    pub async fn category_breakdown(&self, user_id: UserId) -> ResultEngine<Vec<CategoryTotal>> {
        let txs = self.store.transactions(user_id, TimeWindow::all()).await?;
        Ok(category_breakdown(
            txs.iter().filter(|tx| tx.kind == TransactionKind::Expense),
        ))
    }

    /// Full report for a chat user.
    ///
    /// Fails with [`crate::EngineError::NoData`] if the user never recorded
    /// anything.
    pub async fn report(&self, external_id: &str, now: DateTime<Utc>) -> ResultEngine<Report> {
        let user_id = self.require_user(external_id).await?;
        Ok(Report {
            daily: self.daily_summary(user_id, now).await?,
            weekly: self.weekly_summary(user_id, now).await?,
            monthly: self.monthly_summary(user_id, now).await?,
            categories: self.category_breakdown(user_id).await?,
        })
    }
}
