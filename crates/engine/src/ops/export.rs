use chrono::{DateTime, Utc};

use crate::{ExportData, LedgerStore, OperationRow, ResultEngine, TimeWindow};

use super::Engine;

impl<S: LedgerStore> Engine<S> {
    /// Rows for the spreadsheet export: every operation, the category
    /// breakdown and the month-to-date totals.
    ///
    /// Fails with [`crate::EngineError::NoData`] if the user never recorded
    /// anything.
    pub async fn export(&self, external_id: &str, now: DateTime<Utc>) -> ResultEngine<ExportData> {
        let user_id = self.require_user(external_id).await?;

        let operations = self
            .store
            .transactions(user_id, TimeWindow::all())
            .await?
            .into_iter()
            .map(OperationRow::from)
            .collect();

        Ok(ExportData {
            operations,
            categories: self.category_breakdown(user_id).await?,
            month: self.monthly_summary(user_id, now).await?,
        })
    }
}
