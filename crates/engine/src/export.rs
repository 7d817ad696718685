//! Datasets behind the spreadsheet export.
//!
//! Sheet names, fonts and file formats belong to whoever renders these rows.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{CategoryTotal, Summary, Transaction, TransactionKind};

/// One operation as listed in the export, oldest first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OperationRow {
    pub created_at: DateTime<Utc>,
    pub kind: TransactionKind,
    pub category: String,
    pub amount: Decimal,
    pub description: String,
}

impl From<Transaction> for OperationRow {
    fn from(tx: Transaction) -> Self {
        Self {
            created_at: tx.created_at,
            kind: tx.kind,
            category: tx.category,
            amount: tx.amount.value(),
            description: tx.description.unwrap_or_default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExportData {
    pub operations: Vec<OperationRow>,
    pub categories: Vec<CategoryTotal>,
    pub month: Summary,
}
