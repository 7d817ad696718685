//! Report aggregates.
//!
//! The functions here are pure: they fold already-loaded transactions. The
//! engine decides which window to load.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{Transaction, TransactionKind};

/// Income and expense totals over a window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub income: Decimal,
    pub expense: Decimal,
}

impl Summary {
    pub fn from_transactions<'a>(txs: impl IntoIterator<Item = &'a Transaction>) -> Self {
        let mut summary = Self::default();
        for tx in txs {
            match tx.kind {
                TransactionKind::Income => summary.income += tx.amount.value(),
                TransactionKind::Expense => summary.expense += tx.amount.value(),
            }
        }
        summary
    }

    pub fn profit(&self) -> Decimal {
        self.income - self.expense
    }

    /// `(income, expense, profit)`.
    pub fn as_tuple(&self) -> (Decimal, Decimal, Decimal) {
        (self.income, self.expense, self.profit())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

/// Sums expenses per category, largest total first.
///
/// Income rows are skipped. Equal totals keep the order in which the
/// category first appears in `txs`.
pub fn category_breakdown<'a>(txs: impl IntoIterator<Item = &'a Transaction>) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for tx in txs {
        if tx.kind != TransactionKind::Expense {
            continue;
        }
        match index.get(tx.category.as_str()) {
            Some(&idx) => totals[idx].total += tx.amount.value(),
            None => {
                index.insert(tx.category.as_str(), totals.len());
                totals.push(CategoryTotal {
                    category: tx.category.clone(),
                    total: tx.amount.value(),
                });
            }
        }
    }

    // Stable sort: ties stay in first-occurrence order.
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals
}

/// Everything shown by the reports screen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Report {
    pub daily: Summary,
    pub weekly: Summary,
    pub monthly: Summary,
    pub categories: Vec<CategoryTotal>,
}
