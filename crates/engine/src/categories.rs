//! The closed set of expense categories and the income label.
//!
//! Both come from configuration. Matching is exact: no trimming and no case
//! folding, since the transport sends back the button text verbatim.

use crate::{EngineError, ResultEngine};

pub const DEFAULT_EXPENSE_CATEGORIES: [&str; 6] = [
    "продукты",
    "персонал",
    "аренда",
    "коммуналка",
    "реклама",
    "прочее",
];

pub const DEFAULT_INCOME_CATEGORY: &str = "доход";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Categories {
    expense: Vec<String>,
    income: String,
}

impl Categories {
    pub fn new(expense: Vec<String>, income: &str) -> ResultEngine<Self> {
        if expense.is_empty() {
            return Err(EngineError::InvalidConfig(
                "expense category list must not be empty".to_string(),
            ));
        }
        for (idx, name) in expense.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(EngineError::InvalidConfig(
                    "expense category names must not be empty".to_string(),
                ));
            }
            if expense[..idx].contains(name) {
                return Err(EngineError::InvalidConfig(format!(
                    "duplicate expense category: {name}"
                )));
            }
        }
        if income.trim().is_empty() {
            return Err(EngineError::InvalidConfig(
                "income category must not be empty".to_string(),
            ));
        }

        Ok(Self {
            expense,
            income: income.to_string(),
        })
    }

    /// Expense categories in configured order.
    pub fn expense(&self) -> &[String] {
        &self.expense
    }

    /// Label stored on every income transaction.
    pub fn income(&self) -> &str {
        &self.income
    }

    pub fn find_expense(&self, input: &str) -> Option<&str> {
        self.expense
            .iter()
            .find(|name| name.as_str() == input)
            .map(String::as_str)
    }
}

impl Default for Categories {
    fn default() -> Self {
        Self {
            expense: DEFAULT_EXPENSE_CATEGORIES
                .iter()
                .map(ToString::to_string)
                .collect(),
            income: DEFAULT_INCOME_CATEGORY.to_string(),
        }
    }
}
