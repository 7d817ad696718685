//! Dialogue used to capture a transaction.
//!
//! A [`DialogueState`] lives in the transport's session registry; the engine
//! only borrows it for the duration of one input (see [`crate::Engine::handle`]).
//!
//! ```text
//! Idle --AddIncome--> AwaitingIncomeAmount --amount--> Idle
//! Idle --AddExpense--> AwaitingExpenseCategory --category--> AwaitingExpenseAmount --amount--> Idle
//! ```
//!
//! Invalid input keeps the current state. `Cancel` returns to `Idle` from
//! anywhere, and starting a dialogue replaces the one in progress.

use crate::{Transaction, TransactionKind};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DialogueState {
    #[default]
    Idle,
    AwaitingIncomeAmount,
    AwaitingExpenseCategory,
    AwaitingExpenseAmount {
        category: String,
    },
}

impl DialogueState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    AddIncome,
    AddExpense,
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input<'a> {
    Command(Command),
    Text(&'a str),
}

/// What the transport has to tell the user after one input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    AskIncomeAmount,
    /// Present the configured categories, in order.
    AskExpenseCategory(Vec<String>),
    AskExpenseAmount { category: String },
    Recorded(Transaction),
    /// The amount was unreadable or not positive; ask again.
    InvalidAmount(TransactionKind),
    /// The category is not in the configured set; ask again.
    InvalidCategory(Vec<String>),
    /// Nothing was recorded; the same input can be sent again.
    StoreUnavailable,
    Cancelled,
    /// Text outside any dialogue.
    Ignored,
}
