//! Ledger engine.
//!
//! Captures income and expense transactions through a short dialogue and
//! aggregates them into daily, weekly and monthly reports, a per-category
//! breakdown and the rows of the spreadsheet export.
//!
//! The engine knows nothing about the chat platform: users are identified by
//! an opaque external id and persistence goes through [`LedgerStore`].

pub use amount::{Amount, ParseAmountError, parse_amount};
pub use categories::{Categories, DEFAULT_EXPENSE_CATEGORIES, DEFAULT_INCOME_CATEGORY};
pub use conversation::{Command, DialogueState, Input, Outcome};
pub use error::EngineError;
pub use export::{ExportData, OperationRow};
pub use ops::{Engine, EngineBuilder};
pub use reports::{CategoryTotal, Report, Summary};
pub use store::{LedgerStore, MemoryLedger, SqlLedger};
pub use transactions::{NewTransaction, Transaction, TransactionKind};
pub use window::TimeWindow;

mod amount;
mod categories;
mod conversation;
mod error;
mod export;
mod ops;
mod reports;
mod store;
mod transactions;
mod users;
mod window;

type ResultEngine<T> = Result<T, EngineError>;

/// Internal ledger key of a user.
pub type UserId = i32;
