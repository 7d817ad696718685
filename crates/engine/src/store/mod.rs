//! Ledger persistence.
//!
//! [`LedgerStore`] is the only contract the rest of the engine sees. The SQL
//! implementation runs unchanged on SQLite and Postgres; the in-memory one
//! keeps the same guarantees without a database.

use std::future::Future;

use crate::{NewTransaction, ResultEngine, TimeWindow, Transaction, UserId};

mod memory;
mod sql;

pub use memory::MemoryLedger;
pub use sql::SqlLedger;

/// Append-only transaction log keyed by an internal user id.
///
/// Implementations must:
/// - never create two users for the same external id, even under concurrent
///   calls;
/// - make `append` atomic: either both the user and the transaction are
///   visible to readers, or neither is.
pub trait LedgerStore: Send + Sync {
    /// Returns the internal id for `external_id`, creating the user if absent.
    fn ensure_user(&self, external_id: &str) -> impl Future<Output = ResultEngine<UserId>> + Send;

    /// Records `tx`, creating its owner first when needed.
    fn append(&self, tx: NewTransaction) -> impl Future<Output = ResultEngine<Transaction>> + Send;

    /// Read-only lookup. `None` means nothing was ever recorded for the user.
    fn resolve_internal_id(
        &self,
        external_id: &str,
    ) -> impl Future<Output = ResultEngine<Option<UserId>>> + Send;

    /// Transactions of `user_id` inside `window`, oldest first.
    fn transactions(
        &self,
        user_id: UserId,
        window: TimeWindow,
    ) -> impl Future<Output = ResultEngine<Vec<Transaction>>> + Send;
}
