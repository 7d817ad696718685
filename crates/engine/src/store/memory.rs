use std::sync::{Arc, Mutex, MutexGuard};

use crate::{EngineError, NewTransaction, ResultEngine, TimeWindow, Transaction, UserId};

use super::LedgerStore;

#[derive(Debug)]
struct StoredUser {
    id: UserId,
    external_id: String,
}

#[derive(Debug, Default)]
struct Ledger {
    users: Vec<StoredUser>,
    transactions: Vec<Transaction>,
    /// When set, every call fails as an unreachable database would.
    unavailable: bool,
}

impl Ledger {
    fn find_user(&self, external_id: &str) -> Option<UserId> {
        self.users
            .iter()
            .find(|u| u.external_id == external_id)
            .map(|u| u.id)
    }

    fn ensure_user(&mut self, external_id: &str) -> UserId {
        if let Some(id) = self.find_user(external_id) {
            return id;
        }
        let id = next_id(self.users.len());
        self.users.push(StoredUser {
            id,
            external_id: external_id.to_string(),
        });
        id
    }
}

fn next_id(len: usize) -> i32 {
    i32::try_from(len).map_or(i32::MAX, |n| n.saturating_add(1))
}

/// In-process ledger with the same contract as [`super::SqlLedger`].
///
/// Every operation runs under a single lock, which makes the
/// ensure-then-insert sequence atomic.
#[derive(Clone, Debug, Default)]
pub struct MemoryLedger {
    inner: Arc<Mutex<Ledger>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates an outage (`true`) or a recovery (`false`).
    pub fn set_unavailable(&self, unavailable: bool) {
        if let Ok(mut guard) = self.inner.lock() {
            guard.unavailable = unavailable;
        }
    }

    fn lock(&self) -> ResultEngine<MutexGuard<'_, Ledger>> {
        let guard = self.inner.lock().map_err(|_| {
            tracing::error!("memory ledger lock poisoned");
            EngineError::StoreUnavailable
        })?;
        if guard.unavailable {
            return Err(EngineError::StoreUnavailable);
        }
        Ok(guard)
    }
}

impl LedgerStore for MemoryLedger {
    async fn ensure_user(&self, external_id: &str) -> ResultEngine<UserId> {
        let mut ledger = self.lock()?;
        Ok(ledger.ensure_user(external_id))
    }

    async fn append(&self, tx: NewTransaction) -> ResultEngine<Transaction> {
        let mut ledger = self.lock()?;
        let user_id = ledger.ensure_user(&tx.external_id);
        let stored = Transaction {
            id: next_id(ledger.transactions.len()),
            user_id,
            kind: tx.kind,
            amount: tx.amount,
            category: tx.category,
            description: tx.description,
            created_at: tx.created_at,
        };
        ledger.transactions.push(stored.clone());
        Ok(stored)
    }

    async fn resolve_internal_id(&self, external_id: &str) -> ResultEngine<Option<UserId>> {
        Ok(self.lock()?.find_user(external_id))
    }

    async fn transactions(
        &self,
        user_id: UserId,
        window: TimeWindow,
    ) -> ResultEngine<Vec<Transaction>> {
        let ledger = self.lock()?;
        let mut rows: Vec<Transaction> = ledger
            .transactions
            .iter()
            .filter(|tx| tx.user_id == user_id && window.contains(tx.created_at))
            .cloned()
            .collect();
        rows.sort_by_key(|tx| (tx.created_at, tx.id));
        Ok(rows)
    }
}
