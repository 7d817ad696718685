use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue, ConnectionTrait, DatabaseConnection, QueryFilter, QueryOrder, TransactionTrait,
    prelude::*, sea_query::OnConflict,
};

use crate::{
    EngineError, NewTransaction, ResultEngine, TimeWindow, Transaction, UserId, transactions,
    users,
};

use super::LedgerStore;

/// Ledger backed by any database sea-orm connects to.
///
/// The backend is picked by the connection URL; queries are built with
/// sea-orm so there is no per-dialect SQL here.
#[derive(Clone, Debug)]
pub struct SqlLedger {
    database: DatabaseConnection,
}

impl SqlLedger {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

async fn find_user<C: ConnectionTrait>(db: &C, external_id: &str) -> ResultEngine<Option<UserId>> {
    let user = users::Entity::find()
        .filter(users::Column::ExternalId.eq(external_id))
        .one(db)
        .await?;
    Ok(user.map(|u| u.id))
}

/// Insert-or-ignore on the unique `external_id`, then read back the winner.
async fn ensure_user_in<C: ConnectionTrait>(
    db: &C,
    external_id: &str,
    now: DateTime<Utc>,
) -> ResultEngine<UserId> {
    if let Some(id) = find_user(db, external_id).await? {
        return Ok(id);
    }

    let user = users::ActiveModel {
        id: ActiveValue::NotSet,
        external_id: ActiveValue::Set(external_id.to_string()),
        created_at: ActiveValue::Set(now),
    };
    users::Entity::insert(user)
        .on_conflict(
            OnConflict::column(users::Column::ExternalId)
                .do_nothing()
                .to_owned(),
        )
        .do_nothing()
        .exec(db)
        .await?;

    let id = find_user(db, external_id).await?.ok_or_else(|| {
        tracing::error!("user {external_id} missing right after insert");
        EngineError::StoreUnavailable
    })?;
    tracing::info!("registered ledger user {id} for {external_id}");
    Ok(id)
}

impl LedgerStore for SqlLedger {
    async fn ensure_user(&self, external_id: &str) -> ResultEngine<UserId> {
        let db_tx = self.database.begin().await?;
        let id = ensure_user_in(&db_tx, external_id, Utc::now()).await?;
        db_tx.commit().await?;
        Ok(id)
    }

    async fn append(&self, tx: NewTransaction) -> ResultEngine<Transaction> {
        // The rollback on drop keeps a failed insert from leaving an orphan user.
        let db_tx = self.database.begin().await?;
        let user_id = ensure_user_in(&db_tx, &tx.external_id, tx.created_at).await?;
        let model = transactions::ActiveModel::new_for(user_id, &tx)
            .insert(&db_tx)
            .await?;
        db_tx.commit().await?;
        Transaction::try_from(model)
    }

    async fn resolve_internal_id(&self, external_id: &str) -> ResultEngine<Option<UserId>> {
        find_user(&self.database, external_id).await
    }

    async fn transactions(
        &self,
        user_id: UserId,
        window: TimeWindow,
    ) -> ResultEngine<Vec<Transaction>> {
        let mut query =
            transactions::Entity::find().filter(transactions::Column::UserId.eq(user_id));
        if let Some(from) = window.from {
            query = query.filter(transactions::Column::CreatedAt.gte(from));
        }
        if let Some(to) = window.to {
            query = query.filter(transactions::Column::CreatedAt.lt(to));
        }

        query
            .order_by_asc(transactions::Column::CreatedAt)
            .order_by_asc(transactions::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Transaction::try_from)
            .collect()
    }
}
