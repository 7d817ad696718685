//! Transaction primitives.
//!
//! A `Transaction` is an immutable ledger row: once appended it is never
//! updated nor deleted.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::{Amount, EngineError, UserId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => {
                tracing::error!("unknown transaction kind in ledger: {other}");
                Err(EngineError::StoreUnavailable)
            }
        }
    }
}

/// A transaction waiting to be appended to the ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTransaction {
    pub external_id: String,
    pub kind: TransactionKind,
    pub amount: Amount,
    pub category: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewTransaction {
    pub fn new(
        external_id: &str,
        kind: TransactionKind,
        amount: Amount,
        category: &str,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            external_id: external_id.to_string(),
            kind,
            amount,
            category: category.to_string(),
            description: None,
            created_at,
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        let trimmed = description.trim();
        self.description = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i32,
    pub user_id: UserId,
    pub kind: TransactionKind,
    pub amount: Amount,
    pub category: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub kind: String,
    /// Decimal text, so every backend keeps the exact value.
    pub amount: String,
    pub category: String,
    /// Empty when the user gave no description.
    pub description: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub(crate) fn new_for(user_id: UserId, tx: &NewTransaction) -> Self {
        Self {
            id: ActiveValue::NotSet,
            user_id: ActiveValue::Set(user_id),
            kind: ActiveValue::Set(tx.kind.as_str().to_string()),
            amount: ActiveValue::Set(tx.amount.value().to_string()),
            category: ActiveValue::Set(tx.category.clone()),
            description: ActiveValue::Set(tx.description.clone().unwrap_or_default()),
            created_at: ActiveValue::Set(tx.created_at),
        }
    }
}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let amount = Decimal::from_str(&model.amount).map_err(|err| {
            tracing::error!("corrupted amount in transaction {}: {err}", model.id);
            EngineError::StoreUnavailable
        })?;
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            kind: TransactionKind::try_from(model.kind.as_str())?,
            amount: Amount::new(amount)?,
            category: model.category,
            description: (!model.description.is_empty()).then_some(model.description),
            created_at: model.created_at,
        })
    }
}
