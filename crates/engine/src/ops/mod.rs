use sea_orm::DatabaseConnection;

use crate::{Categories, EngineError, LedgerStore, ResultEngine, SqlLedger};

mod conversation;
mod export;
mod ledger;
mod reports;

/// Entry point of the engine: the ledger store plus the category set.
///
/// `S` defaults to the SQL store; any [`LedgerStore`] works.
#[derive(Debug)]
pub struct Engine<S = SqlLedger> {
    store: S,
    categories: Categories,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

impl<S: LedgerStore> Engine<S> {
    pub fn with_store(store: S, categories: Categories) -> Self {
        Self { store, categories }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: Option<DatabaseConnection>,
    categories: Option<Categories>,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = Some(db);
        self
    }

    /// Override the default category set
    pub fn categories(mut self, categories: Categories) -> EngineBuilder {
        self.categories = Some(categories);
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> ResultEngine<Engine> {
        let database = self
            .database
            .ok_or_else(|| EngineError::InvalidConfig("missing database".to_string()))?;
        Ok(Engine {
            store: SqlLedger::new(database),
            categories: self.categories.unwrap_or_default(),
        })
    }
}
