//! Storage engine for the expense service.
//!
//! [`Engine`] owns the database connection and translates the four expense
//! operations into queries. Handlers receive an explicitly constructed
//! engine instead of reaching for process-wide state.

use sea_orm::DatabaseConnection;

pub use error::EngineError;
pub use expenses::{Expense, ExpenseDraft};

mod error;
pub(crate) mod expenses;
mod ops;
pub mod tags;

type ResultEngine<T> = Result<T, EngineError>;

/// The storage accessor. Holds the single connection pool and nothing else:
/// no caching, no locks held across calls.
#[derive(Clone, Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`, verifying the connection is usable.
    pub async fn build(self) -> ResultEngine<Engine> {
        self.database.ping().await?;

        Ok(Engine {
            database: self.database,
        })
    }
}
