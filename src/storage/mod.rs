pub mod sqlite;

use std::sync::Arc;

use crate::{
    config::StorageConfig,
    models::{ContactForm, MessageRecord},
};
use async_trait::async_trait;
use eyre::{Context, Result};
use sqlite::Sqlite;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

/// Failure taxonomy of one insert. Each variant carries the store's own
/// error text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached. Fatal for the request.
    #[error("{0}")]
    Connection(String),

    /// The statement could not be prepared. Fatal for the request.
    #[error("{0}")]
    Prepare(String),

    /// The statement ran and failed. Reported back to the visitor.
    #[error("{0}")]
    Execute(String),
}

#[async_trait]
#[cfg_attr(test, automock)]
pub trait MessageStore {
    /// Writes one row for the submission and returns it with its id.
    async fn insert_message(&self, form: ContactForm) -> Result<MessageRecord, StoreError>;
}

pub type ArcStore = Arc<dyn MessageStore + Send + Sync>;

pub async fn new_storage(config: &StorageConfig) -> Result<ArcStore> {
    let storage = match config {
        StorageConfig::Sqlite(sqlite_config) => {
            let sqlite = Sqlite::new(&sqlite_config.path);
            if sqlite_config.migrate {
                sqlite
                    .run_migration()
                    .await
                    .wrap_err(format!("migrating {}", sqlite_config.path))?;
            }
            Arc::new(sqlite)
        }
    };
    Ok(storage)
}
