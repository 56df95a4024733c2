#[cfg(test)]
#[path = "sqlite_test.rs"]
mod tests;

use async_trait::async_trait;
use eyre::{Context, Result};
use tokio_rusqlite::{Connection, OpenFlags, params};

use crate::models::{ContactForm, MessageRecord};
use crate::storage::{MessageStore, StoreError};

use super::migration::{INSERT_MESSAGE, MIGRATION};

/// SQLite backed message store. Every insert runs on its own connection,
/// opened for the call and closed before returning.
pub struct Sqlite {
    path: String,
}

impl Sqlite {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub async fn run_migration(&self) -> Result<()> {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        )
        .await
        .wrap_err(format!("opening database path: {}", self.path))?;

        conn.call(|conn| Ok::<_, tokio_rusqlite::rusqlite::Error>(conn.execute_batch(MIGRATION)?))
            .await
            .wrap_err("executing migration")?;
        conn.close().await.wrap_err("closing database")?;
        Ok(())
    }

    // Never creates the database file: a missing file is a connection failure.
    async fn connect(&self) -> Result<Connection, StoreError> {
        Connection::open_with_flags(&self.path, OpenFlags::SQLITE_OPEN_READ_WRITE)
            .await
            .map_err(|err| StoreError::Connection(err.to_string()))
    }
}

#[async_trait]
impl MessageStore for Sqlite {
    async fn insert_message(&self, form: ContactForm) -> Result<MessageRecord, StoreError> {
        let conn = self.connect().await?;

        let result = conn
            .call(move |conn| {
                let mut stmt = match conn.prepare(INSERT_MESSAGE) {
                    Ok(stmt) => stmt,
                    Err(err) => return Ok::<_, tokio_rusqlite::rusqlite::Error>(Err(StoreError::Prepare(err.to_string()))),
                };

                let executed = stmt.execute(params![
                    form.name(),
                    form.email(),
                    form.subject(),
                    form.message()
                ]);
                let ret = match executed {
                    Ok(_) => Ok(MessageRecord::new(conn.last_insert_rowid(), form)),
                    Err(err) => Err(StoreError::Execute(err.to_string())),
                };
                Ok(ret)
            })
            .await;

        if let Err(err) = conn.close().await {
            log::warn!("Failed to close database connection: {}", err);
        }

        match result {
            Ok(ret) => ret,
            Err(err) => Err(StoreError::Connection(err.to_string())),
        }
    }
}
