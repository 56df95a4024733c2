pub(crate) mod migration;
mod sqlite;

pub use sqlite::Sqlite;
