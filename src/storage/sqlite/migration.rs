pub(crate) const MIGRATION: &str = r#"
    CREATE TABLE IF NOT EXISTS messages (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT,
        email TEXT,
        subject TEXT,
        message TEXT
    );
"#;

pub(crate) const INSERT_MESSAGE: &str =
    "INSERT INTO messages (name, email, subject, message) VALUES (?1, ?2, ?3, ?4)";
