use eyre::Result;
use serde::{Deserialize, Serialize};

#[allow(unused_imports)]
use super::CONFIG;

use super::constants::*;
use super::defaults::*;

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Configuration {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub content: ContentConfig,

    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub messages: MessagesConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct GeneralConfig {
    #[serde(default)]
    pub verbose: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LogConfig {
    #[serde(default = "log_level")]
    pub level: Option<String>,

    #[serde(default)]
    pub filters: Option<Vec<LogFilter>>,

    /// Log destination. Records go to stderr when unset.
    #[serde(default)]
    pub file: Option<LogFile>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LogFilter {
    #[serde(default)]
    pub module: Option<String>,

    #[serde(default)]
    pub level: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LogFile {
    pub path: String,

    #[serde(default)]
    pub append: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ServerConfig {
    #[serde(default = "listen_addr")]
    pub listen: String,

    /// Path of the contact form endpoint.
    #[serde(default = "endpoint_path")]
    pub endpoint: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub enum StorageConfig {
    #[serde(rename = "sqlite")]
    Sqlite(SqliteStorage),
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SqliteStorage {
    #[serde(default = "storage_path")]
    pub path: String,

    /// Create the `messages` table at startup when it is missing.
    #[serde(default = "default_true")]
    pub migrate: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct ContentConfig {
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ClientConfig {
    #[serde(default = "client_endpoint")]
    pub endpoint: String,

    #[serde(default = "client_timeout_secs")]
    pub timeout_secs: Option<u64>,
}

/// User-facing strings of the contact form flow.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct MessagesConfig {
    #[serde(default = "success_message")]
    pub success: String,

    #[serde(default = "failure_prefix")]
    pub failure_prefix: String,

    #[serde(default = "not_post_message")]
    pub not_post: String,

    #[serde(default = "network_error_message")]
    pub network_error: String,

    #[serde(default = "in_progress_message")]
    pub in_progress: String,
}

impl Configuration {
    #[cfg(not(test))]
    pub fn instance() -> &'static Configuration {
        CONFIG.get().expect("Config not initialized")
    }

    #[cfg(not(test))]
    pub fn init(config: Configuration) -> Result<()> {
        CONFIG
            .set(config)
            .map_err(|_| eyre::eyre!("Config already initialized"))?;
        Ok(())
    }

    #[cfg(test)]
    pub fn instance() -> &'static Configuration {
        use super::TEST_CONFIG;
        TEST_CONFIG.with(|config| *config.borrow())
    }

    #[cfg(test)]
    pub fn init(config: Configuration) -> Result<()> {
        use super::TEST_CONFIG;
        TEST_CONFIG.with(|test_config| {
            *test_config.borrow_mut() = Box::leak(Box::new(config));
        });
        Ok(())
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Some("info".to_string()),
            filters: None,
            file: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: LISTEN_ADDR.to_string(),
            endpoint: ENDPOINT_PATH.to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::Sqlite(SqliteStorage::default())
    }
}

impl Default for SqliteStorage {
    fn default() -> Self {
        Self {
            path: STORAGE_PATH.to_string(),
            migrate: true,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: CLIENT_ENDPOINT.to_string(),
            timeout_secs: Some(CLIENT_TIMEOUT_SECS),
        }
    }
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            success: SUCCESS_MESSAGE.to_string(),
            failure_prefix: FAILURE_PREFIX.to_string(),
            not_post: NOT_POST_MESSAGE.to_string(),
            network_error: NETWORK_ERROR_MESSAGE.to_string(),
            in_progress: IN_PROGRESS_MESSAGE.to_string(),
        }
    }
}
