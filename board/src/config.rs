use std::{path::PathBuf, sync::Arc};

use crate::{
    error::ConfigError,
    storage::{FileStorage, MemoryStorage, Storage},
};

pub const DEFAULT_DATA_DIR: &str = ".comment-board";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Env {
    #[default]
    Dev,
    Staging,
    Production,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    File { data_dir: PathBuf },
    Memory,
}

#[derive(Clone, Debug)]
pub struct BoardConfig {
    pub env: Env,
    pub storage: StorageBackend,
    pub log_filter: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            env: Env::Dev,
            storage: StorageBackend::File {
                data_dir: DEFAULT_DATA_DIR.into(),
            },
            log_filter: DEFAULT_LOG_FILTER.into(),
        }
    }
}

fn var(key: &str) -> Result<Option<String>, ConfigError> {
    match std::env::var(key) {
        Ok(env) => Ok(Some(env)),
        Err(e) => {
            tracing::warn!("Missing environment variable `{key}`, using default");
            match e {
                std::env::VarError::NotPresent => Ok(None),
                std::env::VarError::NotUnicode(_) => Err(ConfigError::NotUnicode(key.into())),
            }
        }
    }
}

impl BoardConfig {
    /// Reads `.env` (if present) and the process environment.
    pub fn new_from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(var)
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<Option<String>, ConfigError>,
    {
        let env = match lookup("ENVIRONMENT")?.as_deref() {
            Some("staging") => Env::Staging,
            Some("production") => Env::Production,
            _ => Env::Dev,
        };

        let data_dir: PathBuf = lookup("COMMENT_BOARD_DATA_DIR")?
            .unwrap_or_else(|| DEFAULT_DATA_DIR.into())
            .into();

        let storage = match lookup("COMMENT_BOARD_STORAGE")?.as_deref() {
            None | Some("file") => StorageBackend::File { data_dir },
            Some("memory") => StorageBackend::Memory,
            Some(other) => return Err(ConfigError::UnknownStorage(other.into())),
        };

        let log_filter = lookup("RUST_LOG")?.unwrap_or_else(|| DEFAULT_LOG_FILTER.into());

        Ok(BoardConfig {
            env,
            storage,
            log_filter,
        })
    }

    /// Builds the configured storage backend.
    pub fn storage(&self) -> Arc<dyn Storage> {
        match &self.storage {
            StorageBackend::File { data_dir } => Arc::new(FileStorage::new(data_dir)),
            StorageBackend::Memory => Arc::new(MemoryStorage::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_map(vars: &[(&str, &str)]) -> Result<BoardConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        BoardConfig::from_lookup(|key| Ok(vars.get(key).cloned()))
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = from_map(&[]).unwrap();
        assert_eq!(config.env, Env::Dev);
        assert_eq!(
            config.storage,
            StorageBackend::File {
                data_dir: DEFAULT_DATA_DIR.into()
            }
        );
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn reads_all_variables() {
        let config = from_map(&[
            ("ENVIRONMENT", "production"),
            ("COMMENT_BOARD_STORAGE", "memory"),
            ("RUST_LOG", "comment_board=debug"),
        ])
        .unwrap();
        assert_eq!(config.env, Env::Production);
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.log_filter, "comment_board=debug");
    }

    #[test]
    fn custom_data_dir() {
        let config = from_map(&[("COMMENT_BOARD_DATA_DIR", "/tmp/board")]).unwrap();
        assert_eq!(
            config.storage,
            StorageBackend::File {
                data_dir: "/tmp/board".into()
            }
        );
    }

    #[test]
    fn unknown_storage_backend_is_rejected() {
        let err = from_map(&[("COMMENT_BOARD_STORAGE", "cloud")]).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownStorage(s) if s == "cloud"));
    }

    #[test]
    fn unknown_environment_falls_back_to_dev() {
        let config = from_map(&[("ENVIRONMENT", "qa")]).unwrap();
        assert_eq!(config.env, Env::Dev);
    }
}
