#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("Could not access comment storage: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored comments are not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("The persistence writer has stopped, queued comments were not saved")]
    WriterClosed,

    #[error("No Tokio runtime to run the persistence writer on: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Could not get the environment variable `{0}` due to unicode error")]
    NotUnicode(String),

    #[error("Unknown storage backend `{0}`, expected `file` or `memory`")]
    UnknownStorage(String),
}
