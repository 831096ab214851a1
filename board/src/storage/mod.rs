mod file;
mod writer;

pub use file::FileStorage;
pub use writer::PersistenceQueue;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::{comment::Forest, error::StorageError};

/// Fixed key the forest is stored under.
pub const STORAGE_KEY: &str = "comments";

/// Where the forest lives between sessions. `save` overwrites whatever was
/// stored before; `load` returns `None` when nothing was ever saved.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn save(&self, comments: &Forest) -> Result<(), StorageError>;

    async fn load(&self) -> Result<Option<Forest>, StorageError>;
}

/// Parses a stored forest. Reply threads have no depth bound, so the JSON
/// nesting limit is off and the stack grows on demand while decoding.
fn decode(bytes: &[u8]) -> Result<Forest, StorageError> {
    let mut de = serde_json::Deserializer::from_slice(bytes);
    de.disable_recursion_limit();
    let comments = Forest::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(comments)
}

/// Keeps the serialized forest in memory. Goes away with the process.
#[derive(Default)]
pub struct MemoryStorage {
    value: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw JSON stored under [`STORAGE_KEY`], if any.
    pub async fn raw(&self) -> Option<String> {
        self.value.lock().await.clone()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn save(&self, comments: &Forest) -> Result<(), StorageError> {
        let json = serde_json::to_string(comments)?;
        *self.value.lock().await = Some(json);
        Ok(())
    }

    async fn load(&self) -> Result<Option<Forest>, StorageError> {
        match self.value.lock().await.as_deref() {
            Some(json) => Ok(Some(decode(json.as_bytes())?)),
            None => Ok(None),
        }
    }
}
