use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;

use super::{STORAGE_KEY, Storage, decode};
use crate::{comment::Forest, error::StorageError};

/// Stores the forest as `<dir>/comments.json` on the local device.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{STORAGE_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn save(&self, comments: &Forest) -> Result<(), StorageError> {
        let json = serde_json::to_vec(comments)?;

        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }

        // Write next to the target and rename so a crash never leaves half a file
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        Ok(())
    }

    async fn load(&self) -> Result<Option<Forest>, StorageError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(Some(decode(&bytes)?))
    }
}
