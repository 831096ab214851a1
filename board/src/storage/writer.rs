use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use super::Storage;
use crate::{comment::Forest, error::StorageError};

enum Command {
    Save(Forest),
    Flush(oneshot::Sender<()>),
}

/// Hands forest snapshots to a single background writer. Snapshots are saved
/// in the order they were queued; the caller never waits for the write.
#[derive(Clone)]
pub struct PersistenceQueue {
    tx: mpsc::UnboundedSender<Command>,
}

impl PersistenceQueue {
    /// Starts the writer task on the current Tokio runtime.
    pub fn spawn(storage: Arc<dyn Storage>) -> Result<Self, StorageError> {
        let runtime = tokio::runtime::Handle::try_current()?;
        let (tx, rx) = mpsc::unbounded_channel();
        runtime.spawn(run_writer(storage, rx));
        Ok(Self { tx })
    }

    pub fn save(&self, comments: Forest) {
        if self.tx.send(Command::Save(comments)).is_err() {
            tracing::error!("Persistence writer is gone, dropping comments snapshot");
        }
    }

    /// Resolves once every snapshot queued before this call has been written
    /// (or has failed and been logged).
    pub async fn flush(&self) -> Result<(), StorageError> {
        let (done_tx, done_rx) = oneshot::channel();
        self.tx
            .send(Command::Flush(done_tx))
            .map_err(|_| StorageError::WriterClosed)?;
        done_rx.await.map_err(|_| StorageError::WriterClosed)
    }
}

async fn run_writer(storage: Arc<dyn Storage>, mut rx: mpsc::UnboundedReceiver<Command>) {
    while let Some(command) = rx.recv().await {
        match command {
            Command::Save(mut comments) => {
                // Only the newest queued snapshot matters, but a flush marker
                // must not be passed before the snapshots ahead of it are saved.
                let mut flushed = None;
                while let Ok(next) = rx.try_recv() {
                    match next {
                        Command::Save(newer) => comments = newer,
                        Command::Flush(done) => {
                            flushed = Some(done);
                            break;
                        }
                    }
                }

                match storage.save(&comments).await {
                    Ok(()) => tracing::debug!(top_level = comments.len(), "Saved comments"),
                    Err(error) => tracing::error!(%error, "Failed to save comments"),
                }

                if let Some(done) = flushed {
                    let _ = done.send(());
                }
            }
            Command::Flush(done) => {
                let _ = done.send(());
            }
        }
    }

    tracing::debug!("Persistence writer stopped");
}
