use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::core::traits::Repository;
use crate::core::Result;
use crate::modules::orders::models::Order;

/// Order store read/write failures
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a valid order document: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot encode orders: {0}")]
    Encode(#[source] serde_json::Error),
}

impl StoreError {
    fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Orders kept as one JSON array on disk.
///
/// Every read-modify-write cycle holds `write_lock`, so concurrent
/// submissions within this process never overwrite each other. The new
/// document is written to a sibling temp file and renamed into place.
pub struct JsonOrderStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonOrderStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the data directory and an empty document if either is missing.
    ///
    /// An existing document must parse; it is never replaced.
    pub async fn ensure_ready(&self) -> std::result::Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        self.prepare().await?;
        let orders = self.read_all().await?;
        info!(
            path = %self.path.display(),
            orders = orders.len(),
            "Order store ready"
        );
        Ok(())
    }

    async fn prepare(&self) -> std::result::Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).await.map_err(StoreError::io(dir))?;
        }

        let exists = fs::try_exists(&self.path)
            .await
            .map_err(StoreError::io(&self.path))?;
        if !exists {
            debug!(path = %self.path.display(), "Initializing empty order document");
            self.write_all(&[]).await?;
        }

        Ok(())
    }

    async fn read_all(&self) -> std::result::Result<Vec<Order>, StoreError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(&self.path)(e)),
        };

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    async fn write_all(&self, orders: &[Order]) -> std::result::Result<(), StoreError> {
        let document = serde_json::to_vec_pretty(orders).map_err(StoreError::Encode)?;

        // Flushed to disk before the rename makes it visible.
        let tmp_path = self.path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp_path)
            .await
            .map_err(StoreError::io(&tmp_path))?;
        file.write_all(&document)
            .await
            .map_err(StoreError::io(&tmp_path))?;
        file.sync_all().await.map_err(StoreError::io(&tmp_path))?;
        drop(file);

        fs::rename(&tmp_path, &self.path)
            .await
            .map_err(StoreError::io(&self.path))
    }
}

#[async_trait]
impl Repository<Order> for JsonOrderStore {
    async fn append(&self, order: Order) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.prepare().await?;

        let mut orders = self.read_all().await?;
        orders.push(order);
        self.write_all(&orders).await?;

        debug!(total = orders.len(), "Order appended");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Order>> {
        let _guard = self.write_lock.lock().await;
        Ok(self.read_all().await?)
    }
}
