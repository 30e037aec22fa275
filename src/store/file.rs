//! JSON-file snapshot backend.
//!
//! The whole mapping lives in one file holding a JSON object. Saves go to a
//! sibling temp file that is then renamed over the snapshot, so a concurrent
//! reader sees either the old or the new mapping, never a partial write.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use super::LinkStore;
use crate::{
    error::{StoreError, StoreResult},
    models::Links,
};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, operation: &'static str, source: std::io::Error) -> StoreError {
        StoreError::Io {
            operation,
            path: self.path.clone(),
            source,
        }
    }

    /// Read and decode the snapshot. `Ok(None)` means the file does not exist.
    async fn read_snapshot(&self) -> StoreResult<Option<Links>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error("read", e)),
        };

        let links: Links = serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        if let Some((code, url)) = links.first_invalid() {
            return Err(StoreError::Corrupt {
                path: self.path.clone(),
                message: format!("empty entry {code:?} -> {url:?}"),
            });
        }

        Ok(Some(links))
    }

    async fn ensure_parent_dir(&self) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| self.io_error("create_parent_dir", e))?;
            }
        }
        Ok(())
    }

    /// Unique sibling path, so concurrent writers never share a temp file.
    fn temp_path(&self) -> PathBuf {
        let n = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "links.json".into());
        self.path
            .with_file_name(format!(".{name}.{}.{n}.tmp", std::process::id()))
    }

    /// Serialize `links` into a fresh, fully synced temp file and return its path.
    async fn write_temp(&self, links: &Links) -> StoreResult<PathBuf> {
        let data = serde_json::to_vec(links)?;
        let tmp = self.temp_path();

        let result = async {
            let mut file = tokio::fs::File::create(&tmp).await?;
            file.write_all(&data).await?;
            file.sync_all().await
        }
        .await;

        if let Err(e) = result {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(self.io_error("write", e));
        }
        Ok(tmp)
    }

    /// Publish an empty snapshot unless some other task got there first.
    ///
    /// The temp file is hard-linked into place, which fails instead of
    /// overwriting when the snapshot already exists.
    async fn create_empty(&self) -> StoreResult<Links> {
        self.ensure_parent_dir().await?;
        let tmp = self.write_temp(&Links::default()).await?;

        let linked = tokio::fs::hard_link(&tmp, &self.path).await;
        let _ = tokio::fs::remove_file(&tmp).await;

        match linked {
            Ok(()) => {
                tracing::info!("Created empty link snapshot at {}", self.path.display());
                Ok(Links::default())
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => self
                .read_snapshot()
                .await?
                .ok_or_else(|| self.io_error("create", e)),
            Err(e) => Err(self.io_error("create", e)),
        }
    }
}

#[async_trait]
impl LinkStore for JsonFileStore {
    async fn load(&self) -> StoreResult<Links> {
        match self.read_snapshot().await? {
            Some(links) => Ok(links),
            None => self.create_empty().await,
        }
    }

    async fn save(&self, links: &Links) -> StoreResult<()> {
        self.ensure_parent_dir().await?;
        let tmp = self.write_temp(links).await?;

        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(self.io_error("rename", e));
        }

        tracing::debug!(
            "Saved {} link(s) to {}",
            links.len(),
            self.path.display()
        );
        Ok(())
    }
}
