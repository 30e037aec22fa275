use async_trait::async_trait;
use tokio::sync::RwLock;

use super::LinkStore;
use crate::{error::StoreResult, models::Links};

/// In-process store used as a test double for the snapshot file.
#[derive(Debug, Default)]
pub struct MemoryStore {
    links: RwLock<Links>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_links(links: Links) -> Self {
        Self {
            links: RwLock::new(links),
        }
    }
}

#[async_trait]
impl LinkStore for MemoryStore {
    async fn load(&self) -> StoreResult<Links> {
        Ok(self.links.read().await.clone())
    }

    async fn save(&self, links: &Links) -> StoreResult<()> {
        *self.links.write().await = links.clone();
        Ok(())
    }
}
