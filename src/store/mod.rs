//! Persistence for the short code -> URL mapping.
//!
//! A store only knows how to load and save the whole [`Links`] snapshot.
//! Lookups and inserts happen on the loaded value, so every operation is a
//! full read (and, for writes, a full rewrite) of the backing state.

mod file;
#[cfg(test)]
pub mod memory;

use async_trait::async_trait;

use crate::{error::StoreResult, models::Links};

pub use file::JsonFileStore;

#[async_trait]
pub trait LinkStore: Send + Sync + 'static {
    /// Read the current snapshot, creating an empty one if none exists yet.
    async fn load(&self) -> StoreResult<Links>;

    /// Replace the snapshot wholesale with `links`.
    async fn save(&self, links: &Links) -> StoreResult<()>;
}
