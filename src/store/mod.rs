//! Announcement table access. Handlers receive an injected `AnnouncementStore`.

pub mod dynamo;
pub mod memory;

use crate::error::StoreError;
use crate::model::{Announcement, NewAnnouncement, PageCursor, ScanPage};
use async_trait::async_trait;

pub use dynamo::DynamoStore;
pub use memory::MemoryStore;

#[async_trait]
pub trait AnnouncementStore: Send + Sync {
    /// Stamp the item with the current UTC time and write it.
    async fn insert(&self, new: NewAnnouncement) -> Result<Announcement, StoreError>;

    /// Read one store page. With a cursor, resume strictly after its key.
    /// Item order is whatever the store returns for a full-table scan.
    async fn scan(&self, cursor: Option<&PageCursor>) -> Result<ScanPage, StoreError>;

    /// Cheap reachability probe for readiness checks.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
