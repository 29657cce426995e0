//! In-memory announcement table. Scans in primary-key order.

use crate::error::StoreError;
use crate::model::{Announcement, NewAnnouncement, PageCursor, PrimaryKey, ScanPage};
use crate::store::AnnouncementStore;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::ops::Bound;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryStore {
    items: RwLock<BTreeMap<PrimaryKey, Announcement>>,
    page_size: Option<usize>,
}

impl MemoryStore {
    pub fn new(page_size: Option<usize>) -> Self {
        Self {
            items: RwLock::new(BTreeMap::new()),
            page_size: page_size.filter(|n| *n > 0),
        }
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// Write unless the key is taken, mirroring the conditional put of `DynamoStore`.
    async fn put_new(&self, item: Announcement) -> Result<Announcement, StoreError> {
        let mut items = self.items.write().await;
        let key = item.key();
        if items.contains_key(&key) {
            return Err(StoreError::client_fault(
                400,
                "ConditionalCheckFailedException",
                "The conditional request failed",
            ));
        }
        items.insert(key, item.clone());
        tracing::debug!(title = %item.title, date_time = %item.date_time, "memory insert");
        Ok(item)
    }
}

#[async_trait]
impl AnnouncementStore for MemoryStore {
    async fn insert(&self, new: NewAnnouncement) -> Result<Announcement, StoreError> {
        self.put_new(new.stamp(Utc::now())).await
    }

    async fn scan(&self, cursor: Option<&PageCursor>) -> Result<ScanPage, StoreError> {
        let items = self.items.read().await;
        let lower = match cursor {
            Some(c) => Bound::Excluded(c.last_key.clone()),
            None => Bound::Unbounded,
        };
        let limit = self.page_size.unwrap_or(usize::MAX);
        let page: Vec<Announcement> = items
            .range((lower, Bound::Unbounded))
            .take(limit)
            .map(|(_, v)| v.clone())
            .collect();
        // Like DynamoDB, a full page yields a last key; only a short page proves the end.
        let last_key = match page.last() {
            Some(last) if page.len() == limit => Some(last.key()),
            _ => None,
        };
        tracing::debug!(count = page.len(), more = last_key.is_some(), "memory scan");
        Ok(ScanPage {
            items: page,
            last_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new(title: &str) -> NewAnnouncement {
        NewAnnouncement {
            title: title.into(),
            description: "body text".into(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_32_char_timestamp() {
        let store = MemoryStore::new(None);
        let a = store.insert(new("Maintenance Window")).await.unwrap();
        assert_eq!(a.date_time.chars().count(), 32);
        assert!(a.date_time.ends_with("+00:00"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn duplicate_key_is_rejected() {
        let store = MemoryStore::new(None);
        let a = store.insert(new("First post")).await.unwrap();
        let err = store.put_new(a).await.unwrap_err();
        assert_eq!(err.code, "ConditionalCheckFailedException");
        assert_eq!(err.status, 400);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn scan_pages_resume_after_cursor() {
        let store = MemoryStore::new(Some(2));
        for t in ["aaaa", "bbbb", "cccc", "dddd", "eeee"] {
            store.insert(new(t)).await.unwrap();
        }
        let mut seen = Vec::new();
        let mut cursor: Option<PageCursor> = None;
        let mut pages = 0;
        loop {
            let page = store.scan(cursor.as_ref()).await.unwrap();
            pages += 1;
            seen.extend(page.items.iter().map(|a| a.title.clone()));
            match page.last_key {
                Some(k) => {
                    cursor = Some(PageCursor {
                        last_key: k,
                        next_page_number: pages + 1,
                    })
                }
                None => break,
            }
        }
        assert_eq!(seen, vec!["aaaa", "bbbb", "cccc", "dddd", "eeee"]);
        assert_eq!(pages, 3);
    }

    #[tokio::test]
    async fn unbounded_scan_has_no_last_key() {
        let store = MemoryStore::new(None);
        store.insert(new("only one")).await.unwrap();
        let page = store.scan(None).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert!(page.last_key.is_none());
    }
}
