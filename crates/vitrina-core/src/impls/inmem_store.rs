//! InMemoryListingStore - テスト・組み込み用の Listing store
//!
//! # 実装詳細
//! - tokio::sync::Mutex で ListingTable 全体を保護
//! - update_many は 1 回のロック取得内で完了するため、途中状態は見えない

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::table::ListingTable;
use crate::domain::{Listing, ListingId, StoreError};
use crate::ports::{ListingPredicate, ListingStore};

#[derive(Clone, Default)]
pub struct InMemoryListingStore {
    table: Arc<Mutex<ListingTable>>,
}

impl InMemoryListingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ListingStore for InMemoryListingStore {
    async fn insert(&self, listing: Listing) -> Result<(), StoreError> {
        self.table.lock().await.insert(listing)
    }

    async fn get(&self, id: ListingId) -> Result<Option<Listing>, StoreError> {
        Ok(self.table.lock().await.get(id).cloned())
    }

    async fn update(&self, listing: Listing) -> Result<bool, StoreError> {
        Ok(self.table.lock().await.update(listing))
    }

    async fn update_many(&self, listings: Vec<Listing>) -> Result<usize, StoreError> {
        self.table.lock().await.update_many(listings)
    }

    async fn delete(&self, id: ListingId) -> Result<bool, StoreError> {
        Ok(self.table.lock().await.delete(id))
    }

    async fn query(&self, predicate: ListingPredicate<'_>) -> Result<Vec<Listing>, StoreError> {
        Ok(self.table.lock().await.select(predicate))
    }
}
