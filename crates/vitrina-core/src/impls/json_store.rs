//! JsonFileListingStore - JSON ファイルに永続化する Listing store
//!
//! # 実装詳細
//! - 起動時にファイル全体を読み込み、メモリ上の ListingTable に展開
//! - 変更系の操作はコピーに適用 → ファイルに書き込み → 成功したらメモリに反映
//! - 書き込みは一時ファイル + rename（失敗時は一時ファイルを削除）

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::table::ListingTable;
use crate::domain::{Listing, ListingId, StoreError};
use crate::ports::{ListingPredicate, ListingStore};

pub struct JsonFileListingStore {
    path: PathBuf,
    table: Mutex<ListingTable>,
}

impl JsonFileListingStore {
    /// Load `path`, or start empty if the file does not exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let table = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<ListingTable>(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => ListingTable::default(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        debug!(path = %path.display(), listings = table.len(), "opened listing file");
        Ok(Self {
            path,
            table: Mutex::new(table),
        })
    }

    async fn persist(&self, table: &ListingTable) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(table)?;
        let tmp = self.path.with_extension("json.tmp");
        let written = match tokio::fs::write(&tmp, bytes).await {
            Ok(()) => tokio::fs::rename(&tmp, &self.path)
                .await
                .map_err(|source| StoreError::Io {
                    path: self.path.clone(),
                    source,
                }),
            Err(source) => Err(StoreError::Io {
                path: tmp.clone(),
                source,
            }),
        };
        if written.is_err()
            && let Err(e) = tokio::fs::remove_file(&tmp).await
            && e.kind() != std::io::ErrorKind::NotFound
        {
            warn!(path = %tmp.display(), error = %e, "could not remove temporary listing file");
        }
        written
    }

    /// Apply `change` to a copy, write it out, then swap it in.
    async fn commit<T>(
        &self,
        change: impl FnOnce(&mut ListingTable) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut guard = self.table.lock().await;
        let mut next = guard.clone();
        let out = change(&mut next)?;
        self.persist(&next).await?;
        *guard = next;
        Ok(out)
    }
}

#[async_trait]
impl ListingStore for JsonFileListingStore {
    async fn insert(&self, listing: Listing) -> Result<(), StoreError> {
        self.commit(|table| table.insert(listing)).await
    }

    async fn get(&self, id: ListingId) -> Result<Option<Listing>, StoreError> {
        Ok(self.table.lock().await.get(id).cloned())
    }

    async fn update(&self, listing: Listing) -> Result<bool, StoreError> {
        self.commit(|table| Ok(table.update(listing))).await
    }

    async fn update_many(&self, listings: Vec<Listing>) -> Result<usize, StoreError> {
        if listings.is_empty() {
            return Ok(0);
        }
        self.commit(|table| table.update_many(listings)).await
    }

    async fn delete(&self, id: ListingId) -> Result<bool, StoreError> {
        self.commit(|table| Ok(table.delete(id))).await
    }

    async fn query(&self, predicate: ListingPredicate<'_>) -> Result<Vec<Listing>, StoreError> {
        Ok(self.table.lock().await.select(predicate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PlanTier;
    use crate::domain::listing::fixtures::listing;
    use chrono::Utc;
    use ulid::Ulid;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir().join(format!("vitrina-store-{}.json", Ulid::new()))
    }

    #[tokio::test]
    async fn missing_file_opens_empty() {
        let store = JsonFileListingStore::open(scratch_path()).await.unwrap();
        assert!(store.all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reopen_sees_what_was_saved() {
        let path = scratch_path();
        let mut l = listing("Casa campestre", Utc::now());
        l.activate_plan(PlanTier::Featured, Utc::now());

        {
            let store = JsonFileListingStore::open(&path).await.unwrap();
            store.insert(l.clone()).await.unwrap();
        }

        let reopened = JsonFileListingStore::open(&path).await.unwrap();
        assert_eq!(reopened.get(l.id).await.unwrap(), Some(l));

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn failed_batch_leaves_file_untouched() {
        let path = scratch_path();
        let store = JsonFileListingStore::open(&path).await.unwrap();
        let l = listing("Casa", Utc::now());
        store.insert(l.clone()).await.unwrap();

        let mut changed = l.clone();
        changed.title = "Changed".to_string();
        let stranger = listing("Lote", Utc::now());
        assert!(store.update_many(vec![changed, stranger]).await.is_err());

        let reopened = JsonFileListingStore::open(&path).await.unwrap();
        assert_eq!(reopened.get(l.id).await.unwrap().unwrap().title, "Casa");

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn failed_rename_removes_temporary_file() {
        let path = scratch_path();
        let store = JsonFileListingStore::open(&path).await.unwrap();
        // A directory in place of the data file makes the rename fail.
        tokio::fs::create_dir(&path).await.unwrap();

        let err = store.insert(listing("Casa", Utc::now())).await.unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert!(!tokio::fs::try_exists(path.with_extension("json.tmp")).await.unwrap());
        assert!(store.all().await.unwrap().is_empty());

        tokio::fs::remove_dir(&path).await.unwrap();
    }

    #[tokio::test]
    async fn corrupt_file_is_a_serialization_error() {
        let path = scratch_path();
        tokio::fs::write(&path, b"not json").await.unwrap();

        let err = JsonFileListingStore::open(&path).await.err().unwrap();
        assert!(matches!(err, StoreError::Serialization(_)));

        tokio::fs::remove_file(&path).await.unwrap();
    }
}
