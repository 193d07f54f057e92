//! ListingStore port - Listing の正本（source of truth）
//!
//! 単一テーブルのリレーショナルストアを想定した最小インターフェース。
//!
//! # 実装
//! - InMemoryListingStore（テスト・組み込み用）
//! - JsonFileListingStore（CLI 用、ファイルに永続化）

use async_trait::async_trait;

use crate::domain::{Listing, ListingId, StoreError};

/// Predicate used by [`ListingStore::query`].
pub type ListingPredicate<'a> = &'a (dyn Fn(&Listing) -> bool + Send + Sync);

/// ListingStore は Listing の保存・検索・一括更新を提供
///
/// # 設計原則
/// - `query` / `all` は保存順（= 作成順、ID 昇順）で返す
/// - `update_many` は全件成功か全件失敗（途中状態は他の読み手に見えない）
/// - エラーは StoreError のまま呼び出し元に返す（リトライしない）
#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Insert a new listing. Fails with `Conflict` if the id exists.
    async fn insert(&self, listing: Listing) -> Result<(), StoreError>;

    async fn get(&self, id: ListingId) -> Result<Option<Listing>, StoreError>;

    /// Replace a stored listing. Returns `false` if the id is unknown.
    async fn update(&self, listing: Listing) -> Result<bool, StoreError>;

    /// Replace several listings in one commit.
    ///
    /// Fails with `Missing` and writes nothing if any id is unknown.
    async fn update_many(&self, listings: Vec<Listing>) -> Result<usize, StoreError>;

    /// Returns `false` if the id is unknown.
    async fn delete(&self, id: ListingId) -> Result<bool, StoreError>;

    async fn query(&self, predicate: ListingPredicate<'_>) -> Result<Vec<Listing>, StoreError>;

    async fn all(&self) -> Result<Vec<Listing>, StoreError> {
        self.query(&|_| true).await
    }
}
