//! Errors - エラー型と分類
//!
//! - StoreError: ストレージ層の失敗（そのまま呼び出し元へ伝播）
//! - LifecycleError: プラン操作・カタログ操作の失敗
//! - AuthError: 認証の失敗

use std::path::PathBuf;

use super::ids::ListingId;

/// Opaque storage failure. The core never retries these.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("listing {0} already exists")]
    Conflict(ListingId),

    #[error("listing {0} vanished during a batch update")]
    Missing(ListingId),

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed listing data: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error("listing not found: {0}")]
    NotFound(ListingId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LifecycleError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LifecycleError::NotFound(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("session is not authorized")]
    Unauthorized,
}
