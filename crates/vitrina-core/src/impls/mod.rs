//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **InMemoryListingStore**: テスト・組み込み用
//! - **JsonFileListingStore**: CLI 用（JSON ファイルに永続化）
//! - **StaticCredentials**: 固定の管理者認証情報

mod table;

pub mod inmem_store;
pub mod json_store;
pub mod static_auth;

pub use self::inmem_store::InMemoryListingStore;
pub use self::json_store::JsonFileListingStore;
pub use self::static_auth::StaticCredentials;
