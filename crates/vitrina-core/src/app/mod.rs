//! App - アプリケーション層
//!
//! ports を組み合わせてアプリケーションロジックを実装します。
//!
//! # 主要コンポーネント
//! - **AppBuilder / App**: 構築とワイヤリング、公開操作
//! - **AdminGate**: 認証済みセッション向けの管理操作
//! - **PlanLifecycle**: プランの付与・失効・並び順
//! - **ListingCatalog**: Listing の CRUD
//! - **SweeperLoop**: 期限切れプランの定期回収

pub mod admin;
pub mod builder;
pub mod catalog;
pub mod lifecycle;
pub mod sweeper_loop;

pub use self::admin::AdminGate;
pub use self::builder::{App, AppBuilder, BuildError};
pub use self::catalog::ListingCatalog;
pub use self::lifecycle::{Activation, PlanLifecycle};
pub use self::sweeper_loop::SweeperLoop;
