//! vitrina-core
//!
//! 不動産掲載カタログと、有効期限つきプラン（Basic / Premium / Featured）のライフサイクル。
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, listing, plan, filter, errors）
//! - **ports**: 抽象化レイヤー（ListingStore, Clock, IdGenerator, Authenticator）
//! - **impls**: 実装（InMemoryListingStore, JsonFileListingStore, StaticCredentials）
//! - **app**: アプリケーションロジック（PlanLifecycle, ListingCatalog, SweeperLoop, AppBuilder）

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;
