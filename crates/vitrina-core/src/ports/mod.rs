//! Ports - 抽象化レイヤー
//!
//! 外部システム（ストレージ、時計、認証）へのインターフェースを定義します。
//! 実装は `impls` にあります。

pub mod authenticator;
pub mod clock;
pub mod id_generator;
pub mod listing_store;

pub use self::authenticator::Authenticator;
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::listing_store::{ListingPredicate, ListingStore};
