//! IdGenerator port - ID 生成の抽象化
//!
//! # 実装
//! - **UlidGenerator**: ULID ベース（Clock の時刻を timestamp 部分に使う）

use crate::domain::ids::{ListingId, SessionToken};
use crate::ports::Clock;
use ulid::Ulid;

/// IdGenerator は Listing ID とセッショントークンを生成
///
/// # Thread Safety
/// - `Send + Sync` を要求（複数タスクから使える）
pub trait IdGenerator: Send + Sync {
    fn generate_listing_id(&self) -> ListingId;

    fn generate_session_token(&self) -> SessionToken;
}

/// UlidGenerator は ULID ベースの ID 生成器
///
/// FixedClock を渡すと timestamp 部分が決定的になります（ランダム部分は別）。
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    fn next_ulid(&self) -> Ulid {
        let timestamp_ms = self.clock.now().timestamp_millis().max(0) as u64;
        Ulid::from_parts(timestamp_ms, rand::random())
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_listing_id(&self) -> ListingId {
        ListingId::from(self.next_ulid())
    }

    fn generate_session_token(&self) -> SessionToken {
        SessionToken::from(self.next_ulid())
    }
}
