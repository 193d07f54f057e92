//! Domain identifiers (strongly-typed IDs).
//!
//! # ULID ベースの ID
//! Listing と Session の ID は ULID を使います。
//! ULID は生成時刻でソートできるため、store の並び順 = 作成順になります。
//!
//! ## Phantom Type パターン
//! `Id<T>` に共通実装を持たせ、`T` はコンパイル時だけのマーカー型です。
//! ListingId と SessionToken は混同できません。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use ulid::Ulid;

/// IdMarker は各 ID 型のマーカー trait
///
/// Display で使うプレフィックス（"listing-", "session-"）を提供します。
pub trait IdMarker: Send + Sync + 'static {
    fn prefix() -> &'static str;
}

/// ジェネリック ID 型
///
/// JSON 上は素の ULID 文字列として保存されます（プレフィックスなし）。
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<T: IdMarker> {
    ulid: Ulid,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self {
            ulid,
            _marker: PhantomData,
        }
    }

    pub fn as_ulid(&self) -> Ulid {
        self.ulid
    }
}

impl<T: IdMarker> From<Ulid> for Id<T> {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.ulid)
    }
}

/// Error returned when an id string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid id `{input}`: {reason}")]
pub struct IdParseError {
    pub input: String,
    pub reason: String,
}

/// Accepts both the display form (`listing-01H...`) and the bare ULID.
impl<T: IdMarker> FromStr for Id<T> {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let raw = raw.strip_prefix(T::prefix()).unwrap_or(raw);
        Ulid::from_string(raw)
            .map(Self::from_ulid)
            .map_err(|e| IdParseError {
                input: s.to_string(),
                reason: e.to_string(),
            })
    }
}

// ========================================
// マーカー型の定義
// ========================================

/// Listing のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Listing {}

impl IdMarker for Listing {
    fn prefix() -> &'static str {
        "listing-"
    }
}

/// Session のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Session {}

impl IdMarker for Session {
    fn prefix() -> &'static str {
        "session-"
    }
}

/// Identifier of a Listing (immutable once created).
pub type ListingId = Id<Listing>;

/// Opaque token issued by an `Authenticator` after a successful login.
pub type SessionToken = Id<Session>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_prefix() {
        let listing = ListingId::from_ulid(Ulid::new());
        let token = SessionToken::from_ulid(Ulid::new());

        assert!(listing.to_string().starts_with("listing-"));
        assert!(token.to_string().starts_with("session-"));
    }

    #[test]
    fn parse_accepts_display_form_and_bare_ulid() {
        let ulid = Ulid::new();
        let id = ListingId::from_ulid(ulid);

        assert_eq!(id.to_string().parse::<ListingId>().unwrap(), id);
        assert_eq!(ulid.to_string().parse::<ListingId>().unwrap(), id);
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = "listing-not-a-ulid".parse::<ListingId>().unwrap_err();
        assert_eq!(err.input, "listing-not-a-ulid");
    }

    #[test]
    fn ids_serialize_as_bare_ulid() {
        let ulid = Ulid::new();
        let id = ListingId::from_ulid(ulid);

        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{ulid}\""));

        let back: ListingId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn ulid_ids_sort_by_creation_time() {
        let first = ListingId::from_ulid(Ulid::from_parts(1_000, 0));
        let second = ListingId::from_ulid(Ulid::from_parts(2_000, 0));
        assert!(first < second);
    }
}
