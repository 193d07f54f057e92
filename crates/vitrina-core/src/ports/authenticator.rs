//! Authenticator port - 管理者認証の抽象化
//!
//! プランのライフサイクル自体は認証に依存しません。
//! 「呼び出し元が管理者である」ことの確認はアプリケーション層（AdminGate）で行います。

use crate::domain::{AuthError, SessionToken};

/// Authenticator は認証情報を検証してセッショントークンを発行
pub trait Authenticator: Send + Sync {
    /// Verify credentials and issue a fresh session token.
    fn login(&self, username: &str, password: &str) -> Result<SessionToken, AuthError>;

    /// `Unauthorized` unless `token` was issued and not revoked.
    fn verify(&self, token: &SessionToken) -> Result<(), AuthError>;

    /// Revoke a token. Unknown tokens are ignored.
    fn logout(&self, token: &SessionToken);
}
