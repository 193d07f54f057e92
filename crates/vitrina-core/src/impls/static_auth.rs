//! StaticCredentials - 設定された 1 組の認証情報で管理者を認証
//!
//! 発行済みトークンはプロセス内の HashSet に保持します（永続化しない）。

use std::collections::HashSet;
use std::sync::Mutex;

use tracing::{info, warn};

use crate::domain::{AuthError, SessionToken};
use crate::ports::{Authenticator, IdGenerator, SystemClock, UlidGenerator};

pub struct StaticCredentials {
    username: String,
    password: String,
    sessions: Mutex<HashSet<SessionToken>>,
    ids: Box<dyn IdGenerator>,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::with_id_generator(username, password, Box::new(UlidGenerator::new(SystemClock)))
    }

    pub fn with_id_generator(
        username: impl Into<String>,
        password: impl Into<String>,
        ids: Box<dyn IdGenerator>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            sessions: Mutex::new(HashSet::new()),
            ids,
        }
    }
}

impl Authenticator for StaticCredentials {
    fn login(&self, username: &str, password: &str) -> Result<SessionToken, AuthError> {
        if username != self.username || password != self.password {
            warn!(username, "rejected admin login");
            return Err(AuthError::InvalidCredentials);
        }
        let token = self.ids.generate_session_token();
        self.sessions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(token);
        info!(username, "admin logged in");
        Ok(token)
    }

    fn verify(&self, token: &SessionToken) -> Result<(), AuthError> {
        let sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        if sessions.contains(token) {
            Ok(())
        } else {
            Err(AuthError::Unauthorized)
        }
    }

    fn logout(&self, token: &SessionToken) {
        self.sessions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(token);
    }
}
