//! AppBuilder - アプリケーションの構築とワイヤリング
//!
//! # Fail-fast 設計
//! - store / clock / authenticator のどれかが欠けていれば build() が BuildError を返す

use std::sync::Arc;
use std::time::Duration;

use super::admin::AdminGate;
use super::catalog::ListingCatalog;
use super::lifecycle::PlanLifecycle;
use super::sweeper_loop::SweeperLoop;
use crate::domain::{
    AuthError, HOME_FEATURED_LIMIT, LifecycleError, Listing, ListingFilter, ListingId,
    SessionToken,
};
use crate::ports::{Authenticator, Clock, ListingStore};

/// AppBuilder はアプリケーションを構築
///
/// # 使用例
/// ```ignore
/// let app = AppBuilder::new()
///     .store(InMemoryListingStore::new())
///     .clock(SystemClock)
///     .authenticator(StaticCredentials::new("admin", "1234"))
///     .build()?;
/// ```
pub struct AppBuilder<S, C> {
    store: Option<Arc<S>>,
    clock: Option<Arc<C>>,
    authenticator: Option<Arc<dyn Authenticator>>,
}

/// BuildError はアプリケーション構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("missing component: {0}. Call AppBuilder::{0}() before build().")]
    MissingComponent(&'static str),
}

impl<S: ListingStore, C: Clock> AppBuilder<S, C> {
    pub fn new() -> Self {
        Self {
            store: None,
            clock: None,
            authenticator: None,
        }
    }

    pub fn store(self, store: S) -> Self {
        self.shared_store(Arc::new(store))
    }

    /// Use a store the caller keeps a handle to.
    pub fn shared_store(mut self, store: Arc<S>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn clock(self, clock: C) -> Self {
        self.shared_clock(Arc::new(clock))
    }

    pub fn shared_clock(mut self, clock: Arc<C>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn authenticator(mut self, authenticator: impl Authenticator + 'static) -> Self {
        self.authenticator = Some(Arc::new(authenticator));
        self
    }

    pub fn build(self) -> Result<App<S, C>, BuildError> {
        let store = self.store.ok_or(BuildError::MissingComponent("store"))?;
        let clock = self.clock.ok_or(BuildError::MissingComponent("clock"))?;
        let authenticator = self
            .authenticator
            .ok_or(BuildError::MissingComponent("authenticator"))?;
        Ok(App {
            lifecycle: PlanLifecycle::new(Arc::clone(&store), Arc::clone(&clock)),
            catalog: ListingCatalog::new(store, clock),
            authenticator,
        })
    }
}

impl<S: ListingStore, C: Clock> Default for AppBuilder<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

/// App は公開操作を直接、管理操作を AdminGate 経由で提供
pub struct App<S, C> {
    pub(super) lifecycle: PlanLifecycle<S, C>,
    pub(super) catalog: ListingCatalog<S, C>,
    authenticator: Arc<dyn Authenticator>,
}

impl<S: ListingStore, C: Clock> App<S, C> {
    /// Featured listings for the home page.
    pub async fn home(&self) -> Result<Vec<Listing>, LifecycleError> {
        let now = self.lifecycle.now();
        self.lifecycle
            .select_featured_for_home(now, HOME_FEATURED_LIMIT)
            .await
    }

    /// Public catalog, ranked by plan tier.
    pub async fn browse(&self, filter: &ListingFilter) -> Result<Vec<Listing>, LifecycleError> {
        self.lifecycle.rank_for_listing(filter).await
    }

    pub async fn detail(&self, id: ListingId) -> Result<Listing, LifecycleError> {
        self.catalog.get(id).await
    }

    /// Per-request expiry sweep, as run before public reads.
    pub async fn sweep_expired(&self) -> Result<usize, LifecycleError> {
        self.lifecycle.sweep_expired_plans_now().await
    }

    pub fn login(&self, username: &str, password: &str) -> Result<SessionToken, AuthError> {
        self.authenticator.login(username, password)
    }

    pub fn logout(&self, token: &SessionToken) {
        self.authenticator.logout(token);
    }

    /// Admin operations for a verified session.
    pub fn admin(&self, token: &SessionToken) -> Result<AdminGate<'_, S, C>, AuthError> {
        self.authenticator.verify(token)?;
        Ok(AdminGate::new(self))
    }

    pub fn sweeper(&self, interval: Duration) -> SweeperLoop<S, C> {
        SweeperLoop::new(self.lifecycle.clone(), interval)
    }
}
