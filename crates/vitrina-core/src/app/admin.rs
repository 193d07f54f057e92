//! AdminGate - 認証済みセッションにだけ管理操作を開く
//!
//! App::admin(token) が Authenticator で検証したあとにだけ作られます。

use super::builder::App;
use super::catalog::ListingCatalog;
use super::lifecycle::PlanLifecycle;
use crate::ports::{Clock, ListingStore};

pub struct AdminGate<'a, S, C> {
    app: &'a App<S, C>,
}

impl<'a, S: ListingStore, C: Clock> AdminGate<'a, S, C> {
    pub(super) fn new(app: &'a App<S, C>) -> Self {
        Self { app }
    }

    /// Activate / deactivate / sweep.
    pub fn plans(&self) -> &'a PlanLifecycle<S, C> {
        &self.app.lifecycle
    }

    /// Create / edit / delete / toggle featured / dashboard.
    pub fn listings(&self) -> &'a ListingCatalog<S, C> {
        &self.app.catalog
    }
}
