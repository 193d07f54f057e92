//! PlanLifecycle - プランの付与・失効・並び順
//!
//! # 操作
//! - activate_plan: プランを付与（期限 = now + tier の日数）
//! - deactivate_plan: プランを無条件にクリア（冪等）
//! - sweep_expired_plans: 期限切れプランを一括クリア（冪等・単調）
//! - rank_for_listing: 公開一覧を tier 順に並べる
//! - select_featured_for_home: ホームに出す Featured を最大 N 件選ぶ
//!
//! 失効は保存されたフラグではなく `(plan_expires_at, now)` から導出される述語です。

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use crate::domain::{Listing, LifecycleError, ListingFilter, ListingId, PlanTier};
use crate::ports::{Clock, ListingStore};

/// Result of an activation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    Activated {
        tier: PlanTier,
        expires_at: DateTime<Utc>,
    },
    /// No tier was supplied; nothing was written.
    Skipped,
}

/// Plan lifecycle engine. Touches only the plan fields of a listing.
pub struct PlanLifecycle<S, C> {
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> Clone for PlanLifecycle<S, C> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S: ListingStore, C: Clock> PlanLifecycle<S, C> {
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    async fn load(&self, id: ListingId) -> Result<Listing, LifecycleError> {
        self.store
            .get(id)
            .await?
            .ok_or(LifecycleError::NotFound(id))
    }

    /// Grant `tier` to a listing, starting now.
    ///
    /// A blank or missing tier is a no-op. Unrecognized tier names are
    /// accepted and get the fallback duration.
    #[instrument(skip(self), fields(listing = %id))]
    pub async fn activate_plan(
        &self,
        id: ListingId,
        tier: Option<&str>,
    ) -> Result<Activation, LifecycleError> {
        let mut listing = self.load(id).await?;

        let Some(tier) = tier.and_then(PlanTier::parse) else {
            debug!("no tier supplied, activation skipped");
            return Ok(Activation::Skipped);
        };

        let expires_at = listing.activate_plan(tier.clone(), self.clock.now());
        if !self.store.update(listing).await? {
            return Err(LifecycleError::NotFound(id));
        }
        info!(%tier, %expires_at, "plan activated");
        Ok(Activation::Activated { tier, expires_at })
    }

    /// Clear the plan fields regardless of their current state.
    #[instrument(skip(self), fields(listing = %id))]
    pub async fn deactivate_plan(&self, id: ListingId) -> Result<(), LifecycleError> {
        let mut listing = self.load(id).await?;
        listing.clear_plan();
        if !self.store.update(listing).await? {
            return Err(LifecycleError::NotFound(id));
        }
        info!("plan deactivated");
        Ok(())
    }

    /// Clear every active plan whose expiry is strictly before `now`.
    ///
    /// Active listings with no expiry are never touched. Returns how many
    /// listings changed; all changes are committed in one batch.
    #[instrument(skip(self))]
    pub async fn sweep_expired_plans(&self, now: DateTime<Utc>) -> Result<usize, LifecycleError> {
        let candidates = self
            .store
            .query(&|l: &Listing| l.plan_active && l.plan_expires_at.is_some())
            .await?;

        let expired: Vec<Listing> = candidates
            .into_iter()
            .filter(|l| l.plan_expired(now))
            .map(|mut l| {
                l.clear_plan();
                l
            })
            .collect();

        if expired.is_empty() {
            debug!("no expired plans");
            return Ok(0);
        }

        let changed = self.store.update_many(expired).await?;
        info!(expired = changed, "expired plans swept");
        Ok(changed)
    }

    pub async fn sweep_expired_plans_now(&self) -> Result<usize, LifecycleError> {
        self.sweep_expired_plans(self.clock.now()).await
    }

    /// Filtered public listing, Featured first, then Premium, then the rest.
    ///
    /// The sort is stable, so ties keep store order.
    #[instrument(skip(self))]
    pub async fn rank_for_listing(
        &self,
        filter: &ListingFilter,
    ) -> Result<Vec<Listing>, LifecycleError> {
        let mut listings = self.store.query(&|l: &Listing| filter.matches(l)).await?;
        listings.sort_by_key(Listing::plan_rank);
        debug!(count = listings.len(), "ranked listings");
        Ok(listings)
    }

    /// Up to `limit` listings with an open Featured plan at `now`.
    pub async fn select_featured_for_home(
        &self,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Listing>, LifecycleError> {
        let mut featured = self
            .store
            .query(&|l: &Listing| l.is_home_featured(now))
            .await?;
        featured.truncate(limit);
        Ok(featured)
    }
}
