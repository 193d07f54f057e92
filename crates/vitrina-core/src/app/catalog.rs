//! ListingCatalog - Listing の作成・編集・削除・一覧
//!
//! プラン関連フィールドには触れません（それは PlanLifecycle の責務）。

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::domain::{
    DashboardCounts, LifecycleError, Listing, ListingEdit, ListingFilter, ListingId, NewListing,
};
use crate::ports::{Clock, IdGenerator, ListingStore, UlidGenerator};

pub struct ListingCatalog<S, C> {
    store: Arc<S>,
    clock: Arc<C>,
    ids: UlidGenerator<Arc<C>>,
}

impl<S: ListingStore, C: Clock> ListingCatalog<S, C> {
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        let ids = UlidGenerator::new(Arc::clone(&clock));
        Self { store, clock, ids }
    }

    /// Create a listing with the default plan state.
    #[instrument(skip_all, fields(title = %new.title))]
    pub async fn create(&self, new: NewListing) -> Result<Listing, LifecycleError> {
        let listing = Listing::new(self.ids.generate_listing_id(), new, self.clock.now());
        self.store.insert(listing.clone()).await?;
        info!(listing = %listing.id, "listing created");
        Ok(listing)
    }

    pub async fn get(&self, id: ListingId) -> Result<Listing, LifecycleError> {
        self.store
            .get(id)
            .await?
            .ok_or(LifecycleError::NotFound(id))
    }

    #[instrument(skip(self, edit), fields(listing = %id))]
    pub async fn edit(&self, id: ListingId, edit: ListingEdit) -> Result<Listing, LifecycleError> {
        let mut listing = self.get(id).await?;
        listing.apply_edit(edit);
        if !self.store.update(listing.clone()).await? {
            return Err(LifecycleError::NotFound(id));
        }
        info!("listing edited");
        Ok(listing)
    }

    #[instrument(skip(self), fields(listing = %id))]
    pub async fn delete(&self, id: ListingId) -> Result<(), LifecycleError> {
        if !self.store.delete(id).await? {
            return Err(LifecycleError::NotFound(id));
        }
        info!("listing deleted");
        Ok(())
    }

    /// Flip the manual featured flag and return its new value.
    #[instrument(skip(self), fields(listing = %id))]
    pub async fn toggle_featured(&self, id: ListingId) -> Result<bool, LifecycleError> {
        let mut listing = self.get(id).await?;
        listing.featured = !listing.featured;
        let featured = listing.featured;
        if !self.store.update(listing).await? {
            return Err(LifecycleError::NotFound(id));
        }
        info!(featured, "featured flag toggled");
        Ok(featured)
    }

    /// Admin list, newest first, optionally only manually featured listings.
    pub async fn admin_list(&self, featured_only: bool) -> Result<Vec<Listing>, LifecycleError> {
        let filter = ListingFilter::new().featured_only(featured_only);
        let mut listings = self.store.query(&|l: &Listing| filter.matches(l)).await?;
        listings.reverse();
        debug!(count = listings.len(), featured_only, "admin list");
        Ok(listings)
    }

    pub async fn dashboard(&self) -> Result<DashboardCounts, LifecycleError> {
        let listings = self.store.all().await?;
        Ok(DashboardCounts::tally(&listings))
    }
}
