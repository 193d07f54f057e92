//! Domain model (ids, listing, plan tiers, filter, errors).

pub mod dashboard;
pub mod errors;
pub mod filter;
pub mod ids;
pub mod listing;
pub mod plan;

pub use dashboard::DashboardCounts;
pub use errors::{AuthError, LifecycleError, StoreError};
pub use filter::ListingFilter;
pub use ids::{IdParseError, ListingId, SessionToken};
pub use listing::{
    BusinessType, DEFAULT_PAYMENT_STATUS, Listing, ListingEdit, NewListing, parse_image_urls,
};
pub use plan::{HOME_FEATURED_LIMIT, PlanTier};
