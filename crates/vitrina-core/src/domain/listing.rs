//! Listing record: descriptive payload + plan fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ListingId;
use super::plan::{self, PlanTier};

/// Payment status every new listing starts with. Nothing enforces it.
pub const DEFAULT_PAYMENT_STATUS: &str = "Pending";

/// Kind of deal a listing is offered for.
///
/// Parsed case-insensitively; the Spanish names
/// `Venta` and `Arriendo` map onto the same variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BusinessType {
    Sale,
    Rent,
    Other(String),
}

impl BusinessType {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_lowercase().as_str() {
            "sale" | "venta" => BusinessType::Sale,
            "rent" | "arriendo" => BusinessType::Rent,
            _ => BusinessType::Other(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BusinessType::Sale => "Sale",
            BusinessType::Rent => "Rent",
            BusinessType::Other(name) => name,
        }
    }
}

impl fmt::Display for BusinessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for BusinessType {
    fn from(raw: String) -> Self {
        BusinessType::parse(&raw)
    }
}

impl From<BusinessType> for String {
    fn from(kind: BusinessType) -> Self {
        kind.as_str().to_string()
    }
}

/// Descriptive fields supplied when a listing is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewListing {
    pub title: String,
    pub business_type: BusinessType,
    pub description: String,
    pub property_type: String,
    pub municipality: String,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub bathrooms: Option<u32>,
    #[serde(default)]
    pub parking: bool,
    pub price: f64,
    #[serde(default)]
    pub image_urls: Vec<String>,
}

/// Replacement values for an admin edit.
///
/// Carries the descriptive fields plus the manual `featured` flag. Plan
/// fields are absent: edits never touch the plan lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingEdit {
    pub title: String,
    pub business_type: BusinessType,
    pub description: String,
    pub property_type: String,
    pub municipality: String,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub parking: bool,
    pub price: f64,
    pub image_urls: Vec<String>,
    pub featured: bool,
}

/// A property in the catalog.
///
/// Invariant restored by every plan transition:
/// `plan_active` implies `plan` and `plan_expires_at` are both set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,

    pub title: String,
    pub business_type: BusinessType,
    pub description: String,
    pub property_type: String,
    pub municipality: String,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub parking: bool,
    pub price: f64,
    pub image_urls: Vec<String>,

    pub plan: Option<PlanTier>,
    pub plan_active: bool,
    pub plan_expires_at: Option<DateTime<Utc>>,
    pub payment_status: String,

    /// Kept for data-shape parity; nothing reads it.
    pub priority: i32,

    /// Manual admin flag, independent of plans.
    pub featured: bool,

    pub created_at: DateTime<Utc>,
}

impl Listing {
    /// Create a listing with the default plan state (Basic, inactive).
    pub fn new(id: ListingId, new: NewListing, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new.title,
            business_type: new.business_type,
            description: new.description,
            property_type: new.property_type,
            municipality: new.municipality,
            bedrooms: new.bedrooms,
            bathrooms: new.bathrooms,
            parking: new.parking,
            price: new.price,
            image_urls: new.image_urls,
            plan: Some(PlanTier::Basic),
            plan_active: false,
            plan_expires_at: None,
            payment_status: DEFAULT_PAYMENT_STATUS.to_string(),
            priority: 0,
            featured: false,
            created_at,
        }
    }

    /// Grant `tier` starting at `now`. Returns the new expiry.
    ///
    /// Any previous plan is overwritten.
    pub fn activate_plan(&mut self, tier: PlanTier, now: DateTime<Utc>) -> DateTime<Utc> {
        let expires_at = now + tier.duration();
        self.plan = Some(tier);
        self.plan_active = true;
        self.plan_expires_at = Some(expires_at);
        expires_at
    }

    /// Reset all three plan fields to their empty state.
    pub fn clear_plan(&mut self) {
        self.plan = None;
        self.plan_active = false;
        self.plan_expires_at = None;
    }

    /// Active plan whose window has elapsed at `now`.
    ///
    /// An active listing without an expiry never counts as expired.
    pub fn plan_expired(&self, now: DateTime<Utc>) -> bool {
        self.plan_active
            && self
                .plan_expires_at
                .is_some_and(|expires_at| plan::is_expired(expires_at, now))
    }

    /// Eligible for the home page: active Featured plan still open at `now`.
    pub fn is_home_featured(&self, now: DateTime<Utc>) -> bool {
        self.plan_active
            && self.plan == Some(PlanTier::Featured)
            && self.plan_expires_at.is_some_and(|expires_at| expires_at > now)
    }

    /// Sort weight for public listings. Only an active plan boosts.
    pub fn plan_rank(&self) -> u8 {
        if !self.plan_active {
            return plan::UNBOOSTED_RANK;
        }
        plan::rank_of(self.plan.as_ref())
    }

    pub fn apply_edit(&mut self, edit: ListingEdit) {
        self.title = edit.title;
        self.business_type = edit.business_type;
        self.description = edit.description;
        self.property_type = edit.property_type;
        self.municipality = edit.municipality;
        self.bedrooms = edit.bedrooms;
        self.bathrooms = edit.bathrooms;
        self.parking = edit.parking;
        self.price = edit.price;
        self.image_urls = edit.image_urls;
        self.featured = edit.featured;
    }
}

/// Split a comma separated image field into trimmed, non-empty URLs.
pub fn parse_image_urls(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use ulid::Ulid;

    pub fn new_listing(title: &str) -> NewListing {
        NewListing {
            title: title.to_string(),
            business_type: BusinessType::Sale,
            description: "Two floors, garden".to_string(),
            property_type: "House".to_string(),
            municipality: "Envigado".to_string(),
            bedrooms: Some(3),
            bathrooms: Some(2),
            parking: true,
            price: 450_000_000.0,
            image_urls: vec![],
        }
    }

    pub fn listing(title: &str, created_at: DateTime<Utc>) -> Listing {
        let id = ListingId::from_ulid(Ulid::new());
        Listing::new(id, new_listing(title), created_at)
    }
}
