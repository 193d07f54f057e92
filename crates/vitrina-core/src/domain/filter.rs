//! Public catalog filter.

use serde::{Deserialize, Serialize};

use super::listing::{BusinessType, Listing};

/// Criteria for the public listing page and the admin list.
///
/// Unset fields match everything. Empty strings count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingFilter {
    pub business_type: Option<BusinessType>,
    pub property_type: Option<String>,
    /// Case-insensitive substring of the municipality name.
    pub municipality: Option<String>,
    /// Only listings carrying the manual `featured` flag.
    #[serde(default)]
    pub featured_only: bool,
}

impl ListingFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn business_type(mut self, raw: &str) -> Self {
        self.business_type = non_blank(raw).map(BusinessType::parse);
        self
    }

    pub fn property_type(mut self, raw: &str) -> Self {
        self.property_type = non_blank(raw).map(str::to_string);
        self
    }

    pub fn municipality(mut self, raw: &str) -> Self {
        self.municipality = non_blank(raw).map(str::to_lowercase);
        self
    }

    pub fn featured_only(mut self, featured_only: bool) -> Self {
        self.featured_only = featured_only;
        self
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(kind) = &self.business_type
            && listing.business_type != *kind
        {
            return false;
        }
        if let Some(property_type) = &self.property_type
            && listing.property_type != *property_type
        {
            return false;
        }
        if let Some(needle) = &self.municipality
            && !listing
                .municipality
                .to_lowercase()
                .contains(&needle.to_lowercase())
        {
            return false;
        }
        !self.featured_only || listing.featured
    }
}

fn non_blank(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::listing::fixtures::listing;
    use chrono::Utc;

    #[test]
    fn empty_filter_matches_everything() {
        let l = listing("Casa", Utc::now());
        assert!(ListingFilter::new().matches(&l));
        assert!(ListingFilter::new().business_type("").municipality("  ").matches(&l));
    }

    #[test]
    fn municipality_is_case_insensitive_substring() {
        let l = listing("Casa", Utc::now());
        assert!(ListingFilter::new().municipality("envi").matches(&l));
        assert!(ListingFilter::new().municipality("GADO").matches(&l));
        assert!(!ListingFilter::new().municipality("Itagui").matches(&l));
    }

    #[test]
    fn business_and_property_type_match_exactly() {
        let l = listing("Casa", Utc::now());
        assert!(ListingFilter::new().business_type("venta").matches(&l));
        assert!(!ListingFilter::new().business_type("Rent").matches(&l));
        assert!(ListingFilter::new().property_type("House").matches(&l));
        assert!(!ListingFilter::new().property_type("Apartment").matches(&l));
    }

    #[test]
    fn featured_only_uses_manual_flag() {
        let mut l = listing("Casa", Utc::now());
        let filter = ListingFilter::new().featured_only(true);
        assert!(!filter.matches(&l));

        l.featured = true;
        assert!(filter.matches(&l));
    }
}
