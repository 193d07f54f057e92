//! Admin dashboard counters.

use serde::{Deserialize, Serialize};

use super::listing::{BusinessType, Listing};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardCounts {
    pub total: usize,
    pub for_sale: usize,
    pub for_rent: usize,
}

impl DashboardCounts {
    pub fn tally<'a>(listings: impl IntoIterator<Item = &'a Listing>) -> Self {
        let mut counts = DashboardCounts::default();
        for listing in listings {
            counts.total += 1;
            match listing.business_type {
                BusinessType::Sale => counts.for_sale += 1,
                BusinessType::Rent => counts.for_rent += 1,
                BusinessType::Other(_) => {}
            }
        }
        counts
    }
}
