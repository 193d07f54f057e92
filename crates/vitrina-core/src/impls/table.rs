//! ListingTable - store 実装が共有する同期的なテーブル操作
//!
//! BTreeMap<ListingId, Listing> を ID 順（= 作成順）に保持します。
//! ロックや永続化は各 store 側の責務です。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Listing, ListingId, StoreError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Listing>", into = "Vec<Listing>")]
pub(crate) struct ListingTable {
    rows: BTreeMap<ListingId, Listing>,
}

impl ListingTable {
    pub fn insert(&mut self, listing: Listing) -> Result<(), StoreError> {
        if self.rows.contains_key(&listing.id) {
            return Err(StoreError::Conflict(listing.id));
        }
        self.rows.insert(listing.id, listing);
        Ok(())
    }

    pub fn get(&self, id: ListingId) -> Option<&Listing> {
        self.rows.get(&id)
    }

    pub fn update(&mut self, listing: Listing) -> bool {
        match self.rows.get_mut(&listing.id) {
            Some(row) => {
                *row = listing;
                true
            }
            None => false,
        }
    }

    /// Validate every id before touching any row.
    pub fn update_many(&mut self, listings: Vec<Listing>) -> Result<usize, StoreError> {
        if let Some(missing) = listings.iter().find(|l| !self.rows.contains_key(&l.id)) {
            return Err(StoreError::Missing(missing.id));
        }
        let count = listings.len();
        for listing in listings {
            self.rows.insert(listing.id, listing);
        }
        Ok(count)
    }

    pub fn delete(&mut self, id: ListingId) -> bool {
        self.rows.remove(&id).is_some()
    }

    pub fn select(&self, predicate: impl Fn(&Listing) -> bool) -> Vec<Listing> {
        self.rows
            .values()
            .filter(|listing| predicate(*listing))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

impl From<Vec<Listing>> for ListingTable {
    fn from(listings: Vec<Listing>) -> Self {
        Self {
            rows: listings.into_iter().map(|l| (l.id, l)).collect(),
        }
    }
}

impl From<ListingTable> for Vec<Listing> {
    fn from(table: ListingTable) -> Self {
        table.rows.into_values().collect()
    }
}
