//! Read-only pricing catalog.
//!
//! Lookups never fail: an id with no matching row yields `None`, and callers
//! treat that as a zero-cost contribution.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::models::{Accommodation, Package, Venue};

/// Catalog entity addressable by id.
pub trait CatalogEntry {
    fn id(&self) -> Uuid;
}

impl CatalogEntry for Package {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl CatalogEntry for Accommodation {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl CatalogEntry for Venue {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Find an entry by id in a list of candidates.
pub fn find_by_id<T: CatalogEntry>(entries: &[T], id: Uuid) -> Option<&T> {
    entries.iter().find(|entry| entry.id() == id)
}

/// Snapshot of the reference data the calculator prices against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingCatalog {
    pub packages: Vec<Package>,
    pub accommodations: Vec<Accommodation>,
    pub venues: Vec<Venue>,
}

impl PricingCatalog {
    pub fn new(packages: Vec<Package>, accommodations: Vec<Accommodation>, venues: Vec<Venue>) -> Self {
        Self {
            packages,
            accommodations,
            venues,
        }
    }

    pub fn package(&self, id: Uuid) -> Option<&Package> {
        find_by_id(&self.packages, id)
    }

    pub fn accommodation(&self, id: Uuid) -> Option<&Accommodation> {
        find_by_id(&self.accommodations, id)
    }

    pub fn venue(&self, id: Uuid) -> Option<&Venue> {
        find_by_id(&self.venues, id)
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty() && self.accommodations.is_empty() && self.venues.is_empty()
    }
}
