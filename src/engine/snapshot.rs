use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::model::{CatalogItem, ItemId, Vendor};

/// Vendors and items from one poll cycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogSnapshot {
    /// 0 for the empty snapshot present before the first successful cycle.
    pub generation: u64,
    pub vendors: Vec<Vendor>,
    pub items: Vec<CatalogItem>,
}

impl CatalogSnapshot {
    pub fn vendor(&self, name: &str) -> Option<&Vendor> {
        self.vendors.iter().find(|v| v.name == name)
    }

    pub fn item(&self, id: &ItemId) -> Option<&CatalogItem> {
        self.items.iter().find(|i| &i.id == id)
    }
}

/// The last fetched catalog. `replace` swaps the whole pair at once, so a
/// reader holding an `Arc` from `load` never sees vendors from one cycle
/// next to items from another.
#[derive(Debug)]
pub struct SnapshotStore {
    snap: ArcSwap<CatalogSnapshot>,
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self {
            snap: ArcSwap::from_pointee(CatalogSnapshot::default()),
        }
    }
}

impl SnapshotStore {
    pub fn load(&self) -> Arc<CatalogSnapshot> {
        self.snap.load_full()
    }

    pub fn replace(&self, vendors: Vec<Vendor>, items: Vec<CatalogItem>) -> Arc<CatalogSnapshot> {
        let generation = self.snap.load().generation + 1;
        let next = Arc::new(CatalogSnapshot {
            generation,
            vendors,
            items,
        });
        self.snap.store(next.clone());
        tracing::debug!(
            generation,
            vendors = next.vendors.len(),
            items = next.items.len(),
            "catalog snapshot replaced"
        );
        next
    }

    pub fn generation(&self) -> u64 {
        self.snap.load().generation
    }
}

#[cfg(test)]
#[path = "../tests/engine/snapshot_tests.rs"]
mod tests;
