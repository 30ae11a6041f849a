//! Derived catalog views. Everything here is a pure function of its inputs.

use crate::model::{CatalogItem, ItemId, Vendor};

use super::poller::BrowseContext;
use super::snapshot::CatalogSnapshot;

pub const ALL_CATEGORIES: &str = "All Categories";
pub const POPULAR_LIMIT: usize = 10;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Empty or `ALL_CATEGORIES` selects everything; any other text is taken
    /// as a category name verbatim.
    pub fn parse(s: &str) -> Self {
        if s.is_empty() || s == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(s.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Only(c) => c,
        }
    }

    fn admits(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => c == category,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CategorySection {
    pub category: String,
    pub items: Vec<CatalogItem>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct VendorView {
    /// Concrete categories of the vendor's items, in first-seen order.
    pub categories: Vec<String>,
    /// Non-empty sections only.
    pub sections: Vec<CategorySection>,
}

impl VendorView {
    pub fn item_ids(&self) -> impl Iterator<Item = &ItemId> {
        self.sections
            .iter()
            .flat_map(|s| s.items.iter().map(|i| &i.id))
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct HomeView {
    pub vendors: Vec<Vendor>,
    pub popular: Vec<CatalogItem>,
}

/// Case-insensitive substring match; an empty query matches everything.
/// Whitespace in the query is significant.
pub fn matches_query(name: &str, query: &str) -> bool {
    query.is_empty() || name.to_lowercase().contains(&query.to_lowercase())
}

pub fn vendor_categories<'a>(
    items: impl IntoIterator<Item = &'a CatalogItem>,
    vendor: &str,
) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in items.into_iter().filter(|i| i.vendor == vendor) {
        if !out.contains(&item.category) {
            out.push(item.category.clone());
        }
    }
    out
}

/// Items of one vendor, narrowed by query then category, grouped by
/// category in first-seen order. Availability is not filtered here.
pub fn vendor_view(
    snapshot: &CatalogSnapshot,
    vendor: &str,
    query: &str,
    category: &CategoryFilter,
) -> VendorView {
    let categories = vendor_categories(&snapshot.items, vendor);
    let visible: Vec<&CatalogItem> = snapshot
        .items
        .iter()
        .filter(|i| i.vendor == vendor)
        .filter(|i| matches_query(&i.name, query))
        .filter(|i| category.admits(&i.category))
        .collect();

    let sections = categories
        .iter()
        .filter(|c| category.admits(c))
        .filter_map(|c| {
            let items: Vec<CatalogItem> = visible
                .iter()
                .filter(|i| &i.category == c)
                .map(|i| (*i).clone())
                .collect();
            (!items.is_empty()).then(|| CategorySection {
                category: c.clone(),
                items,
            })
        })
        .collect();

    VendorView {
        categories,
        sections,
    }
}

/// Without a query: available items by rating, best first, ties in catalog
/// order, capped at `POPULAR_LIMIT`. With a query: every item whose name
/// matches, available or not, so a search can still find (and warn about)
/// an unavailable dish.
pub fn popular_items(items: &[CatalogItem], query: &str) -> Vec<CatalogItem> {
    if !query.is_empty() {
        return items
            .iter()
            .filter(|i| matches_query(&i.name, query))
            .cloned()
            .collect();
    }
    let mut out: Vec<CatalogItem> = items.iter().filter(|i| i.is_available).cloned().collect();
    out.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    out.truncate(POPULAR_LIMIT);
    out
}

/// Vendors whose name matches, or that sell an item whose name matches.
pub fn matching_vendors(snapshot: &CatalogSnapshot, query: &str) -> Vec<Vendor> {
    if query.is_empty() {
        return snapshot.vendors.clone();
    }
    snapshot
        .vendors
        .iter()
        .filter(|v| {
            matches_query(&v.name, query)
                || snapshot
                    .items
                    .iter()
                    .any(|i| i.vendor == v.name && matches_query(&i.name, query))
        })
        .cloned()
        .collect()
}

pub fn home_view(snapshot: &CatalogSnapshot, query: &str) -> HomeView {
    HomeView {
        vendors: matching_vendors(snapshot, query),
        popular: popular_items(&snapshot.items, query),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CatalogView {
    Home(HomeView),
    Vendor(VendorView),
}

pub fn build(
    snapshot: &CatalogSnapshot,
    context: &BrowseContext,
    query: &str,
    category: &CategoryFilter,
) -> CatalogView {
    match context.vendor() {
        Some(vendor) => CatalogView::Vendor(vendor_view(snapshot, vendor, query, category)),
        None => CatalogView::Home(home_view(snapshot, query)),
    }
}

#[cfg(test)]
#[path = "../tests/engine/view_tests.rs"]
mod tests;
