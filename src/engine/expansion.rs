use std::collections::HashMap;

use super::view::ALL_CATEGORIES;

/// Which category sections are expanded, per vendor. Seeded the first time a
/// vendor's categories are seen; later refreshes for the same vendor keep
/// whatever the user toggled.
#[derive(Clone, Debug, Default)]
pub struct CategoryExpansion {
    vendor: Option<String>,
    open: HashMap<String, bool>,
}

impl CategoryExpansion {
    /// Called after every snapshot refresh. Seeds every known category as
    /// expanded only when the vendor differs from the one seeded last.
    /// Categories that show up later for the same vendor start collapsed.
    pub fn sync(&mut self, vendor: &str, categories: &[String]) {
        if self.vendor.as_deref() == Some(vendor) {
            return;
        }
        self.vendor = Some(vendor.to_string());
        self.open.clear();
        self.open.insert(ALL_CATEGORIES.to_string(), false);
        for c in categories {
            self.open.insert(c.clone(), true);
        }
    }

    pub fn vendor(&self) -> Option<&str> {
        self.vendor.as_deref()
    }

    pub fn is_expanded(&self, category: &str) -> bool {
        self.open.get(category).copied().unwrap_or(false)
    }

    /// Flips a category and returns its new state.
    pub fn toggle(&mut self, category: &str) -> bool {
        let e = self.open.entry(category.to_string()).or_insert(false);
        *e = !*e;
        *e
    }

    pub fn reset(&mut self) {
        self.vendor = None;
        self.open.clear();
    }
}

#[cfg(test)]
#[path = "../tests/engine/expansion_tests.rs"]
mod tests;
