//! The backend as the engine sees it.

use anyhow::Result;

use crate::model::{Cart, CatalogItem, ItemId, Profile, Vendor};

/// Remote catalog and cart operations. Every cart mutation returns the
/// cart as the backend now holds it; callers replace their copy with it.
pub trait Marketplace {
    fn list_vendors(&self) -> Result<Vec<Vendor>>;
    fn list_items(&self) -> Result<Vec<CatalogItem>>;
    fn get_cart(&self) -> Result<Cart>;
    fn add_to_cart(&self, item: &ItemId, quantity: u32) -> Result<Cart>;
    fn clear_cart(&self) -> Result<()>;
    fn profile(&self) -> Result<Profile>;
}

impl<M: Marketplace + ?Sized> Marketplace for std::sync::Arc<M> {
    fn list_vendors(&self) -> Result<Vec<Vendor>> {
        (**self).list_vendors()
    }

    fn list_items(&self) -> Result<Vec<CatalogItem>> {
        (**self).list_items()
    }

    fn get_cart(&self) -> Result<Cart> {
        (**self).get_cart()
    }

    fn add_to_cart(&self, item: &ItemId, quantity: u32) -> Result<Cart> {
        (**self).add_to_cart(item, quantity)
    }

    fn clear_cart(&self) -> Result<()> {
        (**self).clear_cart()
    }

    fn profile(&self) -> Result<Profile> {
        (**self).profile()
    }
}
