use serde::{Deserialize, Serialize};

use super::ids::ItemId;

/// A food court. `name` is the only identity the backend guarantees and is
/// what items and cart lines refer to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub name: String,
    pub address: String,
    pub image: String,
    /// 0.0 to 5.0, one decimal.
    pub rating: f64,
    pub is_open: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
    pub image: String,
    /// Owning vendor's name.
    pub vendor: String,
    pub category: String,
    pub price: f64,
    pub description: String,
    pub is_available: bool,
    pub rating: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
}

/// Rounds to one decimal; missing or non-finite ratings read as 0.
pub fn round_rating(raw: Option<f64>) -> f64 {
    match raw {
        Some(r) if r.is_finite() => (r * 10.0).round() / 10.0,
        _ => 0.0,
    }
}
