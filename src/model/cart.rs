use serde::{Deserialize, Serialize};

use super::ids::ItemId;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub item_id: ItemId,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    /// Denormalized from the item when it was added.
    pub vendor: String,
}

/// The cart exactly as the backend last reported it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub lines: Vec<CartLine>,
}

impl Cart {
    pub fn new(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The vendor of line 0. Every other line must match it.
    pub fn vendor(&self) -> Option<&str> {
        self.lines.first().map(|l| l.vendor.as_str())
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn is_single_vendor(&self) -> bool {
        match self.vendor() {
            None => true,
            Some(v) => self.lines.iter().all(|l| l.vendor == v),
        }
    }

    pub fn line(&self, item_id: &ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.item_id == item_id)
    }

    pub fn total(&self) -> f64 {
        self.lines
            .iter()
            .map(|l| l.price * f64::from(l.quantity))
            .sum()
    }
}
