//! Wire shapes for the marketplace backend.

use super::*;

#[derive(Debug, serde::Deserialize)]
pub(super) struct VendorsResponse {
    pub(super) success: bool,
    #[serde(default)]
    pub(super) restaurants: Vec<VendorDto>,
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct VendorDto {
    pub(super) restaurantname: String,
    #[serde(default)]
    pub(super) address: String,
    #[serde(default)]
    pub(super) image: String,
    #[serde(default)]
    pub(super) availability: bool,
    #[serde(default)]
    pub(super) rating: Option<f64>,
}

impl From<VendorDto> for Vendor {
    fn from(v: VendorDto) -> Self {
        Vendor {
            name: v.restaurantname,
            address: v.address,
            image: v.image,
            rating: round_rating(v.rating),
            is_open: v.availability,
        }
    }
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct ItemsResponse {
    pub(super) success: bool,
    #[serde(default, rename = "foodItems")]
    pub(super) food_items: Vec<ItemDto>,
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct VendorRef {
    #[serde(default)]
    pub(super) restaurantname: String,
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct ItemDto {
    #[serde(rename = "_id")]
    pub(super) id: String,
    pub(super) dishname: String,
    #[serde(default)]
    pub(super) dishphoto: String,
    #[serde(default)]
    pub(super) restaurantid: Option<VendorRef>,
    #[serde(default)]
    pub(super) category: String,
    #[serde(default, rename = "dineinPrice")]
    pub(super) dinein_price: f64,
    #[serde(default)]
    pub(super) description: String,
    #[serde(default)]
    pub(super) availability: bool,
    #[serde(default)]
    pub(super) rating: Option<f64>,
}

impl From<ItemDto> for CatalogItem {
    fn from(i: ItemDto) -> Self {
        CatalogItem {
            id: ItemId(i.id),
            name: i.dishname,
            image: i.dishphoto,
            vendor: i.restaurantid.map(|r| r.restaurantname).unwrap_or_default(),
            category: i.category,
            price: i.dinein_price,
            description: i.description,
            is_available: i.availability,
            rating: round_rating(i.rating),
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub(super) struct AddToCartRequest<'a> {
    #[serde(rename = "foodItemId")]
    pub(super) food_item_id: &'a str,
    pub(super) quantity: u32,
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct CartResponse {
    #[serde(default)]
    pub(super) items: Vec<CartLineDto>,
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct CartLineDto {
    #[serde(rename = "foodItemId")]
    pub(super) food_item_id: String,
    #[serde(default)]
    pub(super) name: String,
    #[serde(default)]
    pub(super) price: f64,
    pub(super) quantity: u32,
    #[serde(default)]
    pub(super) restaurant: String,
}

impl From<CartResponse> for Cart {
    fn from(resp: CartResponse) -> Self {
        Cart::new(
            resp.items
                .into_iter()
                .map(|l| CartLine {
                    item_id: ItemId(l.food_item_id),
                    name: l.name,
                    price: l.price,
                    quantity: l.quantity,
                    vendor: l.restaurant,
                })
                .collect(),
        )
    }
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct ProfileResponse {
    pub(super) name: String,
}
