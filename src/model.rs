mod cart;
mod catalog;
mod config;
mod ids;

pub use self::cart::{Cart, CartLine};
pub use self::catalog::{CatalogItem, Profile, Vendor, round_rating};
pub use self::config::{BrowseConfig, ClientConfig, ClientState, DEFAULT_BASE_URL, RemoteConfig};
pub use self::ids::ItemId;
