use anyhow::{Context, Result};

use crate::model::{Cart, CartLine, CatalogItem, ItemId, Profile, RemoteConfig, Vendor, round_rating};

mod http_client;
pub use self::http_client::ServerMessage;

mod types;
use self::types::*;
mod cart;
mod catalog;
mod identity;

/// Blocking HTTP client for the marketplace backend.
#[derive(Clone)]
pub struct RemoteClient {
    remote: RemoteConfig,
    token: String,
    client: reqwest::blocking::Client,
}

impl RemoteClient {
    pub fn new(remote: RemoteConfig, token: String) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("courtcart")
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            remote,
            token,
            client,
        })
    }

    pub fn remote(&self) -> &RemoteConfig {
        &self.remote
    }
}

impl crate::market::Marketplace for RemoteClient {
    fn list_vendors(&self) -> Result<Vec<Vendor>> {
        RemoteClient::list_vendors(self)
    }

    fn list_items(&self) -> Result<Vec<CatalogItem>> {
        RemoteClient::list_items(self)
    }

    fn get_cart(&self) -> Result<Cart> {
        RemoteClient::get_cart(self)
    }

    fn add_to_cart(&self, item: &ItemId, quantity: u32) -> Result<Cart> {
        RemoteClient::add_to_cart(self, item, quantity)
    }

    fn clear_cart(&self) -> Result<()> {
        RemoteClient::clear_cart(self)
    }

    fn profile(&self) -> Result<Profile> {
        RemoteClient::profile(self)
    }
}
