//! Vendor and item listings. Both are public reads; the token is sent anyway.

use super::*;

impl RemoteClient {
    pub fn list_vendors(&self) -> Result<Vec<Vendor>> {
        let resp = self
            .client
            .get(self.url("/api/restaurant/restaurants"))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .send()
            .context("list vendors")?;
        let out: VendorsResponse = self
            .ensure_ok(resp, "list vendors")?
            .json()
            .context("parse vendors")?;
        if !out.success {
            anyhow::bail!("failed to fetch food courts");
        }
        Ok(out.restaurants.into_iter().map(Vendor::from).collect())
    }

    pub fn list_items(&self) -> Result<Vec<CatalogItem>> {
        let resp = self
            .client
            .get(self.url("/api/restaurant/all-food-items"))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .send()
            .context("list items")?;
        let out: ItemsResponse = self
            .ensure_ok(resp, "list items")?
            .json()
            .context("parse items")?;
        if !out.success {
            anyhow::bail!("failed to fetch food items");
        }
        Ok(out.food_items.into_iter().map(CatalogItem::from).collect())
    }
}
