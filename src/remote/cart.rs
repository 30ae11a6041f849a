//! Cart reads and mutations. Every mutation answers with the full cart.

use super::*;

impl RemoteClient {
    pub fn get_cart(&self) -> Result<Cart> {
        let resp = self
            .client
            .get(self.url("/api/cart"))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .send()
            .context("get cart")?;
        let out: CartResponse = self
            .ensure_ok(resp, "get cart")?
            .json()
            .context("parse cart")?;
        Ok(out.into())
    }

    pub fn add_to_cart(&self, item: &ItemId, quantity: u32) -> Result<Cart> {
        let resp = self
            .client
            .post(self.url("/api/cart/add"))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .json(&AddToCartRequest {
                food_item_id: item.as_str(),
                quantity,
            })
            .send()
            .context("add to cart")?;
        let out: CartResponse = self
            .ensure_mutation_ok(resp, "add to cart")?
            .json()
            .context("parse add to cart response")?;
        Ok(out.into())
    }

    pub fn clear_cart(&self) -> Result<()> {
        let resp = self
            .client
            .delete(self.url("/api/cart/clear"))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .send()
            .context("clear cart")?;
        let _ = self.ensure_mutation_ok(resp, "clear cart")?;
        Ok(())
    }
}
