use std::time::Instant;

use crate::market::Marketplace;
use crate::model::{Cart, CatalogItem};
use crate::remote::ServerMessage;

use super::error::{CartError, MutationOp};
use super::notify::{NotificationKind, NotificationQueue};
use super::{MSG_ADD_FAILED, MSG_ADD_OK, MSG_ITEM_UNAVAILABLE, MSG_REPLACE_FAILED, MSG_REPLACE_OK};

/// An add suspended by a vendor conflict, waiting for the user's decision.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingReplacement {
    pub item: CatalogItem,
}

/// Sole writer of the cart. The local cart only ever changes to a value the
/// backend returned; nothing is applied ahead of a response, which also
/// makes overlapping adds harmless: the last response wins.
#[derive(Debug, Default)]
pub struct CartCoordinator {
    cart: Cart,
    pending: Option<PendingReplacement>,
}

impl CartCoordinator {
    pub fn new(cart: Cart) -> Self {
        Self {
            cart,
            pending: None,
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn pending(&self) -> Option<&PendingReplacement> {
        self.pending.as_ref()
    }

    /// Adopts a cart read from the backend outside of a mutation.
    pub fn reset(&mut self, cart: Cart) {
        self.adopt(cart);
    }

    pub fn add_item<M: Marketplace + ?Sized>(
        &mut self,
        market: &M,
        item: &CatalogItem,
        quantity: u32,
        notices: &mut NotificationQueue,
        now: Instant,
    ) -> Result<(), CartError> {
        if !item.is_available {
            notices.show(MSG_ITEM_UNAVAILABLE, NotificationKind::Error, now);
            return Err(CartError::ItemUnavailable {
                item: item.id.clone(),
            });
        }

        if let Some(cart_vendor) = self.cart.vendor()
            && !cart_vendor.is_empty()
            && cart_vendor != item.vendor
        {
            let err = CartError::VendorConflict {
                cart_vendor: cart_vendor.to_string(),
                item_vendor: item.vendor.clone(),
                pending: item.id.clone(),
            };
            tracing::info!(item = %item.id, "add suspended: {}", err);
            self.pending = Some(PendingReplacement { item: item.clone() });
            return Err(err);
        }

        match market.add_to_cart(&item.id, quantity) {
            Ok(cart) => {
                tracing::info!(item = %item.id, quantity, "added to cart");
                self.adopt(cart);
                notices.show(MSG_ADD_OK, NotificationKind::Success, now);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(item = %item.id, "add to cart failed: {:#}", err);
                let message = mutation_message(&err, MSG_ADD_FAILED);
                notices.show(message.clone(), NotificationKind::Error, now);
                Err(CartError::RemoteMutation {
                    op: MutationOp::Add,
                    message,
                })
            }
        }
    }

    /// Settles the pending replacement. Accepting clears the remote cart and
    /// then adds the pending item with quantity 1. If the clear goes through
    /// and the add does not, the cart is left empty and the failure is
    /// reported as `ReplaceAdd`.
    pub fn resolve_replacement<M: Marketplace + ?Sized>(
        &mut self,
        market: &M,
        accept: bool,
        notices: &mut NotificationQueue,
        now: Instant,
    ) -> Result<(), CartError> {
        let Some(PendingReplacement { item }) = self.pending.take() else {
            return Err(CartError::NoPendingReplacement);
        };
        if !accept {
            tracing::info!(item = %item.id, "cart replacement declined");
            return Ok(());
        }

        if let Err(err) = market.clear_cart() {
            tracing::warn!("clear cart failed: {:#}", err);
            notices.show(MSG_REPLACE_FAILED, NotificationKind::Error, now);
            return Err(CartError::RemoteMutation {
                op: MutationOp::Clear,
                message: mutation_message(&err, MSG_REPLACE_FAILED),
            });
        }
        self.adopt(Cart::default());

        match market.add_to_cart(&item.id, 1) {
            Ok(cart) => {
                tracing::info!(item = %item.id, "cart replaced");
                self.adopt(cart);
                notices.show(MSG_REPLACE_OK, NotificationKind::Success, now);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(item = %item.id, "add after clearing cart failed: {:#}", err);
                notices.show(MSG_REPLACE_FAILED, NotificationKind::Error, now);
                Err(CartError::RemoteMutation {
                    op: MutationOp::ReplaceAdd,
                    message: mutation_message(&err, MSG_REPLACE_FAILED),
                })
            }
        }
    }

    fn adopt(&mut self, cart: Cart) {
        if !cart.is_single_vendor() {
            tracing::warn!(
                vendor = cart.vendor().unwrap_or_default(),
                lines = cart.lines.len(),
                "backend returned a cart spanning several vendors"
            );
        }
        self.cart = cart;
    }
}

fn mutation_message(err: &anyhow::Error, fallback: &str) -> String {
    err.downcast_ref::<ServerMessage>()
        .map(|m| m.0.clone())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
#[path = "../tests/engine/cart_tests.rs"]
mod tests;
