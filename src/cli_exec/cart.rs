use std::time::{Duration, Instant};

use courtcart::engine::{CartCoordinator, CartError, NotificationQueue};
use courtcart::model::ItemId;

use super::*;

pub(super) fn handle_cart_command(client: &RemoteClient, json: bool) -> Result<()> {
    let cart = client.get_cart()?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&cart).context("serialize cart json")?
        );
        return Ok(());
    }
    let Some(vendor) = cart.vendor() else {
        println!("Cart is empty");
        return Ok(());
    };
    println!("food court: {}", vendor);
    for line in &cart.lines {
        println!(
            "  {} x{}  {}  {:.2}",
            line.item_id,
            line.quantity,
            line.name,
            line.price * f64::from(line.quantity)
        );
    }
    println!("items: {}  total: {:.2}", cart.item_count(), cart.total());
    Ok(())
}

pub(super) fn handle_add_command(
    client: &RemoteClient,
    item_id: String,
    quantity: u32,
    replace: bool,
) -> Result<()> {
    let id = ItemId::new(item_id);
    let item = client
        .list_items()?
        .into_iter()
        .find(|i| i.id == id)
        .with_context(|| format!("unknown item: {}", id))?;
    let open = client
        .list_vendors()?
        .iter()
        .any(|v| v.name == item.vendor && v.is_open);
    if !open {
        anyhow::bail!("{} is currently closed.", item.vendor);
    }

    let mut coord = CartCoordinator::new(client.get_cart()?);
    // Notices only matter to the interactive UI; the CLI reports results itself.
    let mut notices = NotificationQueue::new(Duration::ZERO);
    let now = Instant::now();

    match coord.add_item(client, &item, quantity, &mut notices, now) {
        Ok(()) => {}
        Err(CartError::VendorConflict {
            cart_vendor,
            item_vendor,
            ..
        }) => {
            if !replace {
                anyhow::bail!(
                    "cart holds items from {}; rerun with --replace to clear it and add from {}",
                    cart_vendor,
                    item_vendor
                );
            }
            coord.resolve_replacement(client, true, &mut notices, now)?;
            println!("Cart updated with new food court items");
        }
        Err(err) => return Err(err.into()),
    }

    let cart = coord.cart();
    println!(
        "Added {} ({}); cart has {} item(s) from {}",
        item.name,
        id,
        cart.item_count(),
        cart.vendor().unwrap_or("-")
    );
    Ok(())
}

pub(super) fn handle_clear_command(client: &RemoteClient) -> Result<()> {
    client.clear_cart()?;
    println!("Cart cleared");
    Ok(())
}
