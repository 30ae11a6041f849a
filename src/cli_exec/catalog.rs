use courtcart::engine::{
    CategoryFilter, SnapshotStore, matches_query, matching_vendors, popular_items, vendor_view,
};
use courtcart::model::CatalogItem;

use super::*;

pub(super) fn handle_vendors_command(
    client: &RemoteClient,
    query: Option<String>,
    json: bool,
) -> Result<()> {
    let snap = SnapshotStore::default().replace(client.list_vendors()?, client.list_items()?);
    let vendors = matching_vendors(&snap, query.as_deref().unwrap_or(""));

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&vendors).context("serialize vendors json")?
        );
        return Ok(());
    }
    if vendors.is_empty() {
        println!("No food courts match");
    }
    for v in vendors {
        let state = if v.is_open { "open" } else { "closed" };
        println!("{:<28} {:<6} {:.1}  {}", v.name, state, v.rating, v.address);
    }
    Ok(())
}

pub(super) fn handle_items_command(
    client: &RemoteClient,
    vendor: Option<String>,
    query: Option<String>,
    category: Option<String>,
    json: bool,
) -> Result<()> {
    let query = query.unwrap_or_default();
    let filter = CategoryFilter::parse(category.as_deref().unwrap_or(""));

    let items: Vec<CatalogItem> = match vendor.as_deref() {
        Some(name) => {
            let snap = SnapshotStore::default().replace(client.list_vendors()?, client.list_items()?);
            if snap.vendor(name).is_none() {
                anyhow::bail!("unknown food court: {}", name);
            }
            let view = vendor_view(&snap, name, &query, &filter);
            if !json {
                for section in &view.sections {
                    println!("{}", section.category);
                    for item in &section.items {
                        println!("  {}", item_line(item));
                    }
                }
                if view.is_empty() {
                    println!("No items match");
                }
                return Ok(());
            }
            view.sections.into_iter().flat_map(|s| s.items).collect()
        }
        None => client
            .list_items()?
            .into_iter()
            .filter(|i| matches_query(&i.name, &query))
            .filter(|i| match &filter {
                CategoryFilter::All => true,
                CategoryFilter::Only(c) => &i.category == c,
            })
            .collect(),
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&items).context("serialize items json")?
        );
    } else {
        for item in &items {
            println!("{}", item_line(item));
        }
    }
    Ok(())
}

pub(super) fn handle_popular_command(
    client: &RemoteClient,
    query: Option<String>,
    json: bool,
) -> Result<()> {
    let items = popular_items(&client.list_items()?, query.as_deref().unwrap_or(""));
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&items).context("serialize popular json")?
        );
    } else {
        for item in &items {
            println!("{}", item_line(item));
        }
    }
    Ok(())
}

fn item_line(item: &CatalogItem) -> String {
    let flag = if item.is_available { "" } else { "  (unavailable)" };
    format!(
        "{}  {}  [{}]  {}  {:.2}  {:.1}{}",
        item.id, item.name, item.vendor, item.category, item.price, item.rating, flag
    )
}
