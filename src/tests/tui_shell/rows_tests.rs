use std::time::Instant;

use super::*;
use crate::engine::fake_market::{FakeMarket, item, unavailable, vendor};
use crate::model::{BrowseConfig, Cart};

fn loaded(vendor_ctx: Option<&str>) -> Session<FakeMarket> {
    let market = FakeMarket::new(
        vec![vendor("Court1", true), vendor("Court2", false)],
        vec![
            item("a", "Court1", "Snacks", 4.0),
            item("b", "Court1", "Meals", 4.8),
            unavailable(item("c", "Court1", "Snacks", 5.0)),
            item("d", "Court2", "Meals", 3.0),
        ],
    );
    let mut s = Session::new(market, Cart::default(), BrowseConfig::default());
    let now = Instant::now();
    match vendor_ctx {
        Some(v) => s.open_vendor(Some(v), None, now),
        None => s.open_home(now),
    };
    s.tick(now);
    s
}

fn ids(rows: &[Row]) -> Vec<String> {
    rows.iter()
        .filter_map(|r| r.item_id().map(|i| i.to_string()))
        .collect()
}

#[test]
fn home_lists_vendors_then_popular_items() {
    let s = loaded(None);
    let rows = build_rows(&s);

    assert_eq!(rows[0], Row::Heading("Food courts".to_string()));
    assert!(matches!(&rows[1], Row::Vendor(v) if v.name == "Court1"));
    assert!(matches!(&rows[2], Row::Vendor(v) if v.name == "Court2"));
    assert_eq!(rows[3], Row::Heading("Popular items".to_string()));
    // unavailable items never rank
    assert_eq!(ids(&rows), vec!["b", "a", "d"]);
}

#[test]
fn home_search_switches_heading_and_includes_unavailable() {
    let mut s = loaded(None);
    s.set_query("c");
    let rows = build_rows(&s);
    assert!(rows.contains(&Row::Heading("Search results".to_string())));
    assert_eq!(ids(&rows), vec!["c"]);
}

#[test]
fn collapsed_categories_hide_their_items() {
    let mut s = loaded(Some("Court1"));
    let rows = build_rows(&s);
    assert_eq!(ids(&rows), vec!["a", "c", "b"]);

    s.toggle_category("Snacks");
    let rows = build_rows(&s);
    assert_eq!(ids(&rows), vec!["b"]);
    assert!(rows.contains(&Row::Category {
        name: "Snacks".to_string(),
        expanded: false,
        count: 2,
    }));
}

#[test]
fn selection_skips_headings() {
    let s = loaded(None);
    let rows = build_rows(&s);
    let first = first_selectable(&rows);
    assert_eq!(first, 1);

    let after_vendors = step(&rows, 2, true);
    assert_eq!(rows[after_vendors].item_id(), Some(&ItemId::new("b")));
    assert_eq!(step(&rows, after_vendors, false), 2);
    assert_eq!(step(&rows, first, false), first);
    let last = rows.len() - 1;
    assert_eq!(step(&rows, last, true), last);
}

#[test]
fn finds_rows_by_key_and_item() {
    let s = loaded(Some("Court1"));
    let rows = build_rows(&s);
    let at = position_of_item(&rows, &ItemId::new("b")).unwrap();
    assert_eq!(position_of_key(&rows, "item:b"), Some(at));
    assert!(position_of_key(&rows, "vendor:Court1").is_none());
}
