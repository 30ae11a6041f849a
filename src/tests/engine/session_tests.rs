use std::time::{Duration, Instant};

use super::*;
use crate::engine::fake_market::{Call, FakeMarket, item, unavailable, vendor};
use crate::engine::{CycleOutcome, FetchStage, MSG_ADD_OK};

fn browse() -> BrowseConfig {
    BrowseConfig::default()
}

fn market() -> FakeMarket {
    FakeMarket::new(
        vec![vendor("Court1", true), vendor("Court2", true), vendor("Shut", false)],
        vec![
            item("x", "Court1", "Snacks", 4.0),
            item("x2", "Court1", "Meals", 3.0),
            item("y", "Court2", "Meals", 4.5),
            item("s", "Shut", "Meals", 5.0),
            unavailable(item("u", "Court1", "Snacks", 4.9)),
        ],
    )
}

fn session() -> Session<FakeMarket> {
    Session::new(market(), Cart::default(), browse())
}

#[test]
fn first_tick_after_mount_loads_the_catalog() {
    let mut s = session();
    let t0 = Instant::now();
    s.open_home(t0);
    assert!(s.is_loading());

    let events = s.tick(t0);

    assert!(events.contains(&SessionEvent::SnapshotReplaced { generation: 1 }));
    assert!(!s.is_loading());
    assert_eq!(s.snapshot().items.len(), 5);
    assert_eq!(s.market().calls(), vec![Call::ListVendors, Call::ListItems]);
}

#[test]
fn poll_repeats_on_the_configured_interval() {
    let mut s = session();
    let t0 = Instant::now();
    s.open_home(t0);
    s.tick(t0);
    s.tick(t0 + Duration::from_secs(2));
    assert_eq!(s.snapshot().generation, 1);

    s.tick(t0 + Duration::from_secs(5));
    assert_eq!(s.snapshot().generation, 2);
}

#[test]
fn vendor_closing_mid_view_redirects_home_with_notice() {
    let mut s = session();
    let t0 = Instant::now();
    s.open_vendor(Some("Court1"), None, t0);
    s.tick(t0);
    assert_eq!(
        s.context(),
        Some(&BrowseContext::Vendor {
            name: "Court1".into()
        })
    );

    s.market().set_open("Court1", false);
    s.market().clear_calls();
    let t1 = t0 + Duration::from_secs(5);
    let events = s.tick(t1);

    assert!(events.contains(&SessionEvent::Redirected {
        vendor: "Court1".into()
    }));
    assert_eq!(s.context(), Some(&BrowseContext::Home));
    // items are never fetched for a closed vendor
    assert_eq!(s.market().calls(), vec![Call::ListVendors]);
    let n = s.notification(t1).unwrap();
    assert_eq!(n.message, "Court1 is currently closed.");
    assert_eq!(n.kind, NotificationKind::Error);
}

#[test]
fn navigation_notice_is_shown_once() {
    let mut s = session();
    let t0 = Instant::now();
    s.open_vendor(Some("Court1"), None, t0);
    s.market().set_open("Court1", false);
    s.tick(t0);
    assert!(s.notification(t0).is_some());

    s.dismiss_notification();
    s.open_home(t0);
    assert!(s.notification(t0).is_none());
}

#[test]
fn vendor_that_vanished_is_treated_as_closed() {
    let mut s = session();
    let t0 = Instant::now();
    s.open_vendor(Some("Nowhere"), None, t0);
    let events = s.tick(t0);
    assert!(events.contains(&SessionEvent::Redirected {
        vendor: "Nowhere".into()
    }));
    assert_eq!(s.context(), Some(&BrowseContext::Home));
}

#[test]
fn missing_vendor_goes_home() {
    let mut s = session();
    let events = s.open_vendor(None, None, Instant::now());
    assert_eq!(
        events,
        vec![SessionEvent::Navigated {
            to: BrowseContext::Home
        }]
    );
    assert_eq!(s.context(), Some(&BrowseContext::Home));
}

#[test]
fn results_for_an_unmounted_context_are_dropped() {
    let mut s = session();
    let t0 = Instant::now();
    s.open_home(t0);
    let req = s.begin_cycle(t0).unwrap();
    let outcome = req.run(s.market());

    s.open_vendor(Some("Court2"), None, t0);
    let events = s.apply_cycle(req.context_id, outcome, t0);

    assert!(events.is_empty());
    assert_eq!(s.snapshot().generation, 0);
    assert!(s.is_loading());
}

#[test]
fn stale_failure_does_not_raise_a_banner() {
    let mut s = session();
    let t0 = Instant::now();
    s.open_home(t0);
    let req = s.begin_cycle(t0).unwrap();
    s.open_home(t0);

    let failure = FetchFailure::new(FetchStage::Catalog, &anyhow::anyhow!("boom"));
    s.apply_cycle(req.context_id, CycleOutcome::Failed(failure), t0);

    assert!(s.fetch_error().is_none());
    assert!(s.notification(t0).is_none());
}

#[test]
fn home_fetch_failure_sets_banner_and_popup_then_recovers() {
    let mut s = session();
    s.market().state.borrow_mut().fail_items = true;
    let t0 = Instant::now();
    s.open_home(t0);
    s.tick(t0);

    assert_eq!(
        s.fetch_error(),
        Some("Failed to load food courts or items. Please try again later.")
    );
    assert_eq!(
        s.notification(t0).unwrap().message,
        "Failed to load food courts or items"
    );
    assert!(!s.is_loading());

    s.market().state.borrow_mut().fail_items = false;
    s.tick(t0 + Duration::from_secs(5));
    assert!(s.fetch_error().is_none());
}

#[test]
fn vendor_status_failure_shows_banner_only() {
    let mut s = session();
    s.market().state.borrow_mut().fail_vendors = true;
    let t0 = Instant::now();
    s.open_vendor(Some("Court1"), None, t0);
    s.tick(t0);

    assert_eq!(
        s.fetch_error(),
        Some("Failed to verify food court status. Please try again later.")
    );
    assert!(s.notification(t0).is_none());
    assert_eq!(s.market().calls(), vec![Call::ListVendors]);
}

#[test]
fn clicking_a_closed_vendor_stays_put() {
    let mut s = session();
    let t0 = Instant::now();
    s.open_home(t0);
    s.tick(t0);

    let events = s.click_vendor("Shut", t0);

    assert!(events.is_empty());
    assert_eq!(s.context(), Some(&BrowseContext::Home));
    assert_eq!(
        s.notification(t0).unwrap().message,
        "This food court is currently closed."
    );
}

#[test]
fn clicking_an_item_from_home_deep_links_into_its_vendor() {
    let mut s = session();
    let t0 = Instant::now();
    s.open_home(t0);
    s.tick(t0);

    let events = s.click_item(&ItemId::new("x2"), t0).unwrap();
    assert_eq!(
        events,
        vec![SessionEvent::Navigated {
            to: BrowseContext::Vendor {
                name: "Court1".into()
            }
        }]
    );

    // first refresh renders the target and starts the settle timer
    let t1 = t0 + Duration::from_millis(10);
    let events = s.tick(t1);
    assert!(!events.iter().any(|e| matches!(e, SessionEvent::ScrollTo(_))));

    let events = s.tick(t1 + Duration::from_millis(500));
    assert!(events.contains(&SessionEvent::ScrollTo(ItemId::new("x2"))));

    // fires once per navigation
    let events = s.tick(t1 + Duration::from_secs(6));
    assert!(!events.iter().any(|e| matches!(e, SessionEvent::ScrollTo(_))));
}

#[test]
fn deep_link_is_cancelled_by_navigation() {
    let mut s = session();
    let t0 = Instant::now();
    s.open_vendor(Some("Court1"), Some(ItemId::new("x")), t0);
    s.tick(t0);
    s.open_home(t0);

    let events = s.tick(t0 + Duration::from_secs(1));
    assert!(!events.iter().any(|e| matches!(e, SessionEvent::ScrollTo(_))));
}

#[test]
fn clicking_an_unavailable_item_only_warns() {
    let mut s = session();
    let t0 = Instant::now();
    s.open_home(t0);
    s.tick(t0);

    let events = s.click_item(&ItemId::new("u"), t0).unwrap();

    assert!(events.is_empty());
    assert_eq!(s.context(), Some(&BrowseContext::Home));
    assert_eq!(
        s.notification(t0).unwrap().message,
        "This item is temporarily not available."
    );
}

#[test]
fn clicking_an_item_of_a_closed_vendor_stays_home() {
    let mut s = session();
    let t0 = Instant::now();
    s.open_home(t0);
    s.tick(t0);

    s.click_item(&ItemId::new("s"), t0).unwrap();

    assert_eq!(s.context(), Some(&BrowseContext::Home));
    assert_eq!(
        s.notification(t0).unwrap().message,
        "This food court is currently closed."
    );
}

#[test]
fn unknown_item_is_an_error() {
    let mut s = session();
    let t0 = Instant::now();
    s.open_home(t0);
    s.tick(t0);
    let err = s.add_item(&ItemId::new("nope"), 1, t0).unwrap_err();
    assert_eq!(err, CartError::UnknownItem(ItemId::new("nope")));
    assert!(s.market().mutation_calls().is_empty());
}

#[test]
fn add_then_conflict_then_replace() {
    let mut s = session();
    let t0 = Instant::now();
    s.open_home(t0);
    s.tick(t0);

    s.add_item(&ItemId::new("x"), 1, t0).unwrap();
    assert_eq!(s.notification(t0).unwrap().message, MSG_ADD_OK);

    let err = s.add_item(&ItemId::new("y"), 1, t0).unwrap_err();
    assert!(matches!(err, CartError::VendorConflict { .. }));
    assert_eq!(s.pending_replacement().unwrap().item.id, ItemId::new("y"));

    s.resolve_replacement(true, t0).unwrap();
    assert_eq!(s.cart().vendor(), Some("Court2"));
    assert!(s.pending_replacement().is_none());
    assert_eq!(s.cart(), &s.market().server_cart());
}

#[test]
fn failed_add_sets_inline_error_until_search_is_cleared() {
    let mut s = session();
    let t0 = Instant::now();
    s.open_home(t0);
    s.tick(t0);
    s.market().state.borrow_mut().fail_add = Some(Some("Out of stock".into()));

    s.add_item(&ItemId::new("x"), 1, t0).unwrap_err();
    assert_eq!(s.add_error(), Some("Out of stock"));

    s.set_query("pa");
    s.clear_query();
    assert_eq!(s.query(), "");
    assert!(s.add_error().is_none());
}

#[test]
fn load_cart_adopts_the_backend_cart() {
    let m = market();
    m.state.borrow_mut().cart.push(crate::model::CartLine {
        item_id: ItemId::new("y"),
        name: "y".into(),
        price: 50.0,
        quantity: 2,
        vendor: "Court2".into(),
    });
    let mut s = Session::new(m, Cart::default(), browse());
    s.load_cart().unwrap();
    assert_eq!(s.cart().item_count(), 2);
    assert_eq!(s.cart().vendor(), Some("Court2"));
}

#[test]
fn profile_falls_back_to_guest() {
    let mut s = session();
    assert_eq!(s.display_name(), "Guest");
    s.market().state.borrow_mut().fail_profile = true;
    assert_eq!(s.load_profile(), "Guest");
    s.market().state.borrow_mut().fail_profile = false;
    assert_eq!(s.load_profile(), "Asha");
}

#[test]
fn expansion_is_seeded_on_first_vendor_load_and_survives_refresh() {
    let mut s = session();
    let t0 = Instant::now();
    s.open_vendor(Some("Court1"), None, t0);
    s.tick(t0);

    assert!(s.expansion().is_expanded("Snacks"));
    assert!(s.expansion().is_expanded("Meals"));

    assert!(!s.toggle_category("Meals"));
    s.tick(t0 + Duration::from_secs(5));
    assert!(!s.expansion().is_expanded("Meals"));
}

#[test]
fn navigation_resets_filters() {
    let mut s = session();
    let t0 = Instant::now();
    s.open_vendor(Some("Court1"), None, t0);
    s.set_query("x");
    s.select_category(CategoryFilter::parse("Meals"));
    s.open_vendor(Some("Court2"), None, t0);
    assert_eq!(s.query(), "");
    assert_eq!(s.category(), &CategoryFilter::All);
}

#[test]
fn vendor_view_respects_query_and_category() {
    let mut s = session();
    let t0 = Instant::now();
    s.open_vendor(Some("Court1"), None, t0);
    s.tick(t0);

    s.select_category(CategoryFilter::parse("Snacks"));
    let ids: Vec<_> = s.vendor_view().unwrap().item_ids().cloned().collect();
    assert_eq!(ids, vec![ItemId::new("x"), ItemId::new("u")]);

    s.set_query("x2");
    s.select_category(CategoryFilter::All);
    let ids: Vec<_> = s.vendor_view().unwrap().item_ids().cloned().collect();
    assert_eq!(ids, vec![ItemId::new("x2")]);
}

#[test]
fn next_deadline_tracks_poll_and_notice() {
    let mut s = session();
    let t0 = Instant::now();
    s.open_home(t0);
    assert_eq!(s.next_deadline(), Some(t0));
    s.tick(t0);
    assert_eq!(s.next_deadline(), Some(t0 + Duration::from_secs(5)));

    s.click_vendor("Shut", t0);
    assert_eq!(s.next_deadline(), Some(t0 + Duration::from_secs(3)));
}
