use super::*;
use crate::engine::fake_market::{Call, FakeMarket, item, vendor};

const EVERY: Duration = Duration::from_secs(5);

fn vendor_ctx(name: &str) -> BrowseContext {
    BrowseContext::Vendor {
        name: name.to_string(),
    }
}

#[test]
fn first_cycle_is_immediate_then_fixed_interval() {
    let t0 = Instant::now();
    let mut p = Poller::start(ContextId(1), BrowseContext::Home, EVERY, t0);

    assert!(p.begin(t0).is_some());
    p.finish();
    assert!(p.begin(t0 + Duration::from_secs(4)).is_none());
    assert!(p.begin(t0 + EVERY).is_some());
    p.finish();
    assert_eq!(p.next_due(), t0 + EVERY * 2);
}

#[test]
fn slots_passing_during_a_cycle_are_skipped_not_queued() {
    let t0 = Instant::now();
    let mut p = Poller::start(ContextId(1), BrowseContext::Home, EVERY, t0);

    let req = p.begin(t0);
    assert!(req.is_some());
    assert!(p.in_flight());
    assert!(p.begin(t0 + EVERY).is_none());
    assert!(p.begin(t0 + Duration::from_secs(12)).is_none());

    p.finish();
    assert_eq!(p.next_due(), t0 + EVERY * 3);
    assert!(p.begin(t0 + EVERY * 3).is_some());
}

#[test]
fn request_carries_context_and_id() {
    let t0 = Instant::now();
    let mut p = Poller::start(ContextId(7), vendor_ctx("Court1"), EVERY, t0);
    let req = p.begin(t0);
    assert_eq!(
        req,
        Some(CycleRequest {
            context_id: ContextId(7),
            context: vendor_ctx("Court1"),
        })
    );
}

#[test]
fn home_cycle_fetches_vendors_and_items() {
    let market = FakeMarket::new(
        vec![vendor("Court1", true)],
        vec![item("a", "Court1", "Snacks", 4.0)],
    );
    let req = CycleRequest {
        context_id: ContextId(1),
        context: BrowseContext::Home,
    };
    match req.run(&market) {
        CycleOutcome::Refreshed { vendors, items } => {
            assert_eq!(vendors.len(), 1);
            assert_eq!(items.len(), 1);
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    assert_eq!(market.calls(), vec![Call::ListVendors, Call::ListItems]);
}

#[test]
fn vendor_cycle_short_circuits_when_vendor_closed() {
    let market = FakeMarket::new(
        vec![vendor("Court1", false)],
        vec![item("a", "Court1", "Snacks", 4.0)],
    );
    let req = CycleRequest {
        context_id: ContextId(1),
        context: vendor_ctx("Court1"),
    };
    assert_eq!(
        req.run(&market),
        CycleOutcome::VendorClosed {
            vendor: "Court1".to_string()
        }
    );
    assert_eq!(market.calls(), vec![Call::ListVendors]);
}

#[test]
fn vendor_cycle_treats_missing_vendor_as_closed() {
    let market = FakeMarket::new(vec![vendor("Court2", true)], Vec::new());
    let req = CycleRequest {
        context_id: ContextId(1),
        context: vendor_ctx("Court1"),
    };
    assert!(matches!(
        req.run(&market),
        CycleOutcome::VendorClosed { .. }
    ));
}

#[test]
fn failures_report_the_stage() {
    let market = FakeMarket::new(vec![vendor("Court1", true)], Vec::new());
    market.state.borrow_mut().fail_items = true;

    let vendor_req = CycleRequest {
        context_id: ContextId(1),
        context: vendor_ctx("Court1"),
    };
    let CycleOutcome::Failed(f) = vendor_req.run(&market) else {
        panic!("expected failure");
    };
    assert_eq!(f.stage, FetchStage::Items);

    market.state.borrow_mut().fail_vendors = true;
    let CycleOutcome::Failed(f) = vendor_req.run(&market) else {
        panic!("expected failure");
    };
    assert_eq!(f.stage, FetchStage::VendorStatus);

    let home_req = CycleRequest {
        context_id: ContextId(2),
        context: BrowseContext::Home,
    };
    let CycleOutcome::Failed(f) = home_req.run(&market) else {
        panic!("expected failure");
    };
    assert_eq!(f.stage, FetchStage::Catalog);
    assert!(f.cause.contains("connection refused"));
}
