use super::*;

const SETTLE: Duration = Duration::from_millis(500);

fn link(item: &str, ctx: u64) -> DeepLink {
    DeepLink {
        item: ItemId::new(item),
        context_id: ContextId(ctx),
    }
}

#[test]
fn waits_for_target_then_settles_before_scrolling() {
    let t0 = Instant::now();
    let mut r = DeepLinkResolver::new(SETTLE);
    r.arm(link("b", 1));

    r.observe(&[ItemId::new("a")], t0);
    assert!(r.poll(t0 + Duration::from_secs(10)).is_none());

    let t1 = t0 + Duration::from_secs(5);
    r.observe(&[ItemId::new("a"), ItemId::new("b")], t1);
    assert!(r.poll(t1 + Duration::from_millis(499)).is_none());
    assert_eq!(r.poll(t1 + SETTLE), Some(ItemId::new("b")));
}

#[test]
fn scrolls_once_across_refreshes() {
    let t0 = Instant::now();
    let mut r = DeepLinkResolver::new(SETTLE);
    r.arm(link("b", 1));
    let ids = [ItemId::new("b")];

    r.observe(&ids, t0);
    assert!(r.poll(t0 + SETTLE).is_some());

    for n in 1..4 {
        let t = t0 + Duration::from_secs(5 * n);
        r.arm(link("b", 1));
        r.observe(&ids, t);
        assert!(r.poll(t + SETTLE).is_none());
    }
}

#[test]
fn a_new_context_scrolls_again() {
    let t0 = Instant::now();
    let mut r = DeepLinkResolver::new(SETTLE);
    let ids = [ItemId::new("b")];
    r.arm(link("b", 1));
    r.observe(&ids, t0);
    assert!(r.poll(t0 + SETTLE).is_some());

    r.arm(link("b", 2));
    r.observe(&ids, t0);
    assert_eq!(r.poll(t0 + SETTLE), Some(ItemId::new("b")));
}

#[test]
fn repeated_observation_does_not_push_the_timer_back() {
    let t0 = Instant::now();
    let mut r = DeepLinkResolver::new(SETTLE);
    let ids = [ItemId::new("b")];
    r.arm(link("b", 1));
    r.observe(&ids, t0);
    r.observe(&ids, t0 + Duration::from_millis(400));
    assert_eq!(r.deadline(), Some(t0 + SETTLE));
}

#[test]
fn cancel_clears_pending_timer() {
    let t0 = Instant::now();
    let mut r = DeepLinkResolver::new(SETTLE);
    r.arm(link("b", 1));
    r.observe(&[ItemId::new("b")], t0);
    r.cancel();
    assert!(r.pending().is_none());
    assert!(r.poll(t0 + SETTLE).is_none());
}
