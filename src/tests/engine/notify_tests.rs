use super::*;

const TTL: Duration = Duration::from_secs(3);

#[test]
fn shown_notification_expires_after_ttl() {
    let t0 = Instant::now();
    let mut q = NotificationQueue::new(TTL);
    q.show("added", NotificationKind::Success, t0);

    assert_eq!(q.current(t0).map(|n| n.message.as_str()), Some("added"));
    assert!(q.current(t0 + Duration::from_millis(2_999)).is_some());
    assert!(q.current(t0 + TTL).is_none());

    assert!(!q.expire(t0 + Duration::from_secs(1)));
    assert!(q.expire(t0 + TTL));
    assert!(q.deadline().is_none());
}

#[test]
fn latest_notification_preempts_and_restarts_timer() {
    let t0 = Instant::now();
    let mut q = NotificationQueue::new(TTL);
    q.show("first", NotificationKind::Success, t0);
    let t1 = t0 + Duration::from_secs(2);
    q.show("second", NotificationKind::Error, t1);

    let n = q.current(t0 + Duration::from_secs(4)).cloned();
    assert_eq!(
        n,
        Some(Notification {
            message: "second".to_string(),
            kind: NotificationKind::Error,
            expires_at: t1 + TTL,
        })
    );
}

#[test]
fn manual_dismiss_cancels_pending_expiry() {
    let t0 = Instant::now();
    let mut q = NotificationQueue::new(TTL);
    q.show("bye", NotificationKind::Error, t0);

    let gone = q.dismiss();
    assert_eq!(gone.map(|n| n.message), Some("bye".to_string()));
    assert!(q.deadline().is_none());
    assert!(!q.expire(t0 + TTL));
}
