use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use forecast_viz::notify::{TOAST_LIFETIME, Toast, ToastBus, ToastKind, ToastStack};

fn recorder(bus: &ToastBus) -> Rc<RefCell<Vec<Toast>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    bus.subscribe(move |toast: &Toast| sink.borrow_mut().push(toast.clone()));
    seen
}

#[test]
fn subscribers_receive_toasts_in_order() {
    let bus = ToastBus::new();
    let first = recorder(&bus);
    let second = recorder(&bus);

    bus.success("Forecast ready");
    bus.error("Upload failed");
    bus.publish("Plain", ToastKind::default());

    for seen in [&first, &second] {
        let seen = seen.borrow();
        let kinds: Vec<ToastKind> = seen.iter().map(|toast| toast.kind).collect();
        assert_eq!(kinds, [ToastKind::Success, ToastKind::Error, ToastKind::Info]);
        let ids: Vec<u64> = seen.iter().map(|toast| toast.id).collect();
        assert_eq!(ids, [1, 2, 3]);
    }
    assert_eq!(first.borrow()[1].message, "Upload failed");
}

#[test]
fn unsubscribed_listener_stops_receiving() {
    let bus = ToastBus::new();
    let seen = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&seen);
    let id = bus.subscribe(move |_| *sink.borrow_mut() += 1);

    bus.info("one");
    bus.unsubscribe(id);
    bus.unsubscribe(id);
    bus.info("two");

    assert_eq!(*seen.borrow(), 1);
    assert_eq!(bus.subscriber_count(), 0);
}

#[test]
fn clones_share_one_bus() {
    let bus = ToastBus::new();
    let seen = recorder(&bus);
    let handle = bus.clone();
    handle.info("from a clone");
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn listeners_may_publish_reentrantly() {
    let bus = ToastBus::new();
    let seen = recorder(&bus);
    let inner = bus.clone();
    bus.subscribe(move |toast: &Toast| {
        if toast.kind == ToastKind::Error {
            inner.info("retrying");
        }
    });

    bus.error("network down");
    let messages: Vec<String> = seen.borrow().iter().map(|toast| toast.message.clone()).collect();
    assert_eq!(messages, ["network down", "retrying"]);
}

#[test]
fn toast_kind_uses_lowercase_on_the_wire() {
    let json = serde_json::to_string(&ToastKind::Success).expect("serialize");
    assert_eq!(json, "\"success\"");
    let kind: ToastKind = serde_json::from_str("\"error\"").expect("deserialize");
    assert_eq!(kind, ToastKind::Error);
}

#[test]
fn stack_expires_toasts_after_their_lifetime() {
    let bus = ToastBus::new();
    let mut stack = ToastStack::new();
    let first = bus.info("first");
    let second = bus.success("second");
    stack.push(first, Duration::ZERO);
    stack.push(second, Duration::from_millis(1000));

    assert_eq!(stack.expire(TOAST_LIFETIME - Duration::from_millis(1)), 0);
    assert_eq!(stack.expire(TOAST_LIFETIME), 1);
    let remaining: Vec<&str> = stack.active().map(|toast| toast.message.as_str()).collect();
    assert_eq!(remaining, ["second"]);

    assert_eq!(stack.expire(TOAST_LIFETIME + Duration::from_millis(1000)), 1);
    assert!(stack.is_empty());
}

#[test]
fn stack_dismisses_by_id() {
    let bus = ToastBus::new();
    let mut stack = ToastStack::with_lifetime(Duration::from_secs(1));
    let toast = bus.error("boom");
    let id = toast.id;
    stack.push(toast, Duration::ZERO);

    assert!(stack.dismiss(id));
    assert!(!stack.dismiss(id));
    assert_eq!(stack.len(), 0);
}
