mod common;

use std::sync::Arc;

use pageshell::bus::{ContactUpdated, EventBus};
use pageshell::gateway::Contact;
use parking_lot::Mutex;

#[test]
fn handlers_run_once_in_registration_order_until_off() {
    let bus = EventBus::new();
    let calls = Arc::new(Mutex::new(Vec::new()));

    let first = Arc::clone(&calls);
    bus.on::<ContactUpdated, _>(move |contact| {
        first.lock().push(("first", contact.clone()));
    });
    let second = Arc::clone(&calls);
    bus.on::<ContactUpdated, _>(move |contact| {
        second.lock().push(("second", contact.clone()));
    });

    let payload = Contact::new("Ann", "a@x.com");
    assert_eq!(bus.trigger::<ContactUpdated>(&payload), 2);
    assert_eq!(
        *calls.lock(),
        vec![("first", payload.clone()), ("second", payload.clone())]
    );

    assert_eq!(bus.off::<ContactUpdated>(), 2);
    assert_eq!(bus.trigger::<ContactUpdated>(&payload), 0);
    assert_eq!(calls.lock().len(), 2);
}

#[test]
fn off_is_idempotent() {
    let bus = EventBus::new();
    assert_eq!(bus.off::<ContactUpdated>(), 0);
    bus.on::<ContactUpdated, _>(|_| {});
    assert_eq!(bus.off::<ContactUpdated>(), 1);
    assert_eq!(bus.off::<ContactUpdated>(), 0);
}

#[test]
fn clones_share_one_registry() {
    let bus = EventBus::new();
    let other = bus.clone();
    other.on::<ContactUpdated, _>(|_| {});
    assert_eq!(bus.handler_count::<ContactUpdated>(), 1);
}
