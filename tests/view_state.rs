mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pageshell::pages::ContactRowState;
use pageshell::view_state::{Prop, ViewShape, ViewStateMap};

#[test]
fn distinct_keys_get_distinct_stable_state() {
    let map: ViewStateMap<String, ContactRowState> = ViewStateMap::default();
    let keys = ["johndoe@hotmail.com", "mlou@yahoo.com", "tduncan@gmail.com"];

    let first: Vec<_> = keys.iter().map(|key| map.get(*key)).collect();
    let second: Vec<_> = keys.iter().map(|key| map.get(*key)).collect();

    for (i, a) in first.iter().enumerate() {
        assert!(Arc::ptr_eq(a, &second[i]), "state for a key must be stable");
        for b in first.iter().skip(i + 1) {
            assert!(!Arc::ptr_eq(a, b), "distinct keys must not share state");
        }
    }
}

#[test]
fn mutations_persist_across_lookups() {
    let map: ViewStateMap<String, ContactRowState> = ViewStateMap::default();
    map.get("a@x.com").is_editing.set(true);
    assert!(map.get("a@x.com").is_editing.get());
    assert!(!map.get("b@x.com").is_editing.get());
}

struct Form {
    name: Prop<String>,
    dirty: Prop<bool>,
}

impl ViewShape for Form {
    fn init() -> Self {
        Self {
            name: Prop::new(String::new()),
            dirty: Prop::new(false),
        }
    }
}

#[test]
fn every_field_is_an_independent_cell() {
    let map: ViewStateMap<u32, Form> = ViewStateMap::default();
    map.get(&1u32).name.set("Ann".to_string());
    map.get(&1u32).dirty.set(true);
    assert_eq!(map.get(&2u32).name.get(), "");
    assert!(!map.get(&2u32).dirty.get());
}

#[test]
fn factory_runs_once_per_key() {
    let built = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&built);
    let map: ViewStateMap<&'static str, Prop<u8>> = ViewStateMap::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Prop::new(0)
    });
    map.get(&"a");
    map.get(&"a");
    map.get(&"b");
    assert_eq!(built.load(Ordering::SeqCst), 2);
    assert_eq!(map.len(), 2);
}

#[test]
fn clear_forgets_entries_but_not_handed_out_state() {
    let map: ViewStateMap<String, ContactRowState> = ViewStateMap::default();
    let held = map.get("a@x.com");
    held.is_editing.set(true);
    map.clear();
    assert!(map.is_empty());
    assert!(held.is_editing.get());
    assert!(!map.get("a@x.com").is_editing.get());
}
