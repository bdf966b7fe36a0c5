use std::sync::{Arc, Mutex};

use mockall::predicate::eq;
use tally::{create_counter_store, Store};

use crate::support::{subscribe_count_sink, MockCountSink};

#[test]
fn given_constant_selector_when_count_changes_should_never_fire() {
    let store = create_counter_store();
    let fired = Arc::new(Mutex::new(0));
    let fired_clone = fired.clone();
    let _constant = store.subscribe(|_| "counter", move |_| *fired_clone.lock().unwrap() += 1);

    store.increment();
    store.increment_by(5);
    store.decrement();
    store.reset();

    assert_eq!(*fired.lock().unwrap(), 0);
}

#[test]
fn given_count_selector_should_fire_once_per_changing_operation() {
    let store = create_counter_store();
    let mut sink = MockCountSink::new();
    sink.expect_on_count().with(eq(1)).times(1).return_const(());
    sink.expect_on_count().with(eq(6)).times(1).return_const(());
    let subscription = subscribe_count_sink(&store, sink);

    store.increment();
    store.increment_by(5);
    store.increment_by(0);

    assert!(subscription.unsubscribe());
}

#[test]
fn given_derived_selection_should_fire_only_when_derivation_changes() {
    let store = create_counter_store();
    let parities = Arc::new(Mutex::new(Vec::new()));
    let parities_clone = parities.clone();
    let _is_even = store.subscribe(
        |state| state.count % 2 == 0,
        move |even: &bool| parities_clone.lock().unwrap().push(*even),
    );

    store.increment_by(2); // 2, still even
    store.increment(); // 3
    store.increment_by(2); // 5, still odd
    store.reset(); // 0

    assert_eq!(*parities.lock().unwrap(), vec![false, true]);
}

#[derive(Clone, Debug, Default, PartialEq)]
struct Profile {
    name: String,
    visits: u32,
    theme: &'static str,
}

#[derive(Clone, Debug)]
struct Badge {
    name: String,
    visits: u32,
    rendered_at: u64,
}

#[test]
fn given_composite_selection_should_compare_field_wise() {
    let store = Store::new(Profile::default());
    let badges = Arc::new(Mutex::new(Vec::new()));
    let badges_clone = badges.clone();
    let _badge = store.subscribe_with(
        |profile| Badge {
            name: profile.name.clone(),
            visits: profile.visits,
            rendered_at: u64::from(profile.visits) * 1_000,
        },
        // rendered_at is bookkeeping, not content
        |a: &Badge, b: &Badge| a.name == b.name && a.visits == b.visits,
        move |badge: &Badge| badges_clone.lock().unwrap().push(badge.clone()),
    );

    store.update(|p| Profile {
        theme: "dark",
        ..p.clone()
    });
    store.update(|p| Profile {
        name: "ada".to_string(),
        ..p.clone()
    });
    store.update(|p| Profile {
        visits: p.visits + 1,
        ..p.clone()
    });

    let badges = badges.lock().unwrap();
    assert_eq!(badges.len(), 2);
    assert_eq!(badges[0].name, "ada");
    assert_eq!(badges[1].visits, 1);
    assert_eq!(badges[1].rendered_at, 1_000);
}

#[test]
fn given_two_subscribers_when_one_unsubscribes_other_keeps_firing() {
    let store = create_counter_store();

    let mut kept = MockCountSink::new();
    kept.expect_on_count().with(eq(1)).times(1).return_const(());
    kept.expect_on_count().with(eq(2)).times(1).return_const(());
    let kept = subscribe_count_sink(&store, kept);

    let mut dropped = MockCountSink::new();
    dropped.expect_on_count().with(eq(1)).times(1).return_const(());
    let dropped = subscribe_count_sink(&store, dropped);

    store.increment();
    assert!(dropped.unsubscribe());
    store.increment();

    assert_eq!(store.subscriber_count(), 1);
    assert!(kept.unsubscribe());
}

#[test]
fn given_store_dropped_when_unsubscribing_should_report_nothing_removed() {
    let store = create_counter_store();
    let subscription = store.subscribe(|state| state.count, |_: &i64| {});

    drop(store);

    assert!(!subscription.unsubscribe());
}
