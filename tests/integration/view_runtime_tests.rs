use tally::{create_counter_store, Control, CounterRuntime, TestRenderer, UiEvent, ViewConfig};

use crate::support::given_mounted_view;

#[test]
fn given_mounted_view_should_render_initial_props() {
    let view = given_mounted_view();

    assert_eq!(view.renders.count(), 1);
    view.renders.with_renders(|renders| {
        assert_eq!(renders[0].heading(), "Count: 0");
        assert_eq!(
            renders[0].controls(),
            [
                Control::Increment,
                Control::Reset,
                Control::Decrement,
                Control::IncrementBy(5),
            ]
        );
    });
}

#[test]
fn given_mounted_view_when_increment_pressed_should_render_again() {
    let mut view = given_mounted_view();

    view.press(|props| &*props.on_increment);

    assert_eq!(view.store.get_state().count, 1);
    assert_eq!(view.rendered_counts(), vec![0, 1]);
}

#[test]
fn given_zero_when_decrement_pressed_should_not_render() {
    let mut view = given_mounted_view();

    view.press(|props| &*props.on_decrement);

    assert_eq!(view.renders.count(), 1);
}

#[test]
fn given_mounted_view_when_pressing_through_scenario_should_render_each_change() {
    let mut view = given_mounted_view();

    view.press(|props| &*props.on_increment);
    view.press(|props| &*props.on_increment);
    view.press(|props| &*props.on_increment);
    view.press(|props| &*props.on_increment_by);
    view.press(|props| &*props.on_decrement);
    view.press(|props| &*props.on_reset);
    view.press(|props| &*props.on_decrement);

    assert_eq!(view.store.get_state().count, 0);
    assert_eq!(view.rendered_counts(), vec![0, 1, 2, 3, 8, 7, 0]);
}

#[test]
fn given_store_changed_elsewhere_should_render_new_count() {
    let view = given_mounted_view();

    view.store.increment_by(-4);

    assert_eq!(view.rendered_counts(), vec![0, -4]);
    view.renders.with_renders(|renders| {
        assert_eq!(renders[1].heading(), "Count: -4");
    });
}

#[test]
fn given_many_changes_actions_subscription_should_never_rebind() {
    let mut view = given_mounted_view();
    let actions = view.store.actions();

    for _ in 0..10 {
        view.press(|props| &*props.on_increment_by);
    }

    // One count subscription plus one grouped actions subscription.
    assert_eq!(view.store.subscriber_count(), 2);
    assert_eq!(view.store.actions(), actions);
    assert_eq!(view.renders.count(), 11);
}

#[test]
fn given_custom_amount_increment_by_should_use_it() {
    let store = create_counter_store();
    let renders = TestRenderer::new();
    let mut runtime = CounterRuntime::with_config(
        store.clone(),
        renders.clone(),
        ViewConfig {
            increment_by_amount: 12,
        },
    );
    runtime.mount();

    renders.with_renders(|renders| {
        assert_eq!(renders[0].controls()[3].label(), "Increment by 12");
        (renders[0].on_increment_by)();
    });
    runtime.process_events();

    assert_eq!(store.get_state().count, 12);
}

#[test]
fn given_queued_events_when_run_should_process_until_close() {
    let store = create_counter_store();
    let renders = TestRenderer::new();
    let mut runtime = CounterRuntime::new(store.clone(), renders.clone());

    let emitter = runtime.emitter();
    emitter.emit(UiEvent::Pressed(Control::Increment));
    emitter.emit(UiEvent::Pressed(Control::IncrementBy(5)));
    emitter.emit(UiEvent::Close);

    futures::executor::block_on(runtime.run());

    assert_eq!(store.get_state().count, 6);
    assert_eq!(renders.count(), 3);
    assert!(!runtime.is_mounted());
    assert_eq!(store.subscriber_count(), 0);
}

#[test]
fn given_events_emitted_from_another_thread_should_apply_in_order() {
    let store = create_counter_store();
    let renders = TestRenderer::new();
    let mut runtime = CounterRuntime::new(store.clone(), renders.clone());

    let emitter = runtime.emitter();
    let producer = std::thread::spawn(move || {
        emitter.emit(UiEvent::Pressed(Control::IncrementBy(2)));
        emitter.emit(UiEvent::Pressed(Control::Decrement));
        emitter.emit(UiEvent::Pressed(Control::Decrement));
        emitter.emit(UiEvent::Pressed(Control::Decrement));
        emitter.emit(UiEvent::Close);
    });

    futures::executor::block_on(runtime.run());
    producer.join().expect("producer thread");

    assert_eq!(store.get_state().count, 0);
    renders.with_renders(|renders| {
        let counts: Vec<i64> = renders.iter().map(|props| props.count).collect();
        assert_eq!(counts, vec![0, 2, 1, 0]);
    });
}

#[test]
fn given_clamping_listener_when_count_overshoots_view_should_end_on_clamped_count() {
    let store = create_counter_store();
    let clamp = store.clone();
    let _clamp = store.subscribe(
        |state| state.count,
        move |count: &i64| {
            if *count > 10 {
                clamp.increment_by(10 - *count);
            }
        },
    );
    let renders = TestRenderer::new();
    let mut runtime = CounterRuntime::new(store.clone(), renders.clone());
    runtime.mount();

    store.increment_by(25);

    assert_eq!(store.get_state().count, 10);
    renders.with_renders(|renders| {
        let counts: Vec<i64> = renders.iter().map(|props| props.count).collect();
        assert_eq!(counts, vec![0, 25, 10]);
        assert_eq!(
            renders.last().map(|props| props.heading()).as_deref(),
            Some("Count: 10")
        );
    });
}
