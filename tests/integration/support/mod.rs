use tally::{
    create_counter_store, CounterProps, CounterRuntime, CounterState, CounterStore, Store,
    TestRenderer, Unsubscribe,
};

/// Receives the values a subscription fires with.
#[cfg_attr(test, mockall::automock)]
pub(crate) trait CountSink {
    fn on_count(&self, count: i64);
}

pub(crate) fn given_store_at(count: i64) -> CounterStore {
    Store::new(CounterState { count })
}

/// Subscribe `sink` to the store's count.
///
/// The sink is dropped, and its expectations verified, when the returned
/// handle is unsubscribed.
pub(crate) fn subscribe_count_sink<Sink>(
    store: &CounterStore,
    sink: Sink,
) -> Unsubscribe<CounterState>
where
    Sink: CountSink + Send + Sync + 'static,
{
    store.subscribe(
        |state| state.count,
        move |count: &i64| sink.on_count(*count),
    )
}

pub(crate) struct MountedView {
    pub(crate) store: CounterStore,
    pub(crate) runtime: CounterRuntime<TestRenderer<CounterProps>>,
    pub(crate) renders: TestRenderer<CounterProps>,
}

pub(crate) fn given_mounted_view() -> MountedView {
    let store = create_counter_store();
    let renders = TestRenderer::new();
    let mut runtime = CounterRuntime::new(store.clone(), renders.clone());
    runtime.mount();

    MountedView {
        store,
        runtime,
        renders,
    }
}

impl MountedView {
    pub(crate) fn rendered_counts(&self) -> Vec<i64> {
        self.renders
            .with_renders(|renders| renders.iter().map(|props| props.count).collect())
    }

    /// Activate a control on the most recent render, then let the runtime process it.
    pub(crate) fn press<F>(&mut self, pick: F)
    where
        F: FnOnce(&CounterProps) -> &(dyn Fn() + Send),
    {
        self.renders.with_renders(|renders| {
            let latest = renders.last().expect("view has rendered");
            pick(latest)();
        });
        self.runtime.process_events();
    }
}
