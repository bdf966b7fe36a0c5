//! The runtime that binds the counter view to its store.

use flume::Receiver;
use portable_atomic_util::Arc;
use spin::Mutex;

use crate::counter::{CounterActions, CounterState, CounterStore};
use crate::subscription::Unsubscribe;
use crate::view::{CounterProps, CounterView, UiEvent, ViewConfig};
use crate::{Emitter, Renderer};

/// The event loop of a mounted counter view.
///
/// The runtime:
/// 1. Renders the initial props on [`mount`](Self::mount)
/// 2. Subscribes to the store's `count` alone and re-renders when it changes
/// 3. Subscribes to the grouped [`CounterActions`] handle used to dispatch controls
/// 4. Turns each queued [`UiEvent::Pressed`] into exactly one store operation
///
/// Events can be emitted from any thread via [`Emitter`] but are processed
/// sequentially on the thread that calls [`process_events`](Self::process_events)
/// or drives [`run`](Self::run).
///
/// # Example
///
/// ```rust
/// use tally::{create_counter_store, Control, CounterRuntime, TestRenderer, UiEvent};
///
/// let store = create_counter_store();
/// let renderer = TestRenderer::new();
/// let mut runtime = CounterRuntime::new(store.clone(), renderer.clone());
///
/// let emitter = runtime.emitter();
/// emitter.emit(UiEvent::Pressed(Control::IncrementBy(5)));
/// emitter.emit(UiEvent::Close);
///
/// futures::executor::block_on(runtime.run());
///
/// assert_eq!(store.get_state().count, 5);
/// assert_eq!(renderer.count(), 2);
/// ```
pub struct CounterRuntime<Render>
where
    Render: Renderer<CounterProps> + Send + 'static,
{
    store: CounterStore,
    view: CounterView,
    renderer: Arc<Mutex<Render>>,
    actions: Arc<Mutex<CounterActions>>,
    event_receiver: Receiver<UiEvent>,
    emitter: Emitter<UiEvent>,
    subscriptions: Vec<Unsubscribe<CounterState>>,
}

impl<Render> CounterRuntime<Render>
where
    Render: Renderer<CounterProps> + Send + 'static,
{
    /// Create a runtime with the default [`ViewConfig`].
    ///
    /// Nothing is rendered until the runtime is mounted.
    pub fn new(store: CounterStore, renderer: Render) -> Self {
        Self::with_config(store, renderer, ViewConfig::default())
    }

    pub fn with_config(store: CounterStore, renderer: Render, config: ViewConfig) -> Self {
        let (event_sender, event_receiver) = flume::unbounded();
        let actions = store.actions();

        CounterRuntime {
            store,
            view: CounterView::new(config),
            renderer: Arc::new(Mutex::new(renderer)),
            actions: Arc::new(Mutex::new(actions)),
            event_receiver,
            emitter: Emitter::new(event_sender),
            subscriptions: Vec::new(),
        }
    }

    pub fn store(&self) -> &CounterStore {
        &self.store
    }

    /// A handle for queueing events from outside the rendered surface.
    pub fn emitter(&self) -> Emitter<UiEvent> {
        self.emitter.clone()
    }

    pub fn is_mounted(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Render the initial props and register the view's two subscriptions.
    ///
    /// Mounting an already mounted runtime does nothing.
    pub fn mount(&mut self) {
        if self.is_mounted() {
            return;
        }

        let count = self.store.select(|state| state.count);
        self.renderer
            .lock()
            .render(self.view.props(count, &self.emitter));

        let renderer = Arc::clone(&self.renderer);
        let view = self.view;
        let emitter = self.emitter.clone();
        let on_count = self.store.subscribe(
            |state| state.count,
            move |count: &i64| {
                tracing::trace!(count, "rendering");
                renderer.lock().render(view.props(*count, &emitter));
            },
        );

        let current = self.store.actions();
        let bound = Arc::clone(&self.actions);
        let on_actions = self.store.subscribe(
            move |_| current.clone(),
            move |actions: &CounterActions| {
                tracing::debug!(store = ?actions.store_id(), "rebinding counter actions");
                *bound.lock() = actions.clone();
            },
        );

        self.subscriptions.push(on_count);
        self.subscriptions.push(on_actions);
        tracing::debug!(count, "counter view mounted");
    }

    /// Drop the view's subscriptions. Queued events stay queued.
    pub fn unmount(&mut self) {
        for subscription in self.subscriptions.drain(..) {
            subscription.unsubscribe();
        }
        tracing::debug!("counter view unmounted");
    }

    /// Process every queued event without blocking.
    ///
    /// Returns `false` once a [`UiEvent::Close`] has been processed; events
    /// queued behind it are left in the queue.
    pub fn process_events(&mut self) -> bool {
        while let Ok(event) = self.event_receiver.try_recv() {
            if !self.step(event) {
                return false;
            }
        }
        true
    }

    /// Mount, then process events until [`UiEvent::Close`] arrives.
    ///
    /// The view is unmounted before returning.
    pub async fn run(&mut self) {
        tracing::info!("counter runtime started");
        self.mount();

        // The runtime holds a sender itself, so the channel never closes under it.
        while let Ok(event) = self.event_receiver.recv_async().await {
            if !self.step(event) {
                break;
            }
        }

        self.unmount();
        tracing::info!("counter runtime stopped");
    }

    fn step(&mut self, event: UiEvent) -> bool {
        match event {
            UiEvent::Pressed(control) => {
                let actions = self.actions.lock().clone();
                actions.dispatch(control);
                true
            }
            UiEvent::Close => false,
        }
    }
}
