//! Event emitter for embedding control callbacks in props.

use flume::Sender;

/// Cloneable handle onto the UI event queue.
///
/// Props callbacks hold a clone and emit when their control is activated. The
/// runtime drains the queue and turns each event into a store operation, so
/// all state changes stay on the thread driving the runtime even when events
/// are emitted from elsewhere.
///
/// # Example
///
/// ```rust
/// use tally::{create_counter_store, Control, CounterRuntime, TestRenderer, UiEvent};
///
/// let renderer = TestRenderer::new();
/// let mut runtime = CounterRuntime::new(create_counter_store(), renderer.clone());
/// runtime.mount();
///
/// let emitter = runtime.emitter();
/// std::thread::spawn(move || emitter.emit(UiEvent::Pressed(Control::Increment)))
///     .join()
///     .unwrap();
///
/// runtime.process_events();
/// assert_eq!(runtime.store().get_state().count, 1);
/// ```
pub struct Emitter<Event: Send>(pub(crate) Sender<Event>);

impl<Event: Send> Clone for Emitter<Event> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<Event: Send> Emitter<Event> {
    pub(crate) fn new(sender: Sender<Event>) -> Self {
        Self(sender)
    }

    /// Queue an event.
    ///
    /// Events emitted after the runtime is gone are dropped.
    pub fn emit(&self, event: Event) {
        if self.0.send(event).is_err() {
            tracing::trace!("event dropped: runtime is gone");
        }
    }
}
