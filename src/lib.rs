//! A small state store with selector-based subscriptions, driving a counter view.
//!
//! The [`Store`] owns a piece of state. Observers subscribe with a selector
//! that projects the state to the slice they care about, and are notified only
//! when that slice changes. The counter built on top of it ([`CounterStore`])
//! exposes four operations, and [`CounterRuntime`] binds a [`Renderer`] to the
//! store so that the view redraws only when the count changes.
//!
//! Data flows one way: a control queues a [`UiEvent`], the runtime invokes one
//! store operation, the store computes the next state and notifies the
//! subscribers whose selection changed, and the view re-renders.
//!
//! ## Example
//!
//! ```rust
//! use tally::{create_counter_store, CounterProps, CounterRuntime, Renderer};
//!
//! struct PrintRenderer;
//!
//! impl Renderer<CounterProps> for PrintRenderer {
//!     fn render(&mut self, props: CounterProps) {
//!         println!("{}", props.heading());
//!     }
//! }
//!
//! let store = create_counter_store();
//! let mut runtime = CounterRuntime::new(store.clone(), PrintRenderer);
//! runtime.mount(); // prints "Count: 0"
//!
//! store.increment(); // prints "Count: 1"
//! store.decrement(); // prints "Count: 0"
//! store.decrement(); // floor reached: no render
//! store.increment_by(-5); // no floor here: prints "Count: -5"
//! assert_eq!(store.get_state().count, -5);
//! ```

// Module declarations
mod control;
mod counter;
mod emitter;
mod renderer;
mod runtime;
mod store;
mod subscription;
mod view;

// Public re-exports
pub use control::{Control, ParseControlError};
pub use counter::{create_counter_store, CounterActions, CounterState, CounterStore};
pub use emitter::Emitter;
pub use renderer::Renderer;
pub use runtime::CounterRuntime;
pub use store::{Store, StoreId, WeakStore};
pub use subscription::{SubscriptionId, Unsubscribe};
pub use view::{CounterProps, CounterView, UiEvent, ViewConfig};

// Test utilities (only available with 'testing' feature or during tests)
#[cfg(any(test, feature = "testing"))]
pub use renderer::TestRenderer;
