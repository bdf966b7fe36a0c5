//! The counter state and its four operations.

use crate::control::Control;
use crate::store::{Store, StoreId, WeakStore};

/// The counter's full state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CounterState {
    pub count: i64,
}

/// A [`Store`] holding a [`CounterState`].
pub type CounterStore = Store<CounterState>;

/// Create a counter store starting at zero.
pub fn create_counter_store() -> CounterStore {
    Store::new(CounterState::default())
}

impl Store<CounterState> {
    /// Add one, but only while the count is not negative.
    ///
    /// A count driven below zero by [`increment_by`](Self::increment_by) is
    /// left unchanged.
    pub fn increment(&self) {
        let applied = self.transition(|state| {
            (state.count >= 0).then(|| CounterState {
                count: state.count.saturating_add(1),
            })
        });
        if !applied {
            tracing::debug!("increment ignored below zero");
        }
    }

    /// Subtract one, but never below zero.
    pub fn decrement(&self) {
        let applied = self.transition(|state| {
            (state.count > 0).then(|| CounterState {
                count: state.count - 1,
            })
        });
        if !applied {
            tracing::debug!("decrement ignored at floor");
        }
    }

    /// Set the count back to zero.
    pub fn reset(&self) {
        self.set_state(CounterState::default());
    }

    /// Add `amount` to the count.
    ///
    /// Unlike [`decrement`](Self::decrement) this applies no floor: a negative
    /// amount can take the count below zero.
    pub fn increment_by(&self, amount: i64) {
        self.update(|state| CounterState {
            count: state.count.saturating_add(amount),
        });
    }

    /// Bundle the four operations into one comparable handle.
    pub fn actions(&self) -> CounterActions {
        CounterActions {
            store: self.downgrade(),
        }
    }
}

/// The counter operations of one store, grouped.
///
/// Two handles are equal when they operate on the same store, so a
/// subscription selecting the handle never fires for as long as the store
/// lives. The handle does not keep the store alive; once the store is
/// dropped every operation is a no-op.
#[derive(Clone)]
pub struct CounterActions {
    store: WeakStore<CounterState>,
}

impl CounterActions {
    pub fn store_id(&self) -> StoreId {
        self.store.id()
    }

    pub fn increment(&self) {
        self.with_store(CounterStore::increment);
    }

    pub fn decrement(&self) {
        self.with_store(CounterStore::decrement);
    }

    pub fn reset(&self) {
        self.with_store(CounterStore::reset);
    }

    pub fn increment_by(&self, amount: i64) {
        self.with_store(|store| store.increment_by(amount));
    }

    /// Invoke the single operation bound to `control`.
    pub fn dispatch(&self, control: Control) {
        tracing::debug!(%control, "dispatching control");
        match control {
            Control::Increment => self.increment(),
            Control::Reset => self.reset(),
            Control::Decrement => self.decrement(),
            Control::IncrementBy(amount) => self.increment_by(amount),
        }
    }

    fn with_store<F: FnOnce(&CounterStore)>(&self, f: F) {
        match self.store.upgrade() {
            Some(store) => f(&store),
            None => tracing::debug!(store = ?self.store.id(), "store dropped; action ignored"),
        }
    }
}

impl PartialEq for CounterActions {
    fn eq(&self, other: &Self) -> bool {
        self.store.id() == other.store.id()
    }
}

impl Eq for CounterActions {}

impl core::fmt::Debug for CounterActions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CounterActions")
            .field("store", &self.store.id())
            .finish()
    }
}
