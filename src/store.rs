//! The state container and its change-detection loop.

use core::sync::atomic::{AtomicU64, Ordering};

use portable_atomic_util::{Arc, Weak};
use spin::Mutex;

use crate::subscription::{NotificationQueue, Registry, Selective, Unsubscribe};

static NEXT_STORE_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique identity of the state behind a [`Store`].
///
/// All handles cloned from the same store share one id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StoreId(u64);

/// An explicitly constructed, shareable state container.
///
/// `Store` owns a value of `S` and notifies subscribers when the slice of the
/// state they selected changes. Cloning a store yields another handle to the
/// same state, which is how views receive it.
///
/// # Example
///
/// ```rust
/// use tally::Store;
///
/// #[derive(Clone, Default)]
/// struct Settings { volume: u8, muted: bool }
///
/// let store = Store::new(Settings::default());
/// let _volume = store.subscribe(|s| s.volume, |v| println!("volume is now {v}"));
///
/// // Fires the listener: the selected volume changed.
/// store.update(|s| Settings { volume: 7, ..s.clone() });
///
/// // Does not fire it: volume is unchanged.
/// store.update(|s| Settings { muted: true, ..s.clone() });
/// ```
pub struct Store<S> {
    id: StoreId,
    state: Arc<Mutex<S>>,
    subscribers: Arc<Mutex<Registry<S>>>,
    notifications: Arc<Mutex<NotificationQueue>>,
}

impl<S> Store<S> {
    /// Create a store holding `initial`.
    pub fn new(initial: S) -> Self {
        Self {
            id: StoreId(NEXT_STORE_ID.fetch_add(1, Ordering::Relaxed)),
            state: Arc::new(Mutex::new(initial)),
            subscribers: Arc::new(Mutex::new(Registry::new())),
            notifications: Arc::new(Mutex::new(NotificationQueue::new())),
        }
    }

    pub fn id(&self) -> StoreId {
        self.id
    }

    /// Project the current state without cloning it.
    pub fn select<T, F>(&self, selector: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let state = self.state.lock();
        selector(&state)
    }

    /// Register `listener` to be called whenever `selector`'s output changes.
    ///
    /// The selection is cached immediately from the current state, so the
    /// listener first fires on the next update that changes it. Outputs are
    /// compared with [`PartialEq`].
    pub fn subscribe<T, Sel, L>(&self, selector: Sel, listener: L) -> Unsubscribe<S>
    where
        T: PartialEq + Clone + Send + 'static,
        Sel: Fn(&S) -> T + Send + 'static,
        L: Fn(&T) + Send + Sync + 'static,
    {
        self.subscribe_with(selector, |a: &T, b: &T| a == b, listener)
    }

    /// Like [`subscribe`](Self::subscribe), with a custom equality.
    ///
    /// `equals(previous, next)` returning `true` suppresses the notification.
    pub fn subscribe_with<T, Sel, Equal, L>(
        &self,
        selector: Sel,
        equals: Equal,
        listener: L,
    ) -> Unsubscribe<S>
    where
        T: Clone + Send + 'static,
        Sel: Fn(&S) -> T + Send + 'static,
        Equal: Fn(&T, &T) -> bool + Send + 'static,
        L: Fn(&T) + Send + Sync + 'static,
    {
        // Holding the state lock keeps the cached selection in step with the
        // state the first poll will compare against.
        let state = self.state.lock();
        let initial = selector(&state);
        let mut subscribers = self.subscribers.lock();
        let id = subscribers.insert(Box::new(Selective::new(
            selector, equals, listener, initial,
        )));
        tracing::debug!(?id, total = subscribers.len(), "subscribed");

        Unsubscribe::new(id, &self.subscribers)
    }

    /// Replace the state and notify subscribers whose selection changed.
    pub fn set_state(&self, next: S) {
        self.update(move |_| next);
    }

    /// Compute the next state from the current one and notify subscribers
    /// whose selection changed.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&S) -> S,
    {
        self.transition(|state| Some(f(state)));
    }

    /// Conditionally compute the next state.
    ///
    /// When `f` returns `None` the state is left untouched and no subscriber is
    /// polled. Returns whether a new state was stored.
    pub fn transition<F>(&self, f: F) -> bool
    where
        F: FnOnce(&S) -> Option<S>,
    {
        {
            let mut state = self.state.lock();
            let Some(next) = f(&state) else {
                return false;
            };
            *state = next;

            let mut subscribers = self.subscribers.lock();
            let pending = subscribers.poll_all(&state);
            tracing::trace!(
                subscribers = subscribers.len(),
                notified = pending.len(),
                "state updated"
            );
            self.notifications.lock().enqueue(pending);
        }

        // Locks are released: listeners may call back into the store. Calls
        // queued by such nested updates run after the ones already waiting.
        NotificationQueue::drain(&self.notifications);
        true
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }

    /// Create a non-owning handle to this store.
    pub fn downgrade(&self) -> WeakStore<S> {
        WeakStore {
            id: self.id,
            state: Arc::downgrade(&self.state),
            subscribers: Arc::downgrade(&self.subscribers),
            notifications: Arc::downgrade(&self.notifications),
        }
    }
}

impl<S: Clone> Store<S> {
    /// Clone the current state.
    pub fn get_state(&self) -> S {
        self.state.lock().clone()
    }
}

impl<S: Default> Default for Store<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            state: Arc::clone(&self.state),
            subscribers: Arc::clone(&self.subscribers),
            notifications: Arc::clone(&self.notifications),
        }
    }
}

impl<S> core::fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Store")
            .field("id", &self.id)
            .field("subscribers", &self.subscriber_count())
            .finish_non_exhaustive()
    }
}

/// A [`Store`] handle that does not keep the state alive.
pub struct WeakStore<S> {
    id: StoreId,
    state: Weak<Mutex<S>>,
    subscribers: Weak<Mutex<Registry<S>>>,
    notifications: Weak<Mutex<NotificationQueue>>,
}

impl<S> WeakStore<S> {
    pub fn id(&self) -> StoreId {
        self.id
    }

    /// Recover a full handle if the store is still alive.
    pub fn upgrade(&self) -> Option<Store<S>> {
        Some(Store {
            id: self.id,
            state: self.state.upgrade()?,
            subscribers: self.subscribers.upgrade()?,
            notifications: self.notifications.upgrade()?,
        })
    }
}

impl<S> Clone for WeakStore<S> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            state: Weak::clone(&self.state),
            subscribers: Weak::clone(&self.subscribers),
            notifications: Weak::clone(&self.notifications),
        }
    }
}
