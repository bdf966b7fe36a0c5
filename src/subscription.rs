//! Selector-based subscription registry.

use std::collections::VecDeque;

use portable_atomic_util::{Arc, Weak};
use spin::Mutex;

/// Identifies a single subscription within a [`Store`](crate::Store).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// A listener call that has been decided but not yet run.
///
/// Produced while the store's locks are held and invoked once they are released.
pub(crate) type Pending = Box<dyn FnOnce() + Send>;

/// Type-erased subscriber over the full state `S`.
pub(crate) trait Subscriber<S>: Send {
    /// Compare the selection of `next` with the cached one.
    ///
    /// Returns the listener call to make when the selection changed. The cache
    /// is updated before returning.
    fn poll(&mut self, next: &S) -> Option<Pending>;
}

/// A subscriber that projects the state through `selector` and compares the
/// projection with `equals`.
pub(crate) struct Selective<T, Sel, Equal, L> {
    selector: Sel,
    equals: Equal,
    listener: Arc<L>,
    last: T,
}

impl<T, Sel, Equal, L> Selective<T, Sel, Equal, L> {
    pub(crate) fn new(selector: Sel, equals: Equal, listener: L, initial: T) -> Self {
        Self {
            selector,
            equals,
            listener: Arc::new(listener),
            last: initial,
        }
    }
}

impl<S, T, Sel, Equal, L> Subscriber<S> for Selective<T, Sel, Equal, L>
where
    T: Clone + Send + 'static,
    Sel: Fn(&S) -> T + Send,
    Equal: Fn(&T, &T) -> bool + Send,
    L: Fn(&T) + Send + Sync + 'static,
{
    fn poll(&mut self, next: &S) -> Option<Pending> {
        let selected = (self.selector)(next);
        if (self.equals)(&self.last, &selected) {
            return None;
        }

        self.last = selected.clone();
        let listener = Arc::clone(&self.listener);
        Some(Box::new(move || listener(&selected)))
    }
}

struct Entry<S> {
    id: SubscriptionId,
    subscriber: Box<dyn Subscriber<S>>,
}

/// Ordered list of live subscriptions.
pub(crate) struct Registry<S> {
    next_id: u64,
    entries: Vec<Entry<S>>,
}

impl<S> Registry<S> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub(crate) fn insert(&mut self, subscriber: Box<dyn Subscriber<S>>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, subscriber });
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Poll every subscriber in registration order.
    pub(crate) fn poll_all(&mut self, next: &S) -> Vec<Pending> {
        self.entries
            .iter_mut()
            .filter_map(|entry| entry.subscriber.poll(next))
            .collect()
    }
}

/// Store-wide FIFO of listener calls.
///
/// Updates made from inside a listener append their calls behind the ones
/// still waiting, so every subscriber hears about states in the order they
/// were stored and its last call carries its current selection.
pub(crate) struct NotificationQueue {
    pending: VecDeque<Pending>,
    draining: bool,
}

impl NotificationQueue {
    pub(crate) fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            draining: false,
        }
    }

    pub(crate) fn enqueue(&mut self, calls: Vec<Pending>) {
        self.pending.extend(calls);
    }

    /// Run queued calls until the queue is empty.
    ///
    /// Only the outermost caller drains; a nested call returns immediately and
    /// leaves its calls to that caller.
    pub(crate) fn drain(queue: &Mutex<NotificationQueue>) {
        {
            let mut queue = queue.lock();
            if queue.draining {
                return;
            }
            queue.draining = true;
        }
        let _draining = DrainGuard(queue);

        loop {
            let next = queue.lock().pending.pop_front();
            let Some(notify) = next else {
                break;
            };
            notify();
        }
    }
}

/// Clears the draining flag even if a listener panics.
struct DrainGuard<'a>(&'a Mutex<NotificationQueue>);

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        self.0.lock().draining = false;
    }
}

/// Handle returned by [`Store::subscribe`](crate::Store::subscribe).
///
/// Dropping the handle does not cancel the subscription; call
/// [`unsubscribe`](Self::unsubscribe) to deregister the listener.
pub struct Unsubscribe<S> {
    id: SubscriptionId,
    registry: Weak<Mutex<Registry<S>>>,
}

impl<S> Unsubscribe<S> {
    pub(crate) fn new(id: SubscriptionId, registry: &Arc<Mutex<Registry<S>>>) -> Self {
        Self {
            id,
            registry: Arc::downgrade(registry),
        }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Deregister the listener.
    ///
    /// Returns `false` if the subscription was already gone, including when the
    /// store itself has been dropped.
    pub fn unsubscribe(self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let removed = registry.lock().remove(self.id);
        tracing::debug!(id = self.id.0, removed, "unsubscribed");
        removed
    }
}

impl<S> core::fmt::Debug for Unsubscribe<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Unsubscribe").field("id", &self.id).finish()
    }
}
