//! Renderer abstraction for drawing props.

#[cfg(any(test, feature = "testing"))]
use portable_atomic_util::Arc;
#[cfg(any(test, feature = "testing"))]
use spin::Mutex;

/// The rendered surface.
///
/// [`render`](Self::render) is called once when the view mounts and again
/// each time the slice of state the view selected changes.
///
/// # Example
///
/// ```rust
/// use tally::{CounterProps, Renderer};
///
/// struct ConsoleRenderer;
///
/// impl Renderer<CounterProps> for ConsoleRenderer {
///     fn render(&mut self, props: CounterProps) {
///         println!("{}", props.heading());
///     }
/// }
/// ```
pub trait Renderer<Props> {
    fn render(&mut self, props: Props);
}

#[cfg(any(test, feature = "testing"))]
/// Renderer that captures every rendered props value for assertions.
///
/// Only available with the `testing` feature. Clones share the same capture
/// buffer, so hand one clone to the runtime and inspect through another.
///
/// # Example
///
/// ```rust
/// use tally::{create_counter_store, CounterRuntime, TestRenderer};
///
/// let renderer = TestRenderer::new();
/// let mut runtime = CounterRuntime::new(create_counter_store(), renderer.clone());
/// runtime.mount();
///
/// renderer.with_renders(|renders| {
///     assert_eq!(renders[0].heading(), "Count: 0");
///     (renders[0].on_increment)();
/// });
///
/// runtime.process_events();
/// assert_eq!(renderer.count(), 2);
/// ```
pub struct TestRenderer<Props> {
    renders: Arc<Mutex<Vec<Props>>>,
}

#[cfg(any(test, feature = "testing"))]
impl<Props> Clone for TestRenderer<Props> {
    fn clone(&self) -> Self {
        Self {
            renders: self.renders.clone(),
        }
    }
}

#[cfg(any(test, feature = "testing"))]
impl<Props> Renderer<Props> for TestRenderer<Props> {
    fn render(&mut self, props: Props) {
        self.renders.lock().push(props);
    }
}

#[cfg(any(test, feature = "testing"))]
impl<Props> Default for TestRenderer<Props> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "testing"))]
impl<Props> TestRenderer<Props> {
    pub fn new() -> Self {
        Self {
            renders: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of renders so far.
    pub fn count(&self) -> usize {
        self.renders.lock().len()
    }

    /// Access the captured renders with a closure.
    ///
    /// Props callbacks only queue events, so they are safe to invoke from
    /// inside the closure.
    pub fn with_renders<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Vec<Props>) -> R,
    {
        let renders = self.renders.lock();
        f(&renders)
    }
}
