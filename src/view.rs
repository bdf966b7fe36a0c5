//! The counter view: props derived from the selected count.

use crate::control::Control;
use crate::emitter::Emitter;

/// Events delivered to the runtime's event queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiEvent {
    /// A control was activated.
    Pressed(Control),
    /// The surface is closing; stop the event loop.
    Close,
}

/// View configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewConfig {
    /// Amount applied by the "Increment by" control.
    pub increment_by_amount: i64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            increment_by_amount: 5,
        }
    }
}

/// What the renderer draws.
///
/// Each callback queues exactly one control activation.
pub struct CounterProps {
    pub count: i64,
    pub increment_by_amount: i64,
    pub on_increment: Box<dyn Fn() + Send>,
    pub on_reset: Box<dyn Fn() + Send>,
    pub on_decrement: Box<dyn Fn() + Send>,
    pub on_increment_by: Box<dyn Fn() + Send>,
}

impl CounterProps {
    pub fn heading(&self) -> String {
        format!("Count: {}", self.count)
    }

    /// The controls in display order.
    pub fn controls(&self) -> [Control; 4] {
        [
            Control::Increment,
            Control::Reset,
            Control::Decrement,
            Control::IncrementBy(self.increment_by_amount),
        ]
    }
}

impl core::fmt::Debug for CounterProps {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CounterProps")
            .field("count", &self.count)
            .field("increment_by_amount", &self.increment_by_amount)
            .finish_non_exhaustive()
    }
}

/// Derives [`CounterProps`] from the selected count.
#[derive(Clone, Copy, Debug, Default)]
pub struct CounterView {
    config: ViewConfig,
}

impl CounterView {
    pub fn new(config: ViewConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> ViewConfig {
        self.config
    }

    pub fn props(&self, count: i64, emitter: &Emitter<UiEvent>) -> CounterProps {
        let amount = self.config.increment_by_amount;
        CounterProps {
            count,
            increment_by_amount: amount,
            on_increment: press(emitter, Control::Increment),
            on_reset: press(emitter, Control::Reset),
            on_decrement: press(emitter, Control::Decrement),
            on_increment_by: press(emitter, Control::IncrementBy(amount)),
        }
    }
}

fn press(emitter: &Emitter<UiEvent>, control: Control) -> Box<dyn Fn() + Send> {
    let emitter = emitter.clone();
    Box::new(move || emitter.emit(UiEvent::Pressed(control)))
}
