//! Console front end for the counter.
//!
//! Reads one control per line from stdin (`increment`, `reset`, `decrement`,
//! `increment by <n>`, or their shorthands) and prints the view whenever the
//! count changes. `quit` or end of input exits.

use std::io::{self, BufRead, Write};
use std::thread;

use anyhow::Context;
use tally::{
    create_counter_store, Control, CounterProps, CounterRuntime, Emitter, Renderer, UiEvent,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

struct ConsoleRenderer;

impl Renderer<CounterProps> for ConsoleRenderer {
    fn render(&mut self, props: CounterProps) {
        let labels: Vec<String> = props.controls().iter().map(Control::label).collect();
        let mut out = io::stdout().lock();
        writeln!(out, "\n{}\n[{}]", props.heading(), labels.join("] [")).ok();
        out.flush().ok();
    }
}

fn read_controls(emitter: Emitter<UiEvent>) -> anyhow::Result<()> {
    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("q") {
            break;
        }
        match trimmed.parse::<Control>() {
            Ok(control) => emitter.emit(UiEvent::Pressed(control)),
            Err(err) => {
                tracing::warn!(%err, "ignoring input");
                eprintln!("{err}");
            }
        }
    }
    emitter.emit(UiEvent::Close);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tally=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let store = create_counter_store();
    let mut runtime = CounterRuntime::new(store.clone(), ConsoleRenderer);

    let emitter = runtime.emitter();
    let reader = thread::spawn(move || {
        let result = read_controls(emitter.clone());
        if result.is_err() {
            emitter.emit(UiEvent::Close);
        }
        result
    });

    futures::executor::block_on(runtime.run());

    reader
        .join()
        .map_err(|_| anyhow::anyhow!("input thread panicked"))??;

    tracing::info!(count = store.get_state().count, "final count");
    Ok(())
}
