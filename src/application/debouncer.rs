// src/application/debouncer.rs
use crate::constants::DEBOUNCE_DELAY_MS;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{sleep, Instant};
use tracing::{debug, trace};

/// Turns a stream of raw keystrokes into committed search terms.
///
/// Every input restarts a timer; the latest text is committed once the
/// timer runs out with no further input. A keystroke arriving at the same
/// instant the timer expires counts as activity and restarts it.
#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    delay: Duration,
}

/// Input side of a running debouncer. Dropping it stops the timer task.
#[derive(Debug, Clone)]
pub struct DebounceHandle {
    tx: mpsc::UnboundedSender<String>,
}

impl DebounceHandle {
    /// Feed the current text of the search box. Returns false once the
    /// debouncer task has stopped.
    pub fn input(&self, text: impl Into<String>) -> bool {
        self.tx.send(text.into()).is_ok()
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Start the timer task on the current tokio runtime.
    pub fn spawn(self) -> (DebounceHandle, mpsc::UnboundedReceiver<String>) {
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let (commit_tx, commit_rx) = mpsc::unbounded_channel();
        tokio::spawn(run_timer(self.delay, input_rx, commit_tx));
        (DebounceHandle { tx: input_tx }, commit_rx)
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEBOUNCE_DELAY_MS))
    }
}

async fn run_timer(
    delay: Duration,
    mut input: mpsc::UnboundedReceiver<String>,
    commits: mpsc::UnboundedSender<String>,
) {
    let mut pending: Option<String> = None;
    let timer = sleep(delay);
    tokio::pin!(timer);

    loop {
        tokio::select! {
            biased;

            received = input.recv() => match received {
                Some(text) => {
                    trace!(%text, "Keystroke, restarting debounce timer");
                    pending = Some(text);
                    timer.as_mut().reset(Instant::now() + delay);
                }
                None => break,
            },
            () = &mut timer, if pending.is_some() => {
                if let Some(text) = pending.take() {
                    debug!(%text, "Committing search term");
                    if commits.send(text).is_err() {
                        break;
                    }
                }
            }
        }
    }
    debug!("Debouncer input closed");
}
