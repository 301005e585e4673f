//! Debounced values.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::AbortHandle;
use tokio::time::{sleep_until, Instant};

/// Delays a rapidly-changing value until it has been quiet for `window`.
///
/// Every [`update`](Debouncer::update) cancels the pending timer and starts a
/// new one, so only the last value of a burst is ever published. Dropping the
/// debouncer cancels the pending timer.
///
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    output: Arc<watch::Sender<T>>,
    pending: Option<AbortHandle>,
}

impl<T> Debouncer<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Create a debouncer whose output starts at `initial`.
    pub fn new(initial: T, window: Duration) -> Self {
        let (output, _) = watch::channel(initial);
        Self {
            window,
            output: Arc::new(output),
            pending: None,
        }
    }

    /// Feed a new input value.
    pub fn update(&mut self, value: T) {
        self.cancel();

        let deadline = Instant::now() + self.window;
        let output = Arc::clone(&self.output);
        let timer = tokio::spawn(async move {
            sleep_until(deadline).await;
            output.send_if_modified(|current| {
                if *current == value {
                    false
                } else {
                    *current = value;
                    true
                }
            });
        });
        self.pending = Some(timer.abort_handle());
    }

    /// Receiver of the debounced output.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.output.subscribe()
    }

    /// The current debounced output.
    pub fn current(&self) -> T {
        self.output.borrow().clone()
    }

    /// Whether a timer is waiting to publish.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|timer| !timer.is_finished())
    }

    fn cancel(&mut self) {
        if let Some(timer) = self.pending.take() {
            timer.abort();
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(timer) = self.pending.take() {
            timer.abort();
        }
    }
}
