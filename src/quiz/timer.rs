use std::time::Duration;

use log::debug;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

struct Fired<K> {
    generation: u64,
    kind: K,
}

/// Cancellable one-shot alarm.
///
/// At most one alarm is pending at a time: scheduling a new one cancels the
/// previous, and dropping the timer cancels whatever is left. An alarm that
/// already reached the channel before its cancellation is recognised by its
/// generation and discarded in [`Timer::fired`].
pub struct Timer<K> {
    tx: mpsc::UnboundedSender<Fired<K>>,
    rx: mpsc::UnboundedReceiver<Fired<K>>,
    pending: Option<JoinHandle<()>>,
    generation: u64,
}

impl<K: Send + 'static> Timer<K> {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx,
            pending: None,
            generation: 0,
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, delay: Duration, kind: K) {
        self.cancel();

        let generation = self.generation;
        let tx = self.tx.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver lives as long as the timer, a failed send means it is gone
            let _ = tx.send(Fired { generation, kind });
        }));
    }

    pub fn cancel(&mut self) {
        self.generation += 1;
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Waits for the current alarm. Pending forever when nothing is scheduled.
    ///
    /// Cancel-safe, so it can sit in a `tokio::select!` branch.
    pub async fn fired(&mut self) -> Option<K> {
        loop {
            let fired = self.rx.recv().await?;
            if fired.generation == self.generation {
                self.pending = None;
                return Some(fired.kind);
            }
            debug!("Discarding a superseded alarm");
        }
    }
}

impl<K: Send + 'static> Default for Timer<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Drop for Timer<K> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
