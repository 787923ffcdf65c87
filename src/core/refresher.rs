//! Background task that keeps the price board moving.

use crate::core::board::PriceBoard;
use rand::Rng;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Handle to a running refresh timer. Dropping it stops the timer.
pub struct Refresher {
    receiver: watch::Receiver<PriceBoard>,
    task: Option<JoinHandle<()>>,
}

impl Refresher {
    /// Publishes a refreshed snapshot every `interval`, first one a full
    /// interval after start. Ticks are never closer than `interval`.
    pub fn start<R>(board: PriceBoard, interval: Duration, max_pct: f64, mut rng: R) -> Self
    where
        R: Rng + Send + 'static,
    {
        let (sender, receiver) = watch::channel(board);
        info!(?interval, max_pct, "Starting price refresher");

        let task = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let next = sender.borrow().refreshed(max_pct, &mut rng);
                debug!(tick = next.tick, "Publishing refreshed prices");
                if sender.send(next).is_err() {
                    debug!("No subscribers left, refresher exiting");
                    break;
                }
            }
        });

        Self {
            receiver,
            task: Some(task),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<PriceBoard> {
        self.receiver.clone()
    }

    /// Latest published snapshot.
    pub fn current(&self) -> PriceBoard {
        self.receiver.borrow().clone()
    }

    /// Kills the task without going through `stop`, as a crash would.
    #[cfg(test)]
    pub(crate) fn abort_for_test(&self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }

    /// Stops the timer and waits until the task has gone away. No snapshot is
    /// published after this returns.
    pub async fn stop(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
            info!("Price refresher stopped");
        }
    }
}

impl Drop for Refresher {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
