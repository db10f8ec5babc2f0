//! Tokio interval tick source

use std::time::Duration;
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{interval_at, Instant},
};
use tracing::debug;

use crate::countdown::TickSource;

/// One tick per second, as the countdown counts whole seconds
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Tick source backed by a spawned `tokio::time::interval` task.
///
/// Every tick is sent as the generation number of the subscription that
/// produced it, so the receiver can drop ticks that were already queued when
/// the subscription was halted.
#[derive(Debug)]
pub struct IntervalTicker {
    tx: mpsc::UnboundedSender<u64>,
    period: Duration,
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl IntervalTicker {
    /// Create a halted ticker and the receiving end of its tick channel
    pub fn new() -> (Self, mpsc::UnboundedReceiver<u64>) {
        Self::with_period(TICK_PERIOD)
    }

    pub fn with_period(period: Duration) -> (Self, mpsc::UnboundedReceiver<u64>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let ticker = Self {
            tx,
            period,
            generation: 0,
            task: None,
        };
        (ticker, rx)
    }

    /// Whether a received tick belongs to the live subscription
    pub fn is_current(&self, generation: u64) -> bool {
        self.task.is_some() && generation == self.generation
    }

    pub fn is_active(&self) -> bool {
        self.task.is_some()
    }
}

impl TickSource for IntervalTicker {
    fn begin(&mut self) {
        if self.task.is_some() {
            return;
        }

        self.generation += 1;
        let generation = self.generation;
        let period = self.period;
        let tx = self.tx.clone();

        debug!("Subscribing tick source (generation {})", generation);
        self.task = Some(tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if tx.send(generation).is_err() {
                    break;
                }
            }
        }));
    }

    fn halt(&mut self) {
        if let Some(task) = self.task.take() {
            debug!("Halting tick source (generation {})", self.generation);
            task.abort();
        }
    }
}

impl Drop for IntervalTicker {
    fn drop(&mut self) {
        self.halt();
    }
}
