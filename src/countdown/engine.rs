//! Countdown engine implementation.
//!
//! The engine is a tick-counting state machine. It owns no threads: a
//! [`TickSource`] subscription calls [`CountdownEngine::tick`] once per second
//! while the countdown runs, and a [`NotificationScheduler`] holds the single
//! "timer finished" alert that matches the visible countdown.
//!
//! ## State Transitions
//!
//! ```text
//!            start / resume / toggle
//!   Stopped ────────────────────────► Running(alert)
//!      ▲                                  │
//!      └──── pause / reset / toggle ──────┤
//!      └──── last tick (completion) ──────┘
//! ```
//!
//! Elapsed time is only meaningful for an uninterrupted process: if the host
//! is suspended, ticks stop and the countdown falls behind wall-clock time.

use std::{mem, time::Duration};

use tracing::{debug, info, warn};

use super::{notifier::NotificationScheduler, ticks::TickSource};
use crate::{error::EngineError, state::CountdownSnapshot};

/// Whether an expiry alert is currently scheduled for this run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingNotification<H> {
    NotPending,
    Pending(H),
}

/// Lifecycle phase. The alert handle only exists inside `Running`.
#[derive(Debug)]
enum Phase<H> {
    Stopped,
    Running(PendingNotification<H>),
}

/// Countdown state machine over an injected alert scheduler and tick source.
pub struct CountdownEngine<N: NotificationScheduler, T: TickSource> {
    duration_secs: u64,
    elapsed_secs: u64,
    phase: Phase<N::Handle>,
    authorization_requested: bool,
    notifier: N,
    ticks: T,
}

impl<N: NotificationScheduler, T: TickSource> CountdownEngine<N, T> {
    /// Create a stopped engine counting down `duration_secs` seconds.
    ///
    /// Negative durations are rejected.
    pub fn new(duration_secs: i64, notifier: N, ticks: T) -> Result<Self, EngineError> {
        let duration_secs =
            u64::try_from(duration_secs).map_err(|_| EngineError::NegativeDuration(duration_secs))?;

        Ok(Self {
            duration_secs,
            elapsed_secs: 0,
            phase: Phase::Stopped,
            authorization_requested: false,
            notifier,
            ticks,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn remaining_secs(&self) -> u64 {
        self.duration_secs.saturating_sub(self.elapsed_secs)
    }

    pub fn time_remaining(&self) -> Duration {
        Duration::from_secs(self.remaining_secs())
    }

    /// 1.0 .. 0.0 share of the countdown still to go. A zero-length countdown
    /// reports 0.0.
    pub fn fraction_remaining(&self) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        self.remaining_secs() as f64 / self.duration_secs as f64
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running(_))
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_secs() == 0
    }

    pub fn has_pending_notification(&self) -> bool {
        matches!(self.phase, Phase::Running(PendingNotification::Pending(_)))
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn tick_source(&self) -> &T {
        &self.ticks
    }

    pub fn snapshot(&self) -> CountdownSnapshot {
        CountdownSnapshot {
            running: self.is_running(),
            finished: self.is_finished(),
            duration_secs: self.duration_secs,
            elapsed_secs: self.elapsed_secs,
            remaining_secs: self.remaining_secs(),
            fraction_remaining: self.fraction_remaining(),
            notification_pending: self.has_pending_notification(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start counting from the current elapsed position and schedule the
    /// expiry alert for whatever time is left.
    pub fn start(&mut self) {
        if self.is_running() {
            debug!("Countdown already running, ignoring start");
            return;
        }
        if self.is_finished() {
            debug!("Countdown has no time remaining, ignoring start");
            return;
        }

        if !self.authorization_requested {
            self.notifier.request_authorization();
            self.authorization_requested = true;
        }

        self.ticks.begin();

        let delay = self.time_remaining();
        let pending = match self.notifier.schedule(delay) {
            Ok(handle) => PendingNotification::Pending(handle),
            Err(e) => {
                warn!("Failed to schedule expiry alert, continuing without it: {}", e);
                PendingNotification::NotPending
            }
        };
        self.phase = Phase::Running(pending);

        info!(
            "Countdown started with {}s of {}s remaining",
            delay.as_secs(),
            self.duration_secs
        );
    }

    /// Same as [`start`](Self::start); continues from where a pause left off.
    pub fn resume(&mut self) {
        self.start();
    }

    /// Stop counting and withdraw the pending alert.
    pub fn pause(&mut self) {
        if !self.stop() {
            debug!("Countdown not running, ignoring pause");
            return;
        }
        info!("Countdown paused with {}s remaining", self.remaining_secs());
    }

    /// Stop counting, withdraw the pending alert and rewind to the full
    /// duration.
    pub fn reset(&mut self) {
        self.stop();
        self.elapsed_secs = 0;
        info!("Countdown reset to {}s", self.duration_secs);
    }

    pub fn toggle(&mut self) {
        if self.is_running() {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Advance the countdown by one second. Ignored unless running.
    pub fn tick(&mut self) {
        if !self.is_running() {
            debug!("Ignoring tick while stopped");
            return;
        }

        self.elapsed_secs = (self.elapsed_secs + 1).min(self.duration_secs);
        debug!("Tick: {}s remaining", self.remaining_secs());

        if self.is_finished() {
            self.complete();
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Halt ticks and cancel the alert. Returns whether the engine was running.
    fn stop(&mut self) -> bool {
        match mem::replace(&mut self.phase, Phase::Stopped) {
            Phase::Running(pending) => {
                self.ticks.halt();
                if let PendingNotification::Pending(handle) = pending {
                    self.notifier.cancel(handle);
                }
                true
            }
            Phase::Stopped => false,
        }
    }

    /// The alert for this run is due now, so its handle is dropped rather
    /// than cancelled.
    fn complete(&mut self) {
        self.ticks.halt();
        if let Phase::Running(PendingNotification::Pending(_)) =
            mem::replace(&mut self.phase, Phase::Stopped)
        {
            debug!("Releasing expiry alert handle at completion");
        }
        info!("Countdown finished after {}s", self.duration_secs);
    }
}
