//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::info;

use super::CountdownSnapshot;
use crate::{
    countdown::{CountdownEngine, NotificationScheduler},
    services::IntervalTicker,
    tasks::{countdown_task, CommandRequest},
};

/// Capacity of the command queue in front of the countdown driver
const COMMAND_QUEUE: usize = 32;

/// User-initiated countdown operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Resume,
    Reset,
    Toggle,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Pause => "pause",
            Command::Resume => "resume",
            Command::Reset => "reset",
            Command::Toggle => "toggle",
        }
    }
}

/// Shared state handed to HTTP handlers.
///
/// The engine itself lives in the countdown driver task; this only holds the
/// channels to reach it.
#[derive(Debug)]
pub struct AppState {
    /// Queue of commands for the countdown driver
    commands: mpsc::Sender<CommandRequest>,
    /// Latest snapshot published by the driver
    snapshots: watch::Receiver<CountdownSnapshot>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    /// Spawn the countdown driver for `engine` and build the state around it.
    ///
    /// `ticks` is the receiver paired with the engine's [`IntervalTicker`].
    pub fn new<N>(
        port: u16,
        host: String,
        engine: CountdownEngine<N, IntervalTicker>,
        ticks: mpsc::UnboundedReceiver<u64>,
    ) -> Self
    where
        N: NotificationScheduler + Send + 'static,
        N::Handle: Send,
    {
        let (commands_tx, commands_rx) = mpsc::channel(COMMAND_QUEUE);
        let (snapshot_tx, snapshot_rx) = watch::channel(engine.snapshot());

        tokio::spawn(countdown_task(engine, commands_rx, ticks, snapshot_tx));

        Self {
            commands: commands_tx,
            snapshots: snapshot_rx,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    /// Send a command to the driver and wait for the resulting snapshot
    pub async fn dispatch(&self, command: Command) -> Result<CountdownSnapshot, String> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.commands
            .send((command, reply_tx))
            .await
            .map_err(|e| format!("Countdown driver is not running: {}", e))?;

        let snapshot = reply_rx
            .await
            .map_err(|e| format!("Countdown driver dropped the {} request: {}", command.as_str(), e))?;

        // Update last action tracking
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(command.as_str().to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        info!("Applied {} -> {}", command.as_str(), snapshot.status_label());
        Ok(snapshot)
    }

    /// Get the most recently published countdown state
    pub fn get_countdown_state(&self) -> CountdownSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Watch countdown updates as the driver publishes them
    pub fn subscribe(&self) -> watch::Receiver<CountdownSnapshot> {
        self.snapshots.clone()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
