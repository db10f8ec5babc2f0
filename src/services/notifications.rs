//! Desktop alert delivery for finished countdowns

use std::{
    collections::HashMap,
    fmt,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::{process::Command, runtime::Handle as RuntimeHandle, task::JoinHandle, time::sleep};
use tracing::{debug, info, warn};

use crate::{countdown::NotificationScheduler, error::NotifyError};

const ALERT_TITLE: &str = "Timer Done!";
const ALERT_BODY: &str = "Your focus countdown has finished.";

/// Opaque identifier of one scheduled alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "alert-{}", self.0)
    }
}

/// Alert scheduler that sleeps on a tokio task and then runs an external
/// notifier command such as `notify-send`.
///
/// Until the authorization probe succeeds, alerts are only logged.
#[derive(Debug)]
pub struct DesktopNotifier {
    command: Option<String>,
    authorized: Arc<AtomicBool>,
    pending: HashMap<NotificationId, JoinHandle<()>>,
    next_id: u64,
}

impl DesktopNotifier {
    /// Create a notifier that delivers through `command`
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: Some(command.into()),
            authorized: Arc::new(AtomicBool::new(false)),
            pending: HashMap::new(),
            next_id: 0,
        }
    }

    /// Create a notifier that only logs alerts
    pub fn log_only() -> Self {
        Self {
            command: None,
            authorized: Arc::new(AtomicBool::new(false)),
            pending: HashMap::new(),
            next_id: 0,
        }
    }

    pub fn is_authorized(&self) -> bool {
        self.authorized.load(Ordering::SeqCst)
    }

    /// Number of alerts scheduled and not yet delivered or cancelled
    pub fn pending_count(&self) -> usize {
        self.pending.values().filter(|task| !task.is_finished()).count()
    }
}

impl NotificationScheduler for DesktopNotifier {
    type Handle = NotificationId;

    fn request_authorization(&mut self) {
        let Some(command) = self.command.clone() else {
            info!("Desktop notifications disabled, alerts will only be logged");
            return;
        };
        let Ok(runtime) = RuntimeHandle::try_current() else {
            warn!("No runtime available to check notifier '{}'", command);
            return;
        };

        let authorized = Arc::clone(&self.authorized);
        runtime.spawn(async move {
            match check_notifier_available(&command).await {
                Ok(()) => {
                    authorized.store(true, Ordering::SeqCst);
                    info!("Desktop notifications enabled via '{}'", command);
                }
                Err(e) => warn!("{}", e),
            }
        });
    }

    fn schedule(&mut self, delay: Duration) -> Result<NotificationId, NotifyError> {
        let runtime = RuntimeHandle::try_current().map_err(|_| NotifyError::NoRuntime)?;

        self.pending.retain(|_, task| !task.is_finished());

        self.next_id += 1;
        let id = NotificationId(self.next_id);
        let command = self.command.clone();
        let authorized = Arc::clone(&self.authorized);

        let task = runtime.spawn(async move {
            sleep(delay).await;
            info!("{} ({})", ALERT_TITLE, id);

            if !authorized.load(Ordering::SeqCst) {
                debug!("Notifier not authorized, {} delivered to log only", id);
                return;
            }
            if let Some(command) = command {
                if let Err(e) = deliver_alert(&command).await {
                    warn!("Failed to deliver {}: {}", id, e);
                }
            }
        });

        debug!("Scheduled {} in {}s", id, delay.as_secs());
        self.pending.insert(id, task);
        Ok(id)
    }

    fn cancel(&mut self, handle: NotificationId) {
        match self.pending.remove(&handle) {
            Some(task) => {
                task.abort();
                debug!("Cancelled {}", handle);
            }
            None => debug!("{} already delivered or cancelled", handle),
        }
    }
}

impl Drop for DesktopNotifier {
    fn drop(&mut self) {
        for (_, task) in self.pending.drain() {
            task.abort();
        }
    }
}

/// Check that the notifier command can be executed
pub async fn check_notifier_available(command: &str) -> Result<(), String> {
    Command::new(command)
        .arg("--version")
        .output()
        .await
        .map_err(|e| format!("Notifier '{}' is not available: {}", command, e))?;

    Ok(())
}

/// Show the finished-countdown alert through the notifier command
pub async fn deliver_alert(command: &str) -> Result<(), String> {
    let output = Command::new(command)
        .args([ALERT_TITLE, ALERT_BODY])
        .output()
        .await
        .map_err(|e| format!("Failed to execute {}: {}", command, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("{} failed: {}", command, stderr));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_outside_runtime_fails() {
        let mut notifier = DesktopNotifier::log_only();
        assert_eq!(
            notifier.schedule(Duration::from_secs(1)),
            Err(NotifyError::NoRuntime)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn handles_are_distinct() {
        let mut notifier = DesktopNotifier::log_only();
        let first = notifier.schedule(Duration::from_secs(5)).unwrap();
        let second = notifier.schedule(Duration::from_secs(5)).unwrap();

        assert_ne!(first, second);
        assert_eq!(notifier.pending_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_is_idempotent() {
        let mut notifier = DesktopNotifier::log_only();
        let id = notifier.schedule(Duration::from_secs(5)).unwrap();

        notifier.cancel(id);
        notifier.cancel(id);
        assert_eq!(notifier.pending_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn alert_completes_after_delay() {
        let mut notifier = DesktopNotifier::log_only();
        let id = notifier.schedule(Duration::from_secs(3)).unwrap();

        sleep(Duration::from_secs(4)).await;
        assert_eq!(notifier.pending_count(), 0);

        notifier.cancel(id);
    }

    #[tokio::test]
    async fn log_only_notifier_never_authorizes() {
        let mut notifier = DesktopNotifier::log_only();
        notifier.request_authorization();
        assert!(!notifier.is_authorized());
    }
}
