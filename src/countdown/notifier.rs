//! Notification scheduling seam used by the countdown engine

use std::time::Duration;

use crate::error::NotifyError;

/// Schedules the one-shot "timer finished" alert on behalf of the engine.
///
/// Implementations must never block: authorization and delivery happen
/// asynchronously, the engine only issues requests.
pub trait NotificationScheduler {
    /// Opaque token identifying one pending alert
    type Handle;

    /// Ask the platform for permission to show alerts. Fire-and-forget.
    fn request_authorization(&mut self);

    /// Schedule an alert to fire once after `delay`.
    ///
    /// Each call creates an independent pending alert.
    fn schedule(&mut self, delay: Duration) -> Result<Self::Handle, NotifyError>;

    /// Cancel a pending alert. Cancelling an alert that already fired or was
    /// already cancelled is a no-op.
    fn cancel(&mut self, handle: Self::Handle);
}
