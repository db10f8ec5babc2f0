//! Countdown core
//!
//! The engine and the two seams it is driven through: a tick source that
//! advances it and a scheduler that owns its expiry alert.

pub mod engine;
pub mod notifier;
pub mod ticks;

pub use engine::{CountdownEngine, PendingNotification};
pub use notifier::NotificationScheduler;
pub use ticks::TickSource;
