//! Host-side collaborators of the countdown engine
//! 
//! This module contains the tokio-backed tick source and the desktop alert
//! scheduler the engine is driven through at runtime.

pub mod notifications;
pub mod ticker;

// Re-export main types
pub use notifications::{DesktopNotifier, NotificationId};
pub use ticker::IntervalTicker;
