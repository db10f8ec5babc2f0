//! Focus Timer - a countdown timer whose expiry alert always matches the
//! visible countdown
//! 
//! The [`countdown`] module holds the engine and the seams it is driven
//! through. The remaining modules host it: a tokio tick source, a desktop
//! alert scheduler, a driver task that serialises every mutation, and an
//! HTTP control API.

pub mod config;
pub mod error;
pub mod countdown;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use countdown::{CountdownEngine, NotificationScheduler, TickSource};
pub use error::{EngineError, NotifyError};
pub use state::{AppState, Command, CountdownSnapshot};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
