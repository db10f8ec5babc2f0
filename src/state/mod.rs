//! State management module
//! 
//! This module contains the countdown snapshot and the shared state handed to
//! HTTP handlers.

pub mod app_state;
pub mod countdown_state;

// Re-export main types
pub use app_state::{AppState, Command};
pub use countdown_state::CountdownSnapshot;
