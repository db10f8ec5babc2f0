//! Background tasks module
//! 
//! This module contains background tasks that run alongside the HTTP server.

pub mod countdown_driver;

// Re-export main functions
pub use countdown_driver::{countdown_task, CommandRequest};
