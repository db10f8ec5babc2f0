//! Error types for the countdown core

use thiserror::Error;

/// Errors raised while building a countdown engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The requested countdown length was below zero
    #[error("countdown duration must not be negative (got {0}s)")]
    NegativeDuration(i64),
}

/// Errors a notification scheduler may report when asked to schedule an alert.
///
/// These never escape the engine: a failed schedule leaves the countdown
/// running without a pending alert.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// No async runtime was available to host the alert
    #[error("no tokio runtime available to schedule the alert")]
    NoRuntime,

    /// The notification backend refused the request
    #[error("notification backend rejected the request: {0}")]
    Rejected(String),
}
