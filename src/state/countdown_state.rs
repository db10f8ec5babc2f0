//! Countdown snapshot published to the presentation layer

use serde::{Deserialize, Serialize};

/// Read-only copy of the countdown's derived state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountdownSnapshot {
    pub running: bool,
    pub finished: bool,
    pub duration_secs: u64,
    pub elapsed_secs: u64,
    pub remaining_secs: u64,
    pub fraction_remaining: f64,
    pub notification_pending: bool,
}

impl CountdownSnapshot {
    /// Snapshot of a countdown that has not started yet
    pub fn idle(duration_secs: u64) -> Self {
        Self {
            running: false,
            finished: duration_secs == 0,
            duration_secs,
            elapsed_secs: 0,
            remaining_secs: duration_secs,
            fraction_remaining: if duration_secs == 0 { 0.0 } else { 1.0 },
            notification_pending: false,
        }
    }

    /// Short status label used in API responses
    pub fn status_label(&self) -> &'static str {
        if self.running {
            "running"
        } else if self.finished {
            "finished"
        } else {
            "stopped"
        }
    }

    /// Remaining time formatted as `MM:SS`
    pub fn remaining_display(&self) -> String {
        format!("{:02}:{:02}", self.remaining_secs / 60, self.remaining_secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_snapshot_of_zero_length_timer_is_finished() {
        let snapshot = CountdownSnapshot::idle(0);
        assert!(snapshot.finished);
        assert_eq!(snapshot.fraction_remaining, 0.0);
        assert_eq!(snapshot.status_label(), "finished");
    }

    #[test]
    fn remaining_display_pads_minutes_and_seconds() {
        let mut snapshot = CountdownSnapshot::idle(1500);
        assert_eq!(snapshot.remaining_display(), "25:00");
        snapshot.remaining_secs = 65;
        assert_eq!(snapshot.remaining_display(), "01:05");
        snapshot.remaining_secs = 0;
        assert_eq!(snapshot.remaining_display(), "00:00");
    }
}
