//! Configuration and CLI argument handling

use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "focus-timer")]
#[command(about = "A countdown timer service with a matching expiry alert")]
#[command(version)]
pub struct Config {
    /// Port to bind the control API to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Countdown length in seconds
    #[arg(short, long, default_value = "1500", allow_negative_numbers = true)]
    pub duration: i64,

    /// Command used to show the desktop alert
    #[arg(long, default_value = "notify-send")]
    pub notify_command: String,

    /// Only log the alert instead of showing a desktop notification
    #[arg(long)]
    pub no_notify: bool,

    /// Start the countdown as soon as the server is up
    #[arg(long)]
    pub autostart: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["focus-timer"]).unwrap();
        assert_eq!(config.duration, 1500);
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.log_level(), "info");
        assert!(!config.no_notify);
        assert!(!config.autostart);
    }

    #[test]
    fn accepts_negative_duration_for_engine_to_reject() {
        let config = Config::try_parse_from(["focus-timer", "--duration", "-5", "-v"]).unwrap();
        assert_eq!(config.duration, -5);
        assert_eq!(config.log_level(), "debug");
    }
}
