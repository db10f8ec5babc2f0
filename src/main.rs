//! Focus Timer - a countdown timer service with a matching expiry alert
//! 
//! This is the main entry point for the focus-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use focus_timer::{
    api::create_router,
    config::Config,
    countdown::CountdownEngine,
    services::{DesktopNotifier, IntervalTicker},
    state::{AppState, Command},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("focus_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting focus-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, duration={}s",
          config.host, config.port, config.duration);

    let notifier = if config.no_notify {
        DesktopNotifier::log_only()
    } else {
        DesktopNotifier::new(config.notify_command.clone())
    };
    let (ticker, ticks) = IntervalTicker::new();
    let engine = CountdownEngine::new(config.duration, notifier, ticker)?;

    // Create application state, spawning the countdown driver
    let state = Arc::new(AppState::new(config.port, config.host.clone(), engine, ticks));

    if config.autostart {
        state.dispatch(Command::Start).await.map_err(anyhow::Error::msg)?;
    }

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start  - Start the countdown");
    info!("  POST /pause  - Pause the countdown");
    info!("  POST /resume - Resume a paused countdown");
    info!("  POST /reset  - Reset the countdown");
    info!("  POST /toggle - Start or pause");
    info!("  GET  /status - Countdown status");
    info!("  GET  /health - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    // Withdraw any pending alert before exiting
    if let Err(e) = state.dispatch(Command::Reset).await {
        tracing::warn!("Failed to reset countdown on shutdown: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}
