//! Countdown driver background task

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

use crate::{
    countdown::{CountdownEngine, NotificationScheduler},
    services::IntervalTicker,
    state::{Command, CountdownSnapshot},
};

/// A user command paired with the channel its resulting snapshot is sent on
pub type CommandRequest = (Command, oneshot::Sender<CountdownSnapshot>);

/// Background task that owns the engine and applies every command and tick
/// in order.
///
/// Exits when all command senders are dropped, resetting the engine first so
/// no alert outlives the countdown.
pub async fn countdown_task<N>(
    mut engine: CountdownEngine<N, IntervalTicker>,
    mut commands: mpsc::Receiver<CommandRequest>,
    mut ticks: mpsc::UnboundedReceiver<u64>,
    snapshots: watch::Sender<CountdownSnapshot>,
) where
    N: NotificationScheduler,
{
    info!(
        "Starting countdown driver task ({}s countdown)",
        engine.duration().as_secs()
    );
    snapshots.send_replace(engine.snapshot());

    loop {
        tokio::select! {
            Some(generation) = ticks.recv() => {
                if engine.tick_source().is_current(generation) {
                    engine.tick();
                } else {
                    debug!("Dropping stale tick from generation {}", generation);
                    continue;
                }
            }

            request = commands.recv() => {
                let Some((command, reply)) = request else {
                    info!("Command channel closed, stopping countdown driver");
                    engine.reset();
                    snapshots.send_replace(engine.snapshot());
                    break;
                };

                debug!("Applying command: {}", command.as_str());
                apply(&mut engine, command);

                if reply.send(engine.snapshot()).is_err() {
                    warn!("Caller dropped before receiving {} result", command.as_str());
                }
            }
        }

        snapshots.send_replace(engine.snapshot());
    }
}

fn apply<N>(engine: &mut CountdownEngine<N, IntervalTicker>, command: Command)
where
    N: NotificationScheduler,
{
    match command {
        Command::Start => engine.start(),
        Command::Pause => engine.pause(),
        Command::Resume => engine.resume(),
        Command::Reset => engine.reset(),
        Command::Toggle => engine.toggle(),
    }
}
