//! Driver task behaviour against a real tick source and paused tokio time

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use focus_timer::{
    countdown::{CountdownEngine, NotificationScheduler},
    error::NotifyError,
    services::IntervalTicker,
    state::{AppState, Command},
};
use tokio::time::sleep;

#[derive(Debug, Default)]
struct Calls {
    authorizations: usize,
    scheduled: Vec<Duration>,
    cancelled: Vec<usize>,
}

struct RecordingScheduler(Arc<Mutex<Calls>>);

impl NotificationScheduler for RecordingScheduler {
    type Handle = usize;

    fn request_authorization(&mut self) {
        self.0.lock().unwrap().authorizations += 1;
    }

    fn schedule(&mut self, delay: Duration) -> Result<usize, NotifyError> {
        let mut calls = self.0.lock().unwrap();
        calls.scheduled.push(delay);
        Ok(calls.scheduled.len())
    }

    fn cancel(&mut self, handle: usize) {
        self.0.lock().unwrap().cancelled.push(handle);
    }
}

fn spawn_timer(duration_secs: i64) -> (AppState, Arc<Mutex<Calls>>) {
    let calls = Arc::new(Mutex::new(Calls::default()));
    let (ticker, ticks) = IntervalTicker::new();
    let engine =
        CountdownEngine::new(duration_secs, RecordingScheduler(Arc::clone(&calls)), ticker).unwrap();
    let state = AppState::new(0, "127.0.0.1".to_string(), engine, ticks);
    (state, calls)
}

#[tokio::test(start_paused = true)]
async fn pause_holds_remaining_time_and_resume_reschedules() {
    let (state, calls) = spawn_timer(10);

    let snapshot = state.dispatch(Command::Start).await.unwrap();
    assert!(snapshot.running);
    assert!(snapshot.notification_pending);

    sleep(Duration::from_millis(3500)).await;
    assert_eq!(state.get_countdown_state().remaining_secs, 7);

    let snapshot = state.dispatch(Command::Pause).await.unwrap();
    assert!(!snapshot.running);
    assert_eq!(calls.lock().unwrap().cancelled, vec![1]);

    sleep(Duration::from_secs(5)).await;
    assert_eq!(state.get_countdown_state().remaining_secs, 7);

    state.dispatch(Command::Resume).await.unwrap();
    assert_eq!(
        calls.lock().unwrap().scheduled,
        vec![Duration::from_secs(10), Duration::from_secs(7)]
    );

    sleep(Duration::from_millis(7500)).await;
    let snapshot = state.get_countdown_state();
    assert_eq!(snapshot.remaining_secs, 0);
    assert!(snapshot.finished);
    assert!(!snapshot.running);
    assert!(!snapshot.notification_pending);

    sleep(Duration::from_secs(3)).await;
    assert_eq!(state.get_countdown_state().elapsed_secs, 10);

    let calls = calls.lock().unwrap();
    assert_eq!(calls.cancelled, vec![1]);
    assert_eq!(calls.authorizations, 1);
}

#[tokio::test(start_paused = true)]
async fn repeated_start_keeps_one_alert_and_one_tick_stream() {
    let (state, calls) = spawn_timer(30);

    state.dispatch(Command::Start).await.unwrap();
    state.dispatch(Command::Start).await.unwrap();

    sleep(Duration::from_millis(2500)).await;
    assert_eq!(state.get_countdown_state().elapsed_secs, 2);
    assert_eq!(calls.lock().unwrap().scheduled.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn quick_pause_and_restart_is_not_double_counted() {
    let (state, _calls) = spawn_timer(30);

    state.dispatch(Command::Start).await.unwrap();
    sleep(Duration::from_millis(1500)).await;
    state.dispatch(Command::Toggle).await.unwrap();
    state.dispatch(Command::Toggle).await.unwrap();

    sleep(Duration::from_millis(1200)).await;
    assert_eq!(state.get_countdown_state().elapsed_secs, 2);
}

#[tokio::test(start_paused = true)]
async fn reset_rewinds_and_withdraws_alert() {
    let (state, calls) = spawn_timer(10);

    state.dispatch(Command::Start).await.unwrap();
    sleep(Duration::from_millis(4500)).await;

    let snapshot = state.dispatch(Command::Reset).await.unwrap();
    assert_eq!(snapshot.elapsed_secs, 0);
    assert_eq!(snapshot.remaining_secs, 10);
    assert!(!snapshot.running);
    assert_eq!(calls.lock().unwrap().cancelled, vec![1]);

    sleep(Duration::from_secs(3)).await;
    assert_eq!(state.get_countdown_state().elapsed_secs, 0);
}

#[tokio::test(start_paused = true)]
async fn reset_before_start_makes_no_cancel_call() {
    let (state, calls) = spawn_timer(10);

    let snapshot = state.dispatch(Command::Reset).await.unwrap();
    assert_eq!(snapshot.elapsed_secs, 0);
    assert!(calls.lock().unwrap().cancelled.is_empty());
}

#[tokio::test(start_paused = true)]
async fn dropping_state_stops_driver_and_cancels_alert() {
    let (state, calls) = spawn_timer(10);
    state.dispatch(Command::Start).await.unwrap();

    let mut updates = state.subscribe();
    drop(state);
    while updates.changed().await.is_ok() {}

    assert!(!updates.borrow().running);
    assert_eq!(calls.lock().unwrap().cancelled, vec![1]);
}

#[tokio::test(start_paused = true)]
async fn zero_length_countdown_never_runs() {
    let (state, calls) = spawn_timer(0);

    let snapshot = state.dispatch(Command::Start).await.unwrap();
    assert!(!snapshot.running);
    assert!(snapshot.finished);
    assert_eq!(snapshot.fraction_remaining, 0.0);
    assert!(calls.lock().unwrap().scheduled.is_empty());
}
