//! Live roast timer session and its tick task
//!
//! One [`RoastTimerService`] owns the single timer session of the server.
//! User transitions and tick wakes both mutate the session under the same
//! lock, so no two mutations ever interleave.
//!
//! Starting a roast spawns a tick task with a fresh cancellation token.
//! Ending cooling, resetting, or shutting down revokes that token, so a
//! reset followed straight away by a new start never leaves two live loops.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use shared::{CompletedSession, RoastTimer, TimerSnapshot};

use super::clock::Clock;

/// Handle to the running tick task of one roast
struct Ticker {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl Ticker {
    fn is_running(&self) -> bool {
        !self.token.is_cancelled() && !self.handle.is_finished()
    }
}

struct TimerSession {
    timer: RoastTimer,
    ticker: Option<Ticker>,
    /// Start time of the completed session a save is in flight for
    saving: Option<DateTime<Utc>>,
}

impl TimerSession {
    fn revoke_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.token.cancel();
            debug!("Tick task revoked");
        }
    }
}

/// Roast timer service shared by every request
#[derive(Clone)]
pub struct RoastTimerService {
    session: Arc<Mutex<TimerSession>>,
    clock: Arc<dyn Clock>,
    tick_interval: Duration,
}

impl RoastTimerService {
    /// Create a service with a fresh timer in the `ready` phase
    pub fn new(clock: Arc<dyn Clock>, tick_interval: Duration) -> Self {
        Self {
            session: Arc::new(Mutex::new(TimerSession {
                timer: RoastTimer::new(),
                ticker: None,
                saving: None,
            })),
            clock,
            tick_interval,
        }
    }

    /// Current timer state with display values
    pub async fn snapshot(&self) -> TimerSnapshot {
        self.session.lock().await.timer.snapshot()
    }

    /// Whether a tick task is currently live
    pub async fn is_ticking(&self) -> bool {
        self.session
            .lock()
            .await
            .ticker
            .as_ref()
            .is_some_and(Ticker::is_running)
    }

    /// The finished session, once cooling has ended
    pub async fn completed_session(&self) -> Option<CompletedSession> {
        self.session.lock().await.timer.completed_session()
    }

    pub async fn start_roast(&self) -> TimerSnapshot {
        let mut session = self.session.lock().await;
        let now = self.clock.now();

        if session.timer.start_roast(now) {
            info!(start_time = %now, "Roast started");
            session.revoke_ticker();
            session.ticker = Some(self.spawn_ticker());
        }

        session.timer.snapshot()
    }

    pub async fn log_first_crack(&self) -> TimerSnapshot {
        let mut session = self.session.lock().await;

        if session.timer.log_first_crack(self.clock.now()) {
            info!(
                elapsed_seconds = session.timer.total_elapsed_seconds(),
                "First crack logged"
            );
        }

        session.timer.snapshot()
    }

    pub async fn end_roast(&self) -> TimerSnapshot {
        let mut session = self.session.lock().await;

        if session.timer.end_roast(self.clock.now()) {
            info!(
                elapsed_seconds = session.timer.total_elapsed_seconds(),
                development_seconds = session.timer.development_elapsed_seconds(),
                "Roast ended, cooling"
            );
        }

        session.timer.snapshot()
    }

    pub async fn end_cooling(&self) -> TimerSnapshot {
        let mut session = self.session.lock().await;

        if session.timer.end_cooling(self.clock.now()) {
            session.revoke_ticker();
            info!(
                elapsed_seconds = session.timer.total_elapsed_seconds(),
                cooling_seconds = session.timer.cooling_elapsed_seconds(),
                "Cooling complete"
            );
        }

        session.timer.snapshot()
    }

    pub async fn reset_roast(&self) -> TimerSnapshot {
        let mut session = self.session.lock().await;

        session.revoke_ticker();
        session.timer.reset_roast();
        session.saving = None;
        info!("Roast timer reset");

        session.timer.snapshot()
    }

    /// Take the completed session for storing
    ///
    /// Returns `None` when the roast is not complete or a save for it is
    /// already in flight. The claim lasts until the session is cleared or
    /// [`release_save`](Self::release_save) is called.
    pub async fn claim_completed_session(&self) -> Option<CompletedSession> {
        let mut session = self.session.lock().await;

        if session.saving.is_some() {
            return None;
        }
        let completed = session.timer.completed_session()?;
        session.saving = Some(completed.start_time);

        Some(completed)
    }

    /// Give up a claim after the session failed to store
    pub async fn release_save(&self, start_time: DateTime<Utc>) {
        let mut session = self.session.lock().await;

        if session.saving == Some(start_time) {
            session.saving = None;
        }
    }

    /// Reset once a completed session has been stored
    ///
    /// Only resets when the timer still holds the session that started at
    /// `start_time`, so a roast begun by someone else in the meantime survives.
    pub async fn clear_saved_session(&self, start_time: DateTime<Utc>) -> TimerSnapshot {
        let mut session = self.session.lock().await;

        let still_saved = session
            .timer
            .completed_session()
            .is_some_and(|completed| completed.start_time == start_time);
        if still_saved {
            session.revoke_ticker();
            session.timer.reset_roast();
            session.saving = None;
            info!(%start_time, "Saved roast cleared from timer");
        }

        session.timer.snapshot()
    }

    /// Stop any tick task without touching the timer state
    pub async fn shutdown(&self) {
        self.session.lock().await.revoke_ticker();
    }

    fn spawn_ticker(&self) -> Ticker {
        let token = CancellationToken::new();
        let handle = tokio::spawn(run_ticker(
            Arc::clone(&self.session),
            Arc::clone(&self.clock),
            token.clone(),
            self.tick_interval,
        ));

        Ticker { token, handle }
    }
}

/// Recompute elapsed time once per period until revoked or inactive
async fn run_ticker(
    session: Arc<Mutex<TimerSession>>,
    clock: Arc<dyn Clock>,
    token: CancellationToken,
    period: Duration,
) {
    debug!(period_ms = period.as_millis() as u64, "Tick task started");

    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = interval.tick() => {}
        }

        let mut guard = session.lock().await;
        if token.is_cancelled() || !guard.timer.tick(clock.now()) {
            break;
        }
    }

    debug!("Tick task stopped");
}
