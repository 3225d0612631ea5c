use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::services::detector::{self, Snapshot};
use crate::services::notify::{format, Notifier};
use crate::services::poller::Poller;
use crate::services::session::SessionDriver;

/// The one piece of mutable state: the last genuinely observed snapshot.
/// Overwritten after every successful cycle, untouched by failed ones.
pub struct PollerState {
    pub last_snapshot: Snapshot,
}

impl PollerState {
    pub fn new() -> Self {
        Self {
            last_snapshot: Snapshot::new(),
        }
    }
}

impl Default for PollerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-interval run loop. Runs as a single cooperative task, so at most
/// one poll cycle is ever in flight.
pub struct Scheduler<D: SessionDriver, N: Notifier> {
    poller: Poller<D>,
    notifier: N,
    channel_id: u64,
    interval: Duration,
    state: PollerState,
}

impl<D: SessionDriver, N: Notifier> Scheduler<D, N> {
    pub fn new(poller: Poller<D>, notifier: N, channel_id: u64, interval: Duration) -> Self {
        Self {
            poller,
            notifier,
            channel_id,
            interval,
            state: PollerState::new(),
        }
    }

    pub fn last_snapshot(&self) -> &Snapshot {
        &self.state.last_snapshot
    }

    /// Start the polling loop. Sends the startup message once, then polls
    /// immediately and on every interval tick after that. Never returns.
    pub async fn run(mut self) {
        let interval_minutes = self.interval.as_secs() / 60;
        tracing::info!("starting scheduler, checking every {interval_minutes} minutes");
        self.notify(&format::render_startup(interval_minutes)).await;

        let mut ticker = tokio::time::interval(self.interval);
        // A cycle that overruns its interval delays the next tick instead of
        // stacking ticks behind it.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.run_cycle().await;
        }
    }

    /// One complete cycle: poll, classify, notify, update state. Failures
    /// are reported and leave the state untouched; the next tick is the
    /// only retry.
    pub async fn run_cycle(&mut self) {
        match self.poller.poll().await {
            Ok(current) => {
                let notification = detector::classify(&self.state.last_snapshot, &current);
                self.notify(&format::render(&notification)).await;
                self.state.last_snapshot = current;
            }
            Err(e) => {
                tracing::error!("poll cycle failed: {e}");
                self.notify(&format::render_failure()).await;
            }
        }
    }

    async fn notify(&self, text: &str) {
        if let Err(e) = self.notifier.send(self.channel_id, text).await {
            tracing::warn!("failed to deliver notification: {e}");
        }
    }
}
