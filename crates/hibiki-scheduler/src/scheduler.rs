//! Scheduler loop implementation.

use std::sync::Arc;

use tokio::sync::{RwLock, watch};
use tokio::time::sleep;
use tracing::info;

use crate::{
    AiringTimer, Dispatcher, EventSource, NotificationBuffer, PageDrainer, SchedulerConfig,
    TimerState, format_countdown,
};

/// The airing notification scheduler.
///
/// Runs two decoupled loops over one shared buffer: the drain cycle here,
/// which pulls a full horizon of schedules once per interval, and the
/// [`AiringTimer`] firing chain. Neither cancels the other; a drain that
/// lands while a chain is live merges its airings into the shared buffer.
pub struct Scheduler<S> {
    drainer: PageDrainer<S>,
    buffer: Arc<RwLock<NotificationBuffer>>,
    timer: Arc<AiringTimer>,
    config: SchedulerConfig,
}

impl<S: EventSource + 'static> Scheduler<S> {
    /// Create a scheduler with the default 24-hour cycle.
    pub fn new(source: Arc<S>, dispatch: Dispatcher) -> Self {
        Self::with_config(source, dispatch, SchedulerConfig::default())
    }

    /// Create a scheduler with an explicit configuration.
    pub fn with_config(source: Arc<S>, dispatch: Dispatcher, config: SchedulerConfig) -> Self {
        let buffer = Arc::new(RwLock::new(NotificationBuffer::new()));

        Self {
            drainer: PageDrainer::new(source),
            timer: Arc::new(AiringTimer::new(Arc::clone(&buffer), dispatch)),
            buffer,
            config,
        }
    }

    /// Current timer chain state.
    pub async fn timer_state(&self) -> TimerState {
        self.timer.state().await
    }

    /// Number of airings still waiting to fire.
    pub async fn pending(&self) -> usize {
        self.buffer.read().await.len()
    }

    /// Run the scheduler until shutdown is signalled.
    ///
    /// Drains a full horizon immediately, then once per `drain_interval`.
    /// The firing chain from one cycle runs on independently of the next
    /// drain; shutdown simply drops both.
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) {
        info!("scheduler starting");

        loop {
            if *shutdown_rx.borrow() {
                info!("scheduler shutting down");
                break;
            }

            self.run_cycle().await;

            tokio::select! {
                _ = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        info!("scheduler received shutdown signal");
                    }
                }
                _ = sleep(self.config.drain_interval) => {}
            }
        }

        info!("scheduler shut down gracefully");
    }

    /// Run one drain cycle: fetch every page for the current horizon, merge
    /// the results into the buffer, and make sure the firing chain is live.
    ///
    /// A total drain failure or an empty horizon leaves the buffer and timer
    /// untouched; the next cycle simply tries again.
    pub async fn run_cycle(&self) {
        let horizon = (self.config.horizon)();
        info!(horizon, "draining airing schedules");

        let outcome = self.drainer.drain(horizon).await;

        if outcome.airings.is_empty() {
            if outcome.error.is_none() {
                info!("no upcoming airings for this horizon");
            }
            return;
        }

        let mut added = 0usize;
        {
            let mut buffer = self.buffer.write().await;
            for airing in outcome.airings {
                let episode = airing.episode;
                let title = airing.title().to_string();
                let countdown = airing.countdown_secs;

                if buffer.add(airing) {
                    added += 1;
                    info!(
                        episode,
                        title = %title,
                        airs_in = %format_countdown(countdown),
                        "buffered upcoming airing"
                    );
                }
            }
        }

        let pending = self.buffer.read().await.len();
        info!(added, pending, pages = outcome.pages, "drain cycle complete");

        if pending > 0 {
            Arc::clone(&self.timer).ensure_armed().await;
        }
    }
}
