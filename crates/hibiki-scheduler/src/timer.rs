//! Airing timer state machine.
//!
//! A single self-rearming chain over the notification buffer: sleep until
//! the smallest buffered countdown, fire that whole countdown bucket as one
//! batch, re-arm for the next bucket, and go idle when the buffer empties.
//! The chain only restarts at the next drain cycle.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::{Airing, NotificationBuffer, SchedulerError};

/// Type alias for the notification dispatch callback.
///
/// Invoked once per batch of airings sharing an identical countdown.
/// Failures are logged by the timer chain and never abort it.
pub type Dispatcher =
    Box<dyn Fn(Vec<Airing>) -> Pin<Box<dyn Future<Output = Result<(), String>> + Send>> + Send + Sync>;

/// Where the timer chain currently is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimerState {
    /// No live timer; the chain resumes at the next drain cycle.
    #[default]
    Idle,
    /// A timer is sleeping toward the current minimum countdown.
    Armed,
    /// The timer elapsed and dispatch is in flight.
    Firing,
}

/// Self-rearming single-shot timer over the notification buffer.
///
/// At most one chain is live at a time. Dispatch is awaited before the next
/// arm, so a slow or failing dispatch never overlaps the following batch.
pub struct AiringTimer {
    buffer: Arc<RwLock<NotificationBuffer>>,
    dispatch: Dispatcher,
    state: RwLock<TimerState>,
}

impl AiringTimer {
    /// Create a timer over the given buffer.
    pub fn new(buffer: Arc<RwLock<NotificationBuffer>>, dispatch: Dispatcher) -> Self {
        Self {
            buffer,
            dispatch,
            state: RwLock::new(TimerState::Idle),
        }
    }

    /// Current chain state.
    pub async fn state(&self) -> TimerState {
        *self.state.read().await
    }

    /// Start the firing chain unless one is already live.
    ///
    /// A chain that is already `Armed` or `Firing` is left alone: newly
    /// drained airings merge into the shared buffer and are picked up when
    /// the live timer next re-evaluates the minimum.
    pub async fn ensure_armed(self: Arc<Self>) {
        {
            let mut state = self.state.write().await;
            if *state != TimerState::Idle {
                debug!(state = ?*state, "timer chain already live, leaving it armed");
                return;
            }
            *state = TimerState::Armed;
        }

        tokio::spawn(async move {
            self.run_chain().await;
        });
    }

    async fn run_chain(self: Arc<Self>) {
        loop {
            let min = self.buffer.read().await.min_countdown();

            let Some(min) = min else {
                *self.state.write().await = TimerState::Idle;
                info!("all buffered airings dispatched, timer idle");
                return;
            };

            *self.state.write().await = TimerState::Armed;

            // Countdowns are relative to fetch time and never refreshed;
            // already-due airings (zero or negative) fire on the next tick.
            sleep(Duration::from_secs(min.max(0) as u64)).await;

            *self.state.write().await = TimerState::Firing;

            // A drain may have merged a smaller countdown while we slept;
            // the fire takes the freshly computed minimum bucket, so merged
            // airings can leave early relative to their own countdown.
            let (due, batch) = {
                let mut buffer = self.buffer.write().await;
                match buffer.min_countdown() {
                    Some(due) => (due, buffer.take_all_with_countdown(due)),
                    None => continue,
                }
            };

            debug!(batch = batch.len(), countdown = due, "firing airing batch");

            if let Err(e) = (self.dispatch)(batch).await {
                let e = SchedulerError::Dispatch(e);
                error!(error = %e, "dispatch failed for airing batch");
            }
        }
    }
}
