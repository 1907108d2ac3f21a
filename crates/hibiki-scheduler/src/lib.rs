//! Airing-schedule poller and notification batching engine for Hibiki.
//!
//! Polls AniList for upcoming episode airings once per horizon, buffers and
//! deduplicates them, and fires one batched notification per group of
//! airings sharing the same countdown:
//! - Drains every page of the schedule before arming any timer
//! - Converts relative countdowns into a self-rearming timer chain
//! - Batches simultaneous airings into one dispatch call
//! - Degrades every failure to "try again next cycle"

mod buffer;
mod drain;
mod error;
mod scheduler;
mod source;
mod timer;
mod types;

pub use buffer::NotificationBuffer;
pub use drain::{DrainOutcome, PageDrainer};
pub use error::SchedulerError;
pub use scheduler::Scheduler;
pub use source::EventSource;
pub use timer::{AiringTimer, Dispatcher, TimerState};
pub use types::{
    Airing, AiringId, HorizonProvider, SECS_PER_DAY, SchedulerConfig, format_countdown,
};
