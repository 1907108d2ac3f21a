//! Scheduler types.

use std::fmt;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use hibiki_anilist::{AiringSchedule, Media};

/// Seconds in one default drain horizon (24 hours).
pub const SECS_PER_DAY: u64 = 86_400;

/// Identity of a scheduled airing: one episode of one media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AiringId {
    pub media_id: i64,
    pub episode: u32,
}

impl fmt::Display for AiringId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/ep{}", self.media_id, self.episode)
    }
}

/// A buffered airing notification.
///
/// Immutable once buffered. `countdown_secs` is the number of seconds until
/// the airing as measured at fetch time and is never recomputed afterwards,
/// so the real fire time drifts by the gap between fetch and arming. That
/// bound is accepted rather than corrected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Airing {
    /// Identity used for deduplication.
    pub id: AiringId,
    /// Episode number that airs.
    pub episode: u32,
    /// Seconds until the airing at fetch time. Zero or negative means the
    /// episode was already due when fetched; it still fires, on the next tick.
    pub countdown_secs: i64,
    /// Media metadata passed through to dispatch untouched.
    pub media: Media,
}

impl Airing {
    /// Best available title for log lines.
    pub fn title(&self) -> &str {
        self.media.title.display()
    }
}

impl From<AiringSchedule> for Airing {
    fn from(entry: AiringSchedule) -> Self {
        Self {
            id: AiringId {
                media_id: entry.media.id,
                episode: entry.episode,
            },
            episode: entry.episode,
            countdown_secs: entry.time_until_airing,
            media: entry.media,
        }
    }
}

/// Produces the horizon key for a drain cycle: airings at or before this
/// unix timestamp are in scope.
pub type HorizonProvider = Box<dyn Fn() -> i64 + Send + Sync>;

/// Scheduler configuration.
pub struct SchedulerConfig {
    /// How often a full drain cycle runs.
    pub drain_interval: Duration,
    /// Horizon key provider. Defaults to "24 hours from now".
    pub horizon: HorizonProvider,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            drain_interval: Duration::from_secs(SECS_PER_DAY),
            horizon: Box::new(|| Utc::now().timestamp() + SECS_PER_DAY as i64),
        }
    }
}

impl fmt::Debug for SchedulerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchedulerConfig")
            .field("drain_interval", &self.drain_interval)
            .finish_non_exhaustive()
    }
}

/// Render a countdown as a compact human duration, e.g. "1d 2h 3m 4s".
///
/// Already-due countdowns render as "now".
pub fn format_countdown(secs: i64) -> String {
    if secs <= 0 {
        return "now".to_string();
    }

    let days = secs / 86_400;
    let hours = secs % 86_400 / 3_600;
    let minutes = secs % 3_600 / 60;
    let seconds = secs % 60;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{}d", days));
    }
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    if seconds > 0 {
        parts.push(format!("{}s", seconds));
    }

    parts.join(" ")
}
