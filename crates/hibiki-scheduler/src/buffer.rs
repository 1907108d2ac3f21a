//! Pending-notification buffer.

use crate::{Airing, AiringId};

/// Deduplicated set of airings waiting to fire.
///
/// Uniqueness is keyed by [`AiringId`]: adding an airing whose identity is
/// already buffered is a no-op, even if its countdown differs. Entries leave
/// one countdown bucket at a time via [`take_all_with_countdown`].
///
/// Never persisted; rebuilt in place as drain cycles add to it and the timer
/// chain empties it.
///
/// [`take_all_with_countdown`]: NotificationBuffer::take_all_with_countdown
#[derive(Debug, Default)]
pub struct NotificationBuffer {
    entries: Vec<Airing>,
}

impl NotificationBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an airing unless its identity is already buffered.
    ///
    /// Returns whether the airing was inserted.
    pub fn add(&mut self, airing: Airing) -> bool {
        if self.entries.iter().any(|a| a.id == airing.id) {
            return false;
        }
        self.entries.push(airing);
        true
    }

    /// Smallest countdown among buffered airings, or `None` when empty.
    pub fn min_countdown(&self) -> Option<i64> {
        self.entries.iter().map(|a| a.countdown_secs).min()
    }

    /// Remove and return every airing whose countdown is exactly `countdown`.
    ///
    /// Airings fetched in the same cycle with identical countdowns are
    /// defined to be simultaneous and must leave as one batch, never split
    /// across two dispatch calls.
    pub fn take_all_with_countdown(&mut self, countdown: i64) -> Vec<Airing> {
        let (batch, rest): (Vec<_>, Vec<_>) = self
            .entries
            .drain(..)
            .partition(|a| a.countdown_secs == countdown);
        self.entries = rest;
        batch
    }

    /// Whether an airing with this identity is buffered.
    pub fn contains(&self, id: AiringId) -> bool {
        self.entries.iter().any(|a| a.id == id)
    }

    /// Number of buffered airings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
