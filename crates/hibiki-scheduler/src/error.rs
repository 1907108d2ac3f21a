//! Error types for the scheduler.

use thiserror::Error;

/// Errors that can occur in scheduler operations.
///
/// None of these are fatal to the process: each is logged at the boundary
/// where it occurs and the loop carries on with whatever it has.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Fetching a schedule page from the event source failed.
    #[error("source error: {0}")]
    Source(#[from] hibiki_anilist::AnilistError),

    /// The dispatch callback rejected a batch.
    #[error("dispatch failed: {0}")]
    Dispatch(String),
}
