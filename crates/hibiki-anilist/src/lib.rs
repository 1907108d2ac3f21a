//! AniList GraphQL client for Hibiki.
//!
//! Thin client over the AniList GraphQL API, covering the paged
//! airing-schedule query that the scheduler drains once per cycle.

mod client;
mod error;
mod types;

pub use client::{ANILIST_API_URL, AniListClient};
pub use error::AnilistError;
pub use types::{
    AiringSchedule, CoverImage, ExternalLink, Media, MediaTitle, PageInfo, SchedulePage,
};
