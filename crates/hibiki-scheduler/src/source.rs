//! Event source seam.

use async_trait::async_trait;

use hibiki_anilist::{AniListClient, AnilistError, SchedulePage};

/// A paged source of upcoming airings.
///
/// The scheduler treats this as an opaque capability handed to it at
/// construction. [`AniListClient`] is the production implementation; tests
/// script their own.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Fetch one page of airings scheduled before `airing_before` (unix seconds).
    async fn fetch_page(&self, page: u32, airing_before: i64)
    -> Result<SchedulePage, AnilistError>;
}

#[async_trait]
impl EventSource for AniListClient {
    async fn fetch_page(
        &self,
        page: u32,
        airing_before: i64,
    ) -> Result<SchedulePage, AnilistError> {
        self.fetch_schedule_page(page, airing_before).await
    }
}
