//! Wire types for the AniList airing-schedule query.

use serde::{Deserialize, Serialize};

/// One page of airing schedules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePage {
    pub page_info: PageInfo,
    pub airing_schedules: Vec<AiringSchedule>,
}

/// Pagination cursor reported by the API.
///
/// The API is authoritative on page numbering: callers continue from
/// `current_page + 1` rather than counting pages locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: u32,
    pub has_next_page: bool,
}

/// A single scheduled episode airing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiringSchedule {
    /// Episode number that airs.
    pub episode: u32,
    /// Unix timestamp of the airing.
    pub airing_at: i64,
    /// Seconds until the airing, as measured by the API at fetch time.
    /// Can be zero or negative for episodes already due.
    pub time_until_airing: i64,
    pub media: Media,
}

/// Media metadata attached to a schedule entry.
///
/// The scheduler passes this through to dispatch untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: i64,
    #[serde(default)]
    pub site_url: Option<String>,
    /// Airing status, e.g. "RELEASING" or "FINISHED".
    #[serde(default)]
    pub status: Option<String>,
    pub title: MediaTitle,
    #[serde(default)]
    pub cover_image: Option<CoverImage>,
    #[serde(default)]
    pub external_links: Vec<ExternalLink>,
}

/// Title variants for a media entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaTitle {
    #[serde(default)]
    pub romaji: Option<String>,
    #[serde(default)]
    pub english: Option<String>,
    #[serde(default)]
    pub native: Option<String>,
    #[serde(default)]
    pub user_preferred: Option<String>,
}

impl MediaTitle {
    /// Best available title, preferring romaji.
    pub fn display(&self) -> &str {
        self.romaji
            .as_deref()
            .or(self.english.as_deref())
            .or(self.native.as_deref())
            .or(self.user_preferred.as_deref())
            .unwrap_or("Unknown")
    }
}

/// Cover image for a media entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverImage {
    #[serde(default)]
    pub large: Option<String>,
    /// Dominant color as a hex string, e.g. "#f3df94".
    #[serde(default)]
    pub color: Option<String>,
}

/// External streaming/info link for a media entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalLink {
    pub site: String,
    pub url: String,
}
