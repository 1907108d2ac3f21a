//! AniList GraphQL client implementation.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{AnilistError, SchedulePage};

/// Public AniList GraphQL endpoint.
pub const ANILIST_API_URL: &str = "https://graphql.anilist.co";

/// Query for one page of upcoming airing schedules within a horizon.
const SCHEDULE_QUERY: &str = "\
query ($page: Int, $airingBefore: Int) {
    Page(page: $page) {
        pageInfo {
            currentPage
            hasNextPage
        }
        airingSchedules(airingAt_lesser: $airingBefore, notYetAired: true) {
            episode
            airingAt
            timeUntilAiring
            media {
                id
                siteUrl
                status
                title {
                    romaji
                    english
                    native
                    userPreferred
                }
                coverImage {
                    large
                    color
                }
                externalLinks {
                    site
                    url
                }
            }
        }
    }
}";

/// Client for the AniList GraphQL API.
pub struct AniListClient {
    http: Client,
    endpoint: String,
}

impl AniListClient {
    /// Create a new client for the given GraphQL endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    /// Client against the public AniList endpoint.
    pub fn public() -> Self {
        Self::new(ANILIST_API_URL)
    }

    /// The GraphQL endpoint this client talks to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch one page of airings scheduled before `airing_before` (unix seconds).
    pub async fn fetch_schedule_page(
        &self,
        page: u32,
        airing_before: i64,
    ) -> Result<SchedulePage, AnilistError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Variables {
            page: u32,
            airing_before: i64,
        }

        #[derive(Serialize)]
        struct Request<'a> {
            query: &'a str,
            variables: Variables,
        }

        #[derive(Deserialize)]
        struct GraphqlError {
            message: String,
        }

        #[derive(Deserialize)]
        struct Data {
            #[serde(rename = "Page")]
            page: SchedulePage,
        }

        #[derive(Deserialize)]
        struct Response {
            data: Option<Data>,
            errors: Option<Vec<GraphqlError>>,
        }

        let response = self
            .http
            .post(&self.endpoint)
            .json(&Request {
                query: SCHEDULE_QUERY,
                variables: Variables {
                    page,
                    airing_before,
                },
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await?;
            return Err(AnilistError::Status { status, body });
        }

        let body: Response = response.json().await?;

        if let Some(errors) = body.errors {
            return Err(AnilistError::Graphql {
                messages: errors.into_iter().map(|e| e.message).collect(),
            });
        }

        let data = body.data.ok_or_else(|| {
            AnilistError::InvalidResponse("response had neither data nor errors".to_string())
        })?;

        debug!(
            page = data.page.page_info.current_page,
            entries = data.page.airing_schedules.len(),
            has_next_page = data.page.page_info.has_next_page,
            "fetched schedule page"
        );

        Ok(data.page)
    }
}
