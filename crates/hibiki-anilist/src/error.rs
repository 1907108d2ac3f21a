//! Error types for the AniList client.

use thiserror::Error;

/// Errors that can occur when talking to the AniList GraphQL API.
#[derive(Debug, Error)]
pub enum AnilistError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-success HTTP status from the API.
    #[error("request failed ({status}): {body}")]
    Status { status: u16, body: String },

    /// GraphQL-level errors returned in the response body.
    #[error("GraphQL error: {}", messages.join("; "))]
    Graphql { messages: Vec<String> },

    /// Response was missing expected fields.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
