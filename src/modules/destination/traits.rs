use async_trait::async_trait;

use crate::shared::errors::AppResult;

use super::MatchedTrack;

/// Seam over the destination service's search and playlist-append calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DestinationClient: Send + Sync {
    /// Search for a track by normalized title. `Ok(None)` means the service
    /// answered but had no result for the query.
    async fn search_track(&self, query: &str) -> AppResult<Option<MatchedTrack>>;

    /// Append the given track URIs to a playlist in one call.
    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> AppResult<()>;
}
