use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};

use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::retry::retry_after_seconds;
use crate::shared::utils::RateLimiter;

use super::dto::{ErrorResponse, SearchResponse, SnapshotResponse};
use super::{DestinationClient, MatchedTrack};

const BASE_URL: &str = "https://api.spotify.com/v1";
const USER_AGENT: &str = "tunebridge/0.1";

/// Client for the Spotify Web API search and playlist-tracks endpoints.
///
/// Requests are paced client-side; 429 handling is left to the caller so the
/// retry loop stays observable from the outside.
pub struct SpotifyClient {
    client: reqwest::Client,
    base_url: String,
    bearer_token: String,
    rate_limiter: RateLimiter,
}

impl SpotifyClient {
    pub fn new(
        bearer_token: String,
        timeout_secs: u64,
        requests_per_second: f64,
    ) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: BASE_URL.to_string(),
            bearer_token,
            rate_limiter: RateLimiter::new(requests_per_second),
        })
    }

    async fn error_from_response(&self, status: StatusCode, response: Response) -> AppError {
        match status {
            StatusCode::TOO_MANY_REQUESTS => AppError::RateLimited {
                retry_after: retry_after_seconds(response.headers()),
            },
            StatusCode::UNAUTHORIZED => {
                AppError::Unauthorized("Spotify rejected the bearer token".to_string())
            }
            _ => {
                let detail = response
                    .json::<ErrorResponse>()
                    .await
                    .ok()
                    .and_then(|body| body.error.message)
                    .unwrap_or_else(|| status.to_string());
                AppError::ApiError(format!("Spotify API error: {}", detail))
            }
        }
    }
}

#[async_trait]
impl DestinationClient for SpotifyClient {
    async fn search_track(&self, query: &str) -> AppResult<Option<MatchedTrack>> {
        self.rate_limiter.wait().await;

        let url = format!(
            "{}/search?q={}&type=track&limit=1",
            self.base_url,
            urlencoding::encode(query)
        );
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.error_from_response(status, response).await);
        }

        let body: SearchResponse = response.json().await.map_err(|e| {
            AppError::SerializationError(format!("Failed to parse search response: {}", e))
        })?;
        let tracks = body.tracks.ok_or_else(|| {
            AppError::SerializationError("Search response is missing the tracks object".to_string())
        })?;

        Ok(tracks.items.into_iter().next().map(|item| MatchedTrack {
            id: item.id,
            name: item.name,
        }))
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> AppResult<()> {
        self.rate_limiter.wait().await;

        let url = format!(
            "{}/playlists/{}/tracks",
            self.base_url,
            urlencoding::encode(playlist_id)
        );
        let body = serde_json::json!({ "uris": uris });
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.bearer_token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.error_from_response(status, response).await);
        }

        if let Ok(snapshot) = response.json::<SnapshotResponse>().await {
            log::debug!("Playlist snapshot after write: {}", snapshot.snapshot_id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = SpotifyClient::new("token".to_string(), 30, 5.0);
        assert!(client.is_ok());
    }
}
