use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::retry::retry_after_seconds;
use crate::shared::utils::RetryPolicy;

use super::dto::PlaylistItemsResponse;
use super::{PageFetcher, PlaylistPage};

const BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
const USER_AGENT: &str = "tunebridge/0.1";

/// Each page request asks for the API maximum of 50 items.
const PAGE_SIZE: u32 = 50;

/// Client for the YouTube Data API playlist-items endpoint.
pub struct YouTubeClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    retry: RetryPolicy,
}

impl YouTubeClient {
    pub fn new(api_key: String, timeout_secs: u64) -> AppResult<Self> {
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
            api_key,
            retry: RetryPolicy::youtube(),
        })
    }

    fn page_url(&self, playlist_id: &str, page_token: Option<&str>) -> String {
        let mut url = format!(
            "{}/playlistItems?part=snippet&maxResults={}&playlistId={}&key={}",
            self.base_url,
            PAGE_SIZE,
            urlencoding::encode(playlist_id),
            urlencoding::encode(&self.api_key)
        );
        if let Some(token) = page_token {
            url.push_str(&format!("&pageToken={}", urlencoding::encode(token)));
        }
        url
    }

    async fn send_page_request(&self, url: &str) -> AppResult<PlaylistItemsResponse> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        match status {
            s if s.is_success() => {}
            StatusCode::TOO_MANY_REQUESTS => {
                return Err(AppError::RateLimited {
                    retry_after: retry_after_seconds(response.headers()),
                })
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(AppError::Unauthorized(
                    "YouTube rejected the API key".to_string(),
                ))
            }
            s if s.is_server_error() => {
                return Err(AppError::ExternalServiceError(format!(
                    "YouTube service unavailable: {}",
                    s
                )))
            }
            s => {
                return Err(AppError::ApiError(format!(
                    "Unexpected status code from YouTube: {}",
                    s
                )))
            }
        }

        response
            .json::<PlaylistItemsResponse>()
            .await
            .map_err(|e| {
                AppError::SerializationError(format!("Failed to parse YouTube response: {}", e))
            })
    }
}

#[async_trait]
impl PageFetcher for YouTubeClient {
    async fn fetch_page<'a>(
        &self,
        playlist_id: &str,
        page_token: Option<&'a str>,
    ) -> AppResult<PlaylistPage> {
        let url = self.page_url(playlist_id, page_token);
        let mut attempt = 0;

        loop {
            match self.send_page_request(&url).await {
                Ok(body) => {
                    return Ok(PlaylistPage {
                        titles: body
                            .items
                            .into_iter()
                            .map(|item| item.snippet.title)
                            .collect(),
                        next_page_token: body.next_page_token,
                    })
                }
                Err(err) if err.is_retryable() && attempt < self.retry.max_retries => {
                    let retry_after = match &err {
                        AppError::RateLimited { retry_after } => {
                            retry_after.map(Duration::from_secs)
                        }
                        _ => None,
                    };
                    let delay = self.retry.calculate_delay(attempt, retry_after);
                    log::warn!(
                        "Playlist page fetch failed ({}), retrying in {:?}",
                        err,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = YouTubeClient::new("key".to_string(), 30);
        assert!(client.is_ok());
    }

    #[test]
    fn test_page_url_without_token() {
        let client = YouTubeClient::new("my-key".to_string(), 30).unwrap();
        let url = client.page_url("PL123", None);
        assert_eq!(
            url,
            "https://www.googleapis.com/youtube/v3/playlistItems\
             ?part=snippet&maxResults=50&playlistId=PL123&key=my-key"
        );
    }

    #[test]
    fn test_page_url_with_token() {
        let client = YouTubeClient::new("my-key".to_string(), 30).unwrap();
        let url = client.page_url("PL123", Some("CAUQAA"));
        assert!(url.ends_with("&pageToken=CAUQAA"));
    }

    #[test]
    fn test_page_url_encodes_playlist_id() {
        let client = YouTubeClient::new("my-key".to_string(), 30).unwrap();
        let url = client.page_url("PL with spaces", None);
        assert!(url.contains("playlistId=PL%20with%20spaces"));
    }
}
