use std::time::Duration;

use tokio::time::sleep;

use crate::modules::destination::{DestinationClient, MatchedTrack};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::RetryPolicy;

use super::normalize_title;

/// Result of the matching phase: matched tracks in discovery order plus
/// counts for everything that was skipped.
#[derive(Debug, Default)]
pub struct MatchOutcome {
    pub tracks: Vec<MatchedTrack>,
    pub not_found: usize,
    pub unparseable: usize,
    pub failed: usize,
}

enum SearchDisposition {
    Found(MatchedTrack),
    NotFound,
    Unparseable,
    Failed,
}

/// Searches the destination service once per title, in order.
///
/// A rate-limited response re-issues the identical query after a delay
/// without advancing; an unauthorized response aborts the whole run. Every
/// other failure is logged and skipped.
pub struct TrackMatcher<'a, C: DestinationClient> {
    client: &'a C,
    retry: RetryPolicy,
}

impl<'a, C: DestinationClient> TrackMatcher<'a, C> {
    pub fn new(client: &'a C, retry: RetryPolicy) -> Self {
        Self { client, retry }
    }

    pub async fn match_all(&self, titles: Vec<String>) -> AppResult<MatchOutcome> {
        let total = titles.len();
        let mut outcome = MatchOutcome::default();

        for (index, title) in titles.into_iter().enumerate() {
            let query = normalize_title(&title);
            if query.is_empty() {
                log::warn!(
                    "[{}/{}] Nothing left of '{}' after normalization, skipping",
                    index + 1,
                    total,
                    title
                );
                outcome.failed += 1;
                continue;
            }

            match self.match_one(&query, &title).await? {
                SearchDisposition::Found(track) => {
                    log::info!("{}: {}", track.id, title);
                    outcome.tracks.push(track);
                }
                SearchDisposition::NotFound => {
                    log::info!("Could not find track on Spotify: {}", title);
                    outcome.not_found += 1;
                }
                SearchDisposition::Unparseable => outcome.unparseable += 1,
                SearchDisposition::Failed => outcome.failed += 1,
            }
        }

        Ok(outcome)
    }

    /// One search, retried in place on rate limiting. The same query is
    /// re-issued on every attempt.
    async fn match_one(&self, query: &str, title: &str) -> AppResult<SearchDisposition> {
        let mut attempt = 0;

        loop {
            match self.client.search_track(query).await {
                Ok(Some(track)) => return Ok(SearchDisposition::Found(track)),
                Ok(None) => return Ok(SearchDisposition::NotFound),
                Err(AppError::RateLimited { retry_after }) => {
                    if attempt >= self.retry.max_retries {
                        log::error!(
                            "Rate limit retries exhausted searching for '{}', skipping",
                            title
                        );
                        return Ok(SearchDisposition::Failed);
                    }
                    let delay = self
                        .retry
                        .calculate_delay(attempt, retry_after.map(Duration::from_secs));
                    log::warn!("Rate limit reached, retrying in {:?}...", delay);
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(err @ AppError::Unauthorized(_)) => {
                    log::error!("Invalid token, cannot continue.");
                    return Err(err);
                }
                Err(AppError::SerializationError(detail)) => {
                    log::warn!("Could not parse search response for '{}': {}", title, detail);
                    return Ok(SearchDisposition::Unparseable);
                }
                Err(err) => {
                    log::warn!("Error searching for track '{}': {}", title, err);
                    return Ok(SearchDisposition::Failed);
                }
            }
        }
    }
}
