use std::collections::VecDeque;
use std::time::Duration;

use tokio::time::sleep;

use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::RetryPolicy;

use super::{DestinationClient, MatchedTrack};

const URI_PREFIX: &str = "spotify:track:";

/// Counts for one writer run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WriteReport {
    pub written: usize,
    pub unwritten: usize,
    pub batches: usize,
}

/// Appends matched tracks to the destination playlist in fixed-size batches.
///
/// A batch is copied out of the pending queue, sent, and only removed once
/// the call succeeded. A batch that still fails after the retry budget is
/// counted as unwritten and logged; later batches are still attempted.
pub struct PlaylistWriter<'a, C: DestinationClient> {
    client: &'a C,
    batch_size: usize,
    retry: RetryPolicy,
}

impl<'a, C: DestinationClient> PlaylistWriter<'a, C> {
    pub fn new(client: &'a C, batch_size: usize, retry: RetryPolicy) -> Self {
        Self {
            client,
            batch_size,
            retry,
        }
    }

    pub async fn write_all(
        &self,
        playlist_id: &str,
        tracks: Vec<MatchedTrack>,
    ) -> AppResult<WriteReport> {
        let mut pending: VecDeque<MatchedTrack> = tracks.into();
        let mut report = WriteReport::default();

        while !pending.is_empty() {
            let take = pending.len().min(self.batch_size);
            let uris: Vec<String> = pending
                .iter()
                .take(take)
                .map(|track| format!("{}{}", URI_PREFIX, track.id))
                .collect();

            match self.send_batch(playlist_id, &uris).await {
                Ok(()) => {
                    pending.drain(..take);
                    report.written += take;
                    report.batches += 1;
                    log::info!("{} songs added...", take);
                }
                Err(err @ AppError::Unauthorized(_)) => return Err(err),
                Err(err) => {
                    log::error!("Failed to write a batch of {} tracks: {}", take, err);
                    pending.drain(..take);
                    report.unwritten += take;
                }
            }
        }

        Ok(report)
    }

    async fn send_batch(&self, playlist_id: &str, uris: &[String]) -> AppResult<()> {
        let mut attempt = 0;

        loop {
            match self.client.add_tracks(playlist_id, uris).await {
                Ok(()) => return Ok(()),
                Err(err) if err.is_retryable() && attempt < self.retry.max_retries => {
                    let retry_after = match &err {
                        AppError::RateLimited { retry_after } => {
                            retry_after.map(Duration::from_secs)
                        }
                        _ => None,
                    };
                    let delay = self.retry.calculate_delay(attempt, retry_after);
                    log::warn!("Batch write failed ({}), retrying in {:?}", err, delay);
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
