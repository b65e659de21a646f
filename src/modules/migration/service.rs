use crate::modules::destination::{DestinationClient, PlaylistWriter};
use crate::modules::matching::TrackMatcher;
use crate::modules::source::{self, PageFetcher};
use crate::shared::errors::AppResult;
use crate::shared::utils::RetryPolicy;

use super::MigrationReport;

/// Identifies the playlists on either side of the migration.
#[derive(Debug, Clone)]
pub struct MigrationRequest {
    pub source_playlist: String,
    pub destination_playlist: String,
}

/// Wires the three phases together: read all titles, match them against the
/// destination service, write the matches in batches. Each phase hands an
/// owned sequence to the next; nothing is shared or mutated across phases.
pub struct MigrationService<S: PageFetcher, D: DestinationClient> {
    source: S,
    destination: D,
    batch_size: usize,
    retry: RetryPolicy,
}

impl<S: PageFetcher, D: DestinationClient> MigrationService<S, D> {
    pub fn new(source: S, destination: D, batch_size: usize, retry: RetryPolicy) -> Self {
        Self {
            source,
            destination,
            batch_size,
            retry,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn destination(&self) -> &D {
        &self.destination
    }

    pub async fn run(&self, request: &MigrationRequest) -> AppResult<MigrationReport> {
        log::info!("Fetching playlist data from YouTube...");
        let titles = source::collect_titles(&self.source, &request.source_playlist).await?;
        let fetched = titles.len();
        log::info!("Got {} songs from the YouTube playlist.", fetched);

        log::info!("Searching Spotify for songs...");
        let matcher = TrackMatcher::new(&self.destination, self.retry.clone());
        let outcome = matcher.match_all(titles).await?;
        let matched = outcome.tracks.len();
        log::info!(
            "Found {} songs on Spotify (accuracy is not 100% guaranteed for found songs, \
             manual pruning will likely be necessary)",
            matched
        );

        log::info!("Attempting to add tracks to playlist...");
        let writer = PlaylistWriter::new(&self.destination, self.batch_size, self.retry.clone());
        let write = writer
            .write_all(&request.destination_playlist, outcome.tracks)
            .await?;

        Ok(MigrationReport {
            fetched,
            matched,
            not_found: outcome.not_found,
            unparseable: outcome.unparseable,
            skipped: outcome.failed,
            written: write.written,
            unwritten: write.unwritten,
        })
    }
}
