pub mod client;
pub mod dto;

pub use client::YouTubeClient;

use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// One page of source-playlist titles plus the cursor to the next page.
/// An absent token means the listing is exhausted.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistPage {
    pub titles: Vec<String>,
    pub next_page_token: Option<String>,
}

/// Seam over the paginated playlist-items endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page<'a>(
        &self,
        playlist_id: &str,
        page_token: Option<&'a str>,
    ) -> AppResult<PlaylistPage>;
}

/// Follow the page-token cursor until the service reports no further page,
/// collecting every item title in listing order.
///
/// A failed page fetch propagates as an error instead of truncating the
/// result set, so the caller can tell "fetch failed" apart from a natural
/// end-of-list.
pub async fn collect_titles<F: PageFetcher>(
    fetcher: &F,
    playlist_id: &str,
) -> AppResult<Vec<String>> {
    let mut titles = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
        let page = fetcher.fetch_page(playlist_id, page_token.as_deref()).await?;
        log::debug!(
            "Fetched playlist page: {} items, next token: {}",
            page.titles.len(),
            page.next_page_token.as_deref().unwrap_or("<none>")
        );
        titles.extend(page.titles);

        match page.next_page_token {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }

    Ok(titles)
}
