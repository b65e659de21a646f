use serde::Deserialize;

/// Top-level search response. `tracks` is absent when the body does not
/// carry a result structure at all.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub tracks: Option<TracksPage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TracksPage {
    #[serde(default)]
    pub items: Vec<TrackItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackItem {
    pub id: String,
    pub name: String,
}

/// Error body returned alongside non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: Option<String>,
}

/// Response to a playlist-tracks POST.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotResponse {
    pub snapshot_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_search_hit() {
        let body = r#"{
            "tracks": {
                "href": "https://api.spotify.com/v1/search?query=song",
                "items": [
                    {"id": "3n3Ppam7vgaVa1iaRUc9Lp", "name": "Mr. Brightside", "popularity": 80}
                ]
            }
        }"#;

        let response: SearchResponse = serde_json::from_str(body).unwrap();
        let tracks = response.tracks.unwrap();
        assert_eq!(tracks.items.len(), 1);
        assert_eq!(tracks.items[0].id, "3n3Ppam7vgaVa1iaRUc9Lp");
    }

    #[test]
    fn test_deserialize_empty_result() {
        let body = r#"{"tracks": {"items": []}}"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert!(response.tracks.unwrap().items.is_empty());
    }

    #[test]
    fn test_tracks_object_missing() {
        let response: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(response.tracks.is_none());
    }

    #[test]
    fn test_deserialize_error_body() {
        let body = r#"{"error": {"status": 429, "message": "API rate limit exceeded"}}"#;
        let response: ErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.error.status, 429);
        assert_eq!(
            response.error.message.as_deref(),
            Some("API rate limit exceeded")
        );
    }
}
