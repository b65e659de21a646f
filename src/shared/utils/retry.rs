use std::time::Duration;

/// Configuration for retry behavior against external APIs.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts
    pub max_retries: u32,
    /// Base delay between retries (adjusted by Retry-After when present)
    pub base_delay: Duration,
    /// Maximum delay to wait (prevents excessive waits)
    pub max_delay: Duration,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f64,
    /// Whether to add random jitter to computed delays
    pub jitter: bool,
}

impl RetryPolicy {
    /// Policy for the Spotify search/write endpoints. Rate-limit responses
    /// start at a 5 second wait and back off from there.
    pub fn spotify() -> Self {
        Self {
            max_retries: 6,
            base_delay: Duration::from_secs(5),
            max_delay: Duration::from_secs(60),
            backoff_multiplier: 1.5,
            jitter: true,
        }
    }

    /// Policy for YouTube page fetches. Transient failures are cheap to
    /// retry quickly.
    pub fn youtube() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }

    /// Calculate delay for the given retry attempt (0-based). A server
    /// provided Retry-After value takes precedence over the backoff curve;
    /// both are capped at `max_delay`.
    pub fn calculate_delay(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        if let Some(server_delay) = retry_after {
            return server_delay.min(self.max_delay);
        }

        let multiplier = self.backoff_multiplier.powi(attempt as i32);
        let mut delay = Duration::from_millis(
            (self.base_delay.as_millis() as f64 * multiplier) as u64,
        )
        .min(self.max_delay);

        if self.jitter {
            let jitter_factor = 0.1; // 10% jitter
            let jitter_ms =
                (delay.as_millis() as f64 * jitter_factor * rand::random::<f64>()) as u64;
            delay += Duration::from_millis(jitter_ms);
        }

        delay
    }
}

/// Parse a Retry-After header (delta-seconds form) from a 429 response.
pub fn retry_after_seconds(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    headers
        .get("retry-after")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_jitter(mut policy: RetryPolicy) -> RetryPolicy {
        policy.jitter = false;
        policy
    }

    #[test]
    fn test_spotify_policy_defaults() {
        let policy = RetryPolicy::spotify();
        assert_eq!(policy.max_retries, 6);
        assert_eq!(policy.base_delay, Duration::from_secs(5));
    }

    #[test]
    fn test_retry_after_takes_precedence() {
        let policy = RetryPolicy::spotify();
        let delay = policy.calculate_delay(0, Some(Duration::from_secs(17)));
        assert_eq!(delay, Duration::from_secs(17));
    }

    #[test]
    fn test_retry_after_is_capped() {
        let policy = RetryPolicy::spotify();
        let delay = policy.calculate_delay(0, Some(Duration::from_secs(600)));
        assert_eq!(delay, policy.max_delay);
    }

    #[test]
    fn test_backoff_grows() {
        let policy = no_jitter(RetryPolicy::spotify());
        let first = policy.calculate_delay(0, None);
        let second = policy.calculate_delay(1, None);
        let third = policy.calculate_delay(2, None);
        assert_eq!(first, Duration::from_secs(5));
        assert!(second > first);
        assert!(third > second);
    }

    #[test]
    fn test_backoff_is_capped() {
        let policy = no_jitter(RetryPolicy::youtube());
        let delay = policy.calculate_delay(20, None);
        assert_eq!(delay, policy.max_delay);
    }

    #[test]
    fn test_retry_after_header_parsing() {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert("retry-after", "30".parse().unwrap());
        assert_eq!(retry_after_seconds(&headers), Some(30));

        let empty = reqwest::header::HeaderMap::new();
        assert_eq!(retry_after_seconds(&empty), None);
    }
}
