//! Shared HTTP plumbing for the platform adapters

use hirecast_domain::PublishError;
use reqwest::header::HeaderMap;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use time::OffsetDateTime;

/// Per-call timeout used by every outbound platform request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

pub(crate) fn build_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .expect("Failed to build HTTP client")
}

/// Map a transport failure, keeping timeouts distinguishable
pub(crate) fn send_error(error: reqwest::Error, timeout: Duration) -> PublishError {
    if error.is_timeout() {
        PublishError::Timeout(timeout.as_secs())
    } else {
        PublishError::Network(error.to_string())
    }
}

/// Turn a non-success response into the matching publish error
pub(crate) async fn error_for_response(response: Response) -> PublishError {
    let status = response.status();
    let retry_after = retry_after(response.headers(), OffsetDateTime::now_utc());
    let body = response.text().await.unwrap_or_default();

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PublishError::Auth {
            status: status.as_u16(),
            message: summarize_body(&body),
        },
        StatusCode::TOO_MANY_REQUESTS => PublishError::RateLimited { retry_after },
        _ => PublishError::Api {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            message: summarize_body(&body),
        },
    }
}

/// Throttle hint from `retry-after` (seconds) or X's `x-rate-limit-reset` (epoch)
pub(crate) fn retry_after(headers: &HeaderMap, now: OffsetDateTime) -> Option<Duration> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<i64>().ok())
    };

    if let Some(secs) = header("retry-after") {
        return Some(Duration::from_secs(secs.max(0) as u64));
    }

    header("x-rate-limit-reset").map(|reset| {
        let wait = reset - now.unix_timestamp();
        Duration::from_secs(wait.max(0) as u64)
    })
}

/// Pull a readable message out of an error body
fn summarize_body(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        let candidates = [
            value.pointer("/error/message"),
            value.pointer("/message"),
            value.pointer("/detail"),
            value.pointer("/errors/0/message"),
        ];
        if let Some(message) = candidates.into_iter().flatten().find_map(|v| v.as_str()) {
            return message.to_string();
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "empty response body".to_string()
    } else {
        trimmed.chars().take(300).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_retry_after_seconds() {
        let mut headers = HeaderMap::new();
        headers.insert("retry-after", HeaderValue::from_static("120"));

        let now = OffsetDateTime::from_unix_timestamp(1_000).unwrap();
        assert_eq!(retry_after(&headers, now), Some(Duration::from_secs(120)));
    }

    #[test]
    fn test_retry_after_from_reset_epoch() {
        let mut headers = HeaderMap::new();
        headers.insert("x-rate-limit-reset", HeaderValue::from_static("1900"));

        let now = OffsetDateTime::from_unix_timestamp(1_000).unwrap();
        assert_eq!(retry_after(&headers, now), Some(Duration::from_secs(900)));

        let later = OffsetDateTime::from_unix_timestamp(5_000).unwrap();
        assert_eq!(retry_after(&headers, later), Some(Duration::ZERO));
    }

    #[test]
    fn test_summarize_graph_error() {
        let body = r#"{"error":{"message":"Invalid OAuth access token","type":"OAuthException","code":190}}"#;
        assert_eq!(summarize_body(body), "Invalid OAuth access token");
        assert_eq!(summarize_body(""), "empty response body");
        assert_eq!(summarize_body("plain failure"), "plain failure");
    }
}
