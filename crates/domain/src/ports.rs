//! Port definitions (traits) for external dependencies
//!
//! These traits define the boundaries between the domain and external systems.
//! Adapters implement these traits to connect to real platforms.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use time::OffsetDateTime;

use crate::model::{PlatformKey, PublishPayload, PublishReceipt, SocialResult};

/// Error type for publisher operations
#[derive(Debug, Error)]
pub enum PublishError {
    /// Required credential or setting absent; no request was attempted
    #[error("{0} not set")]
    MissingConfig(String),
    #[error("Authentication failed ({status}): {message}")]
    Auth { status: u16, message: String },
    #[error("Rate limited")]
    RateLimited { retry_after: Option<Duration> },
    #[error("API error ({status} {status_text}): {message}")]
    Api {
        status: u16,
        status_text: String,
        message: String,
    },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timed out after {0}s")]
    Timeout(u64),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Content too long: {len} > {max}")]
    ContentTooLong { len: usize, max: usize },
}

impl SocialResult {
    /// Convert an adapter outcome into the per-platform result
    pub fn from_outcome(
        platform: PlatformKey,
        outcome: Result<PublishReceipt, PublishError>,
    ) -> Self {
        let error = match outcome {
            Ok(receipt) => return SocialResult::success(platform, receipt),
            Err(error) => error,
        };

        let mut result = SocialResult::failure(platform.as_str(), error.to_string());
        match error {
            PublishError::Auth { status, .. } => {
                result.status = Some(status);
            }
            PublishError::Api {
                status,
                status_text,
                ..
            } => {
                result.status = Some(status);
                result.status_text = Some(status_text);
            }
            PublishError::RateLimited { retry_after } => {
                result.status = Some(429);
                result.status_text = Some("Too Many Requests".to_string());
                result.retry_after_sec = retry_after.map(|d| d.as_secs());
            }
            _ => {}
        }
        result
    }
}

/// Port for publishing a job ad to one social platform
#[async_trait]
pub trait SocialPublisher: Send + Sync {
    /// Publish the payload, returning the platform's identifier for the post
    async fn publish(&self, payload: &PublishPayload) -> Result<PublishReceipt, PublishError>;

    /// The platform this publisher serves
    fn platform(&self) -> PlatformKey;
}

/// Port for time/clock operations (enables deterministic testing)
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> OffsetDateTime;
}

/// Real clock implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_maps_to_retry_after() {
        let result = SocialResult::from_outcome(
            PlatformKey::X,
            Err(PublishError::RateLimited {
                retry_after: Some(Duration::from_secs(90)),
            }),
        );

        assert!(!result.ok);
        assert_eq!(result.status, Some(429));
        assert_eq!(result.retry_after_sec, Some(90));
        assert!(result.external_id.is_none());
    }

    #[test]
    fn missing_config_message_names_variable() {
        let result = SocialResult::from_outcome(
            PlatformKey::Linkedin,
            Err(PublishError::MissingConfig("LINKEDIN_ACCESS_TOKEN".to_string())),
        );

        assert_eq!(result.platform, "linkedin");
        assert_eq!(
            result.message.as_deref(),
            Some("LINKEDIN_ACCESS_TOKEN not set")
        );
        assert!(result.status.is_none());
    }

    #[test]
    fn receipt_maps_to_success() {
        let result = SocialResult::from_outcome(
            PlatformKey::Facebook,
            Ok(PublishReceipt::new("123_456").with_status(200, "OK")),
        );

        assert!(result.ok);
        assert_eq!(result.external_id.as_deref(), Some("123_456"));
        assert_eq!(result.status, Some(200));
    }
}
