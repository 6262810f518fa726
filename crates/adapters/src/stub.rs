//! Stub publisher for offline runs and testing

use async_trait::async_trait;
use hirecast_domain::{PlatformKey, PublishError, PublishPayload, PublishReceipt, SocialPublisher};
use std::sync::Mutex;
use std::time::Duration;

/// Records payloads instead of calling a platform
pub struct StubPublisher {
    platform: PlatformKey,
    fail_with: Option<String>,
    delay: Option<Duration>,
    published: Mutex<Vec<PublishPayload>>,
}

impl StubPublisher {
    pub fn new(platform: PlatformKey) -> Self {
        Self {
            platform,
            fail_with: None,
            delay: None,
            published: Mutex::new(vec![]),
        }
    }

    /// Make every publish fail with an API error carrying `message`
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.fail_with = Some(message.into());
        self
    }

    /// Sleep before answering, to simulate a slow platform
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Get all payloads that were published
    pub fn get_published(&self) -> Vec<PublishPayload> {
        self.published
            .lock()
            .map(|published| published.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SocialPublisher for StubPublisher {
    async fn publish(&self, payload: &PublishPayload) -> Result<PublishReceipt, PublishError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(message) = &self.fail_with {
            return Err(PublishError::Api {
                status: 500,
                status_text: "Internal Server Error".to_string(),
                message: message.clone(),
            });
        }

        let count = match self.published.lock() {
            Ok(mut published) => {
                published.push(payload.clone());
                published.len()
            }
            Err(_) => 0,
        };

        tracing::info!(
            platform = %self.platform,
            url = %payload.url,
            "[DRY RUN] Would publish"
        );

        Ok(PublishReceipt::new(format!("stub_{}_{}", self.platform, count))
            .with_message("dry run"))
    }

    fn platform(&self) -> PlatformKey {
        self.platform
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payload() -> PublishPayload {
        PublishPayload {
            title: "Backend Engineer".to_string(),
            text: String::new(),
            url: "https://acme.example/jobs/job_1".to_string(),
            company: "Acme".to_string(),
            team_id: "team_1".to_string(),
            schedule_at: None,
            media: vec![],
        }
    }

    #[tokio::test]
    async fn test_records_payloads() {
        let stub = StubPublisher::new(PlatformKey::X);

        let first = stub.publish(&sample_payload()).await.unwrap();
        let second = stub.publish(&sample_payload()).await.unwrap();

        assert_eq!(first.external_id, "stub_x_1");
        assert_eq!(second.external_id, "stub_x_2");
        assert_eq!(stub.get_published().len(), 2);
    }

    #[tokio::test]
    async fn test_failing_stub_records_nothing() {
        let stub = StubPublisher::new(PlatformKey::Facebook).failing("page disabled");

        let result = stub.publish(&sample_payload()).await;

        assert!(matches!(result, Err(PublishError::Api { status: 500, .. })));
        assert!(stub.get_published().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_is_applied() {
        let stub = StubPublisher::new(PlatformKey::Linkedin).with_delay(Duration::from_secs(5));
        let started = tokio::time::Instant::now();

        stub.publish(&sample_payload()).await.unwrap();

        assert!(started.elapsed() >= Duration::from_secs(5));
    }
}
