//! Website publisher
//!
//! Saving the job on the company site already published it, so this adapter
//! never leaves the process.

use async_trait::async_trait;
use hirecast_domain::{PlatformKey, PublishError, PublishPayload, PublishReceipt, SocialPublisher};

#[derive(Debug, Clone, Copy, Default)]
pub struct WebsitePublisher;

impl WebsitePublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SocialPublisher for WebsitePublisher {
    async fn publish(&self, payload: &PublishPayload) -> Result<PublishReceipt, PublishError> {
        tracing::debug!(url = %payload.url, "Job already live on company site");
        Ok(PublishReceipt::new(payload.url.clone()).with_message("Published on company site"))
    }

    fn platform(&self) -> PlatformKey {
        PlatformKey::Website
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_returns_job_url_as_external_id() {
        let payload = PublishPayload {
            title: "Designer".to_string(),
            text: String::new(),
            url: "https://acme.example/jobs/7".to_string(),
            company: "Acme".to_string(),
            team_id: "team".to_string(),
            schedule_at: None,
            media: vec![],
        };

        let receipt = WebsitePublisher::new().publish(&payload).await.unwrap();

        assert_eq!(receipt.external_id, "https://acme.example/jobs/7");
    }
}
