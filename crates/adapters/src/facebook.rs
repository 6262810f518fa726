//! Facebook Graph API page feed adapter

use async_trait::async_trait;
use hirecast_domain::usecases::Renderer;
use hirecast_domain::{
    Clock, PlatformKey, PublishError, PublishPayload, PublishReceipt, SocialPublisher, SystemClock,
};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use crate::credentials::Credential;
use crate::http::{self, DEFAULT_TIMEOUT};

/// Graph refuses scheduled posts closer than this to the present
const MIN_SCHEDULE_LEAD: time::Duration = time::Duration::minutes(10);

/// Settings for the Facebook publisher
#[derive(Debug, Clone)]
pub struct FacebookConfig {
    pub page_id: Credential,
    pub page_access_token: Credential,
    pub graph_version: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl FacebookConfig {
    pub fn new(page_id: Credential, page_access_token: Credential) -> Self {
        Self {
            page_id,
            page_access_token,
            graph_version: "v19.0".to_string(),
            base_url: "https://graph.facebook.com".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Publishes job ads to a Facebook page feed
pub struct FacebookPublisher {
    client: Client,
    config: FacebookConfig,
    renderer: Renderer,
    clock: Arc<dyn Clock>,
}

impl FacebookPublisher {
    pub fn new(config: FacebookConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: FacebookConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            client: http::build_client(config.timeout),
            config,
            renderer: Renderer::default(),
            clock,
        }
    }

    /// Unix timestamp to schedule at, when the payload asks for a usable future time
    fn scheduled_publish_time(&self, payload: &PublishPayload) -> Option<i64> {
        let at = payload.schedule_at?;
        if at - self.clock.now() < MIN_SCHEDULE_LEAD {
            tracing::debug!(schedule_at = %at, "Schedule too close, publishing immediately");
            return None;
        }
        Some(at.unix_timestamp())
    }
}

#[derive(Deserialize)]
struct FeedResponse {
    id: String,
}

#[async_trait]
impl SocialPublisher for FacebookPublisher {
    async fn publish(&self, payload: &PublishPayload) -> Result<PublishReceipt, PublishError> {
        let page_id = self.config.page_id.require()?;
        let token = self.config.page_access_token.require()?;

        let mut form = vec![
            ("message", self.renderer.render_for_facebook(payload)),
            ("link", payload.url.clone()),
            ("access_token", token.to_string()),
        ];
        if let Some(at) = self.scheduled_publish_time(payload) {
            form.push(("published", "false".to_string()));
            form.push(("scheduled_publish_time", at.to_string()));
        }

        let url = format!(
            "{}/{}/{}/feed",
            self.config.base_url.trim_end_matches('/'),
            self.config.graph_version,
            page_id
        );

        let response = self
            .client
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(|e| http::send_error(e, self.config.timeout))?;

        if !response.status().is_success() {
            return Err(http::error_for_response(response).await);
        }

        let status = response.status();
        let feed: FeedResponse = response
            .json()
            .await
            .map_err(|e| PublishError::InvalidResponse(e.to_string()))?;

        Ok(PublishReceipt::new(feed.id)
            .with_status(status.as_u16(), status.canonical_reason().unwrap_or_default()))
    }

    fn platform(&self) -> PlatformKey {
        PlatformKey::Facebook
    }
}
