//! X API write adapter for publishing job ads

use async_trait::async_trait;
use hirecast_domain::usecases::{RenderConfig, Renderer};
use hirecast_domain::{PlatformKey, PublishError, PublishPayload, PublishReceipt, SocialPublisher};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::credentials::Credential;
use crate::http::{self, DEFAULT_TIMEOUT};

/// Settings for the X publisher
#[derive(Debug, Clone)]
pub struct XConfig {
    /// OAuth 2.0 user-context bearer token
    pub bearer_token: Credential,
    pub base_url: String,
    pub max_chars: usize,
    pub timeout: Duration,
}

impl XConfig {
    pub fn new(bearer_token: Credential) -> Self {
        Self {
            bearer_token,
            base_url: "https://api.twitter.com".to_string(),
            max_chars: 280,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// X API publisher for creating posts
pub struct XPublisher {
    client: Client,
    config: XConfig,
    renderer: Renderer,
}

impl XPublisher {
    pub fn new(config: XConfig) -> Self {
        let renderer = Renderer::new(RenderConfig {
            x_max_chars: config.max_chars,
            ..Default::default()
        });

        Self {
            client: http::build_client(config.timeout),
            config,
            renderer,
        }
    }
}

#[derive(Serialize)]
struct CreateTweetRequest {
    text: String,
}

#[derive(Deserialize)]
struct CreateTweetResponse {
    data: TweetData,
}

#[derive(Deserialize)]
struct TweetData {
    id: String,
}

#[async_trait]
impl SocialPublisher for XPublisher {
    async fn publish(&self, payload: &PublishPayload) -> Result<PublishReceipt, PublishError> {
        let token = self.config.bearer_token.require()?;

        let text = self.renderer.render_for_x(payload);
        let len = text.chars().count();
        if len > self.config.max_chars {
            return Err(PublishError::ContentTooLong {
                len,
                max: self.config.max_chars,
            });
        }

        if !payload.media.is_empty() {
            tracing::debug!(
                count = payload.media.len(),
                "Media attachments are not uploaded to X; posting text only"
            );
        }

        let url = format!("{}/2/tweets", self.config.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&CreateTweetRequest { text })
            .send()
            .await
            .map_err(|e| http::send_error(e, self.config.timeout))?;

        if !response.status().is_success() {
            return Err(http::error_for_response(response).await);
        }

        let status = response.status();
        let tweet_response: CreateTweetResponse = response
            .json()
            .await
            .map_err(|e| PublishError::InvalidResponse(e.to_string()))?;

        Ok(PublishReceipt::new(tweet_response.data.id.clone())
            .with_status(status.as_u16(), status.canonical_reason().unwrap_or_default())
            .with_message(format!("https://x.com/i/status/{}", tweet_response.data.id)))
    }

    fn platform(&self) -> PlatformKey {
        PlatformKey::X
    }
}
