//! LinkedIn UGC post adapter

use async_trait::async_trait;
use hirecast_domain::usecases::Renderer;
use hirecast_domain::{PlatformKey, PublishError, PublishPayload, PublishReceipt, SocialPublisher};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::credentials::Credential;
use crate::http::{self, DEFAULT_TIMEOUT};

/// Settings for the LinkedIn publisher
#[derive(Debug, Clone)]
pub struct LinkedInConfig {
    pub access_token: Credential,
    /// Numeric organization id or a full `urn:li:organization:` URN
    pub organization: Credential,
    pub base_url: String,
    pub timeout: Duration,
}

impl LinkedInConfig {
    pub fn new(access_token: Credential, organization: Credential) -> Self {
        Self {
            access_token,
            organization,
            base_url: "https://api.linkedin.com".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Publishes job ads as organization article shares
pub struct LinkedInPublisher {
    client: Client,
    config: LinkedInConfig,
    renderer: Renderer,
}

impl LinkedInPublisher {
    pub fn new(config: LinkedInConfig) -> Self {
        Self {
            client: http::build_client(config.timeout),
            config,
            renderer: Renderer::default(),
        }
    }
}

fn organization_urn(organization: &str) -> String {
    let organization = organization.trim();
    if organization.starts_with("urn:li:") {
        organization.to_string()
    } else {
        format!("urn:li:organization:{}", organization)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UgcPostRequest {
    author: String,
    lifecycle_state: &'static str,
    specific_content: SpecificContent,
    visibility: Visibility,
}

#[derive(Serialize)]
struct SpecificContent {
    #[serde(rename = "com.linkedin.ugc.ShareContent")]
    share_content: ShareContent,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ShareContent {
    share_commentary: TextValue,
    share_media_category: &'static str,
    media: Vec<ShareMedia>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ShareMedia {
    status: &'static str,
    original_url: String,
    title: TextValue,
}

#[derive(Serialize)]
struct TextValue {
    text: String,
}

#[derive(Serialize)]
struct Visibility {
    #[serde(rename = "com.linkedin.ugc.MemberNetworkVisibility")]
    member_network_visibility: &'static str,
}

#[derive(Deserialize)]
struct UgcPostResponse {
    id: Option<String>,
}

#[async_trait]
impl SocialPublisher for LinkedInPublisher {
    async fn publish(&self, payload: &PublishPayload) -> Result<PublishReceipt, PublishError> {
        let token = self.config.access_token.require()?;
        let author = organization_urn(self.config.organization.require()?);

        let request = UgcPostRequest {
            author,
            lifecycle_state: "PUBLISHED",
            specific_content: SpecificContent {
                share_content: ShareContent {
                    share_commentary: TextValue {
                        text: self.renderer.render_for_linkedin(payload),
                    },
                    share_media_category: "ARTICLE",
                    media: vec![ShareMedia {
                        status: "READY",
                        original_url: payload.url.clone(),
                        title: TextValue {
                            text: payload.title.clone(),
                        },
                    }],
                },
            },
            visibility: Visibility {
                member_network_visibility: "PUBLIC",
            },
        };

        let url = format!("{}/v2/ugcPosts", self.config.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .header("X-Restli-Protocol-Version", "2.0.0")
            .json(&request)
            .send()
            .await
            .map_err(|e| http::send_error(e, self.config.timeout))?;

        if !response.status().is_success() {
            return Err(http::error_for_response(response).await);
        }

        let status = response.status();
        let header_id = response
            .headers()
            .get("x-restli-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let id = match header_id {
            Some(id) => id,
            None => response
                .json::<UgcPostResponse>()
                .await
                .ok()
                .and_then(|body| body.id)
                .ok_or_else(|| {
                    PublishError::InvalidResponse("LinkedIn response carried no post id".into())
                })?,
        };

        Ok(PublishReceipt::new(id)
            .with_status(status.as_u16(), status.canonical_reason().unwrap_or_default()))
    }

    fn platform(&self) -> PlatformKey {
        PlatformKey::Linkedin
    }
}
