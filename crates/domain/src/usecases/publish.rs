//! Publish use case - fans a job posting out to the selected platforms

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::FutureExt;
use futures::future::join_all;
use time::OffsetDateTime;

use crate::model::{
    FilePayload, JobPosting, PlatformKey, PublishPayload, PublishRequest, SocialResult, non_blank,
};
use crate::ports::SocialPublisher;
use crate::registry::AdapterRegistry;

/// Configuration for the publish orchestrator
#[derive(Debug, Clone)]
pub struct PublishConfig {
    /// Outer deadline for a single adapter invocation
    pub adapter_timeout: Duration,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            adapter_timeout: Duration::from_secs(15),
        }
    }
}

/// Errors that abort a whole fan-out
#[derive(Debug, thiserror::Error)]
pub enum OrchestrateError {
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Dispatches one payload to every requested platform and collects the outcomes
#[derive(Debug, Clone)]
pub struct PublishOrchestrator {
    registry: Arc<AdapterRegistry>,
    config: PublishConfig,
}

impl PublishOrchestrator {
    pub fn new(registry: Arc<AdapterRegistry>, config: PublishConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    /// Run a trigger request through the fan-out
    pub async fn publish_request(
        &self,
        request: PublishRequest,
    ) -> Result<Vec<SocialResult>, OrchestrateError> {
        self.publish_if_selected(
            &request.job,
            &request.team_id,
            &request.platforms,
            request.schedule_at,
            request.media,
        )
        .await
    }

    /// Publish `job` to each entry of `platforms`
    ///
    /// Returns one result per entry, in request order. Only missing job
    /// identity (id, title, site URL) fails the whole call, and it does so
    /// before any adapter runs.
    pub async fn publish_if_selected(
        &self,
        job: &JobPosting,
        team_id: &str,
        platforms: &[String],
        schedule_at: Option<OffsetDateTime>,
        media: Vec<FilePayload>,
    ) -> Result<Vec<SocialResult>, OrchestrateError> {
        if platforms.is_empty() {
            tracing::debug!("No platforms selected, nothing to publish");
            return Ok(vec![]);
        }

        let payload = build_payload(job, team_id, schedule_at, media)?;

        tracing::info!(
            url = %payload.url,
            team_id = %payload.team_id,
            platforms = ?platforms,
            scheduled = payload.schedule_at.is_some(),
            "Publishing job"
        );

        let payload = &payload;
        let tasks = platforms.iter().map(|requested| async move {
            let key = match requested.parse::<PlatformKey>() {
                Ok(key) => key,
                Err(_) => {
                    tracing::warn!(platform = %requested, "Platform not integrated");
                    return SocialResult::not_integrated(requested.trim());
                }
            };
            match self.registry.resolve(key) {
                Some(adapter) => self.dispatch(key, adapter.as_ref(), payload).await,
                None => {
                    tracing::warn!(platform = %key, "No publisher registered");
                    SocialResult::not_integrated(key.as_str())
                }
            }
        });

        let results = join_all(tasks).await;

        tracing::info!(
            requested = results.len(),
            succeeded = results.iter().filter(|r| r.ok).count(),
            "Publish fan-out complete"
        );

        Ok(results)
    }

    /// Invoke one adapter under its deadline, converting every outcome to a result
    async fn dispatch(
        &self,
        key: PlatformKey,
        adapter: &dyn SocialPublisher,
        payload: &PublishPayload,
    ) -> SocialResult {
        let started = Instant::now();
        let guarded = AssertUnwindSafe(adapter.publish(payload)).catch_unwind();

        let result = match tokio::time::timeout(self.config.adapter_timeout, guarded).await {
            Ok(Ok(outcome)) => SocialResult::from_outcome(key, outcome),
            Ok(Err(panic)) => SocialResult::failure(
                key.as_str(),
                format!("Adapter panicked: {}", panic_message(panic.as_ref())),
            ),
            Err(_) => SocialResult::failure(
                key.as_str(),
                format!("Timed out after {}s", self.config.adapter_timeout.as_secs()),
            ),
        };

        let elapsed_ms = started.elapsed().as_millis() as u64;
        if result.ok {
            tracing::info!(
                platform = %key,
                elapsed_ms,
                external_id = ?result.external_id,
                "Published"
            );
        } else {
            tracing::error!(
                platform = %key,
                elapsed_ms,
                status = ?result.status,
                error = ?result.message,
                "Publish failed"
            );
        }

        result
    }
}

/// Validate the job and build the single payload shared by all adapters
fn build_payload(
    job: &JobPosting,
    team_id: &str,
    schedule_at: Option<OffsetDateTime>,
    media: Vec<FilePayload>,
) -> Result<PublishPayload, OrchestrateError> {
    let mut missing = Vec::new();
    if non_blank(job.id.as_deref()).is_none() {
        missing.push("id");
    }
    let title = non_blank(job.title.as_deref());
    if title.is_none() {
        missing.push("title");
    }
    if non_blank(job.company_site.as_deref()).is_none() {
        missing.push("company_site");
    }
    let (Some(title), Some(url)) = (title, job.public_url()) else {
        return Err(OrchestrateError::BadRequest(format!(
            "job is missing required fields: {}",
            missing.join(", ")
        )));
    };

    Ok(PublishPayload {
        title: title.to_string(),
        text: job.description.clone().unwrap_or_default(),
        url,
        company: job.company_name.clone().unwrap_or_default(),
        team_id: team_id.to_string(),
        schedule_at,
        media,
    })
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
