//! Publish command - one-shot fan-out of a trigger request

use anyhow::{Context, Result};
use hirecast_adapters::{
    Credential,
    outbox::{OutboxPublisher, OutboxWriter},
    platforms::{
        FacebookConfig, FacebookPublisher, LinkedInConfig, LinkedInPublisher, StubPublisher,
        WebsitePublisher, XConfig, XPublisher,
    },
};
use hirecast_domain::{
    AdapterRegistry, PlatformKey, PublishRequest, SocialPublisher, SocialResult,
    compute_dedup_key,
    usecases::{PublishConfig, PublishOrchestrator},
};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::args::PublishArgs;
use crate::config::AppConfig;

/// How non-website platforms are reached
pub(crate) enum Delivery {
    Live,
    DryRun,
    Outbox(OutboxWriter),
}

pub async fn execute(args: PublishArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;

    let request = read_request(&args.file)?;

    let delivery = match (&args.outbox, args.dry_run) {
        (Some(path), _) => {
            let writer = OutboxWriter::new(path.clone())
                .await
                .context("Failed to initialize outbox writer")?;
            tracing::info!(outbox = %path.display(), "Writing posts to outbox");
            Delivery::Outbox(writer)
        }
        (None, true) => Delivery::DryRun,
        (None, false) => Delivery::Live,
    };

    let dedup_key = compute_dedup_key(
        request.job.id.as_deref().unwrap_or_default(),
        &request.organization_id,
        &request.platforms,
    );
    tracing::info!(
        organization_id = %request.organization_id,
        dedup_key = %dedup_key,
        dry_run = args.dry_run,
        "Publishing request"
    );

    let orchestrator = build_orchestrator(&config, &delivery);
    let results = orchestrator.publish_request(request).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_results(&results);
    }

    Ok(())
}

fn read_request(path: &Path) -> Result<PublishRequest> {
    let raw = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read request from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read request file: {}", path.display()))?
    };

    serde_json::from_str(&raw).context("Failed to parse publish request")
}

pub(crate) fn build_orchestrator(config: &AppConfig, delivery: &Delivery) -> PublishOrchestrator {
    let registry = build_registry(config, delivery);
    tracing::debug!(?registry, "Adapter registry built");

    PublishOrchestrator::new(
        Arc::new(registry),
        PublishConfig {
            // Just past the HTTP client timeout
            adapter_timeout: config.adapter_timeout() + Duration::from_secs(1),
        },
    )
}

/// One adapter per enabled platform, credentials read from the environment now
pub(crate) fn build_registry(config: &AppConfig, delivery: &Delivery) -> AdapterRegistry {
    PlatformKey::ALL
        .into_iter()
        .filter(|platform| config.platform_enabled(*platform))
        .map(|platform| -> Arc<dyn SocialPublisher> {
            match (platform, delivery) {
                (PlatformKey::Website, _) => Arc::new(WebsitePublisher::new()),
                (_, Delivery::DryRun) => Arc::new(StubPublisher::new(platform)),
                (_, Delivery::Outbox(writer)) => {
                    Arc::new(OutboxPublisher::new(writer.clone(), platform))
                }
                (_, Delivery::Live) => build_live_publisher(config, platform),
            }
        })
        .fold(AdapterRegistry::new(), |registry, adapter| {
            registry.with_adapter(adapter)
        })
}

fn build_live_publisher(config: &AppConfig, platform: PlatformKey) -> Arc<dyn SocialPublisher> {
    let timeout = config.adapter_timeout();
    match platform {
        PlatformKey::Website => Arc::new(WebsitePublisher::new()),
        PlatformKey::Linkedin => Arc::new(LinkedInPublisher::new(LinkedInConfig {
            base_url: config.linkedin.base_url.clone(),
            timeout,
            ..LinkedInConfig::new(
                Credential::from_env(&config.linkedin.access_token_env),
                Credential::from_env(&config.linkedin.organization_urn_env),
            )
        })),
        PlatformKey::X => Arc::new(XPublisher::new(XConfig {
            base_url: config.x.base_url.clone(),
            max_chars: config.x.max_chars,
            timeout,
            ..XConfig::new(Credential::from_env(&config.x.bearer_token_env))
        })),
        PlatformKey::Facebook => Arc::new(FacebookPublisher::new(FacebookConfig {
            graph_version: config.facebook.graph_version.clone(),
            base_url: config.facebook.base_url.clone(),
            timeout,
            ..FacebookConfig::new(
                Credential::from_env(&config.facebook.page_id_env),
                Credential::from_env(&config.facebook.page_access_token_env),
            )
        })),
    }
}

fn print_results(results: &[SocialResult]) {
    if results.is_empty() {
        println!("No platforms selected");
        return;
    }

    for result in results {
        let symbol = if result.ok { "✓" } else { "✗" };
        let detail = if result.ok {
            result.external_id.as_deref().unwrap_or_default()
        } else {
            result.message.as_deref().unwrap_or("failed")
        };
        println!("{} {}: {}", symbol, result.platform, detail);
        if let Some(retry) = result.retry_after_sec {
            println!("    retry after {}s", retry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_platforms_are_not_registered() {
        let mut config = AppConfig::default();
        config.facebook.enabled = false;

        let registry = build_registry(&config, &Delivery::DryRun);

        assert_eq!(
            registry.platforms(),
            vec![PlatformKey::Website, PlatformKey::Linkedin, PlatformKey::X]
        );
    }

    #[tokio::test]
    async fn dry_run_registry_publishes_through_stubs() {
        let orchestrator = build_orchestrator(&AppConfig::default(), &Delivery::DryRun);
        let request: PublishRequest = serde_json::from_value(serde_json::json!({
            "organizationId": "org_1",
            "teamId": "team_1",
            "job": {
                "id": "job_1",
                "title": "Backend Engineer",
                "company_site": "https://acme.example"
            },
            "platforms": ["facebook", "website"]
        }))
        .unwrap();

        let results = orchestrator.publish_request(request).await.unwrap();

        assert_eq!(results[0].external_id.as_deref(), Some("stub_facebook_1"));
        assert_eq!(
            results[1].external_id.as_deref(),
            Some("https://acme.example/jobs/job_1")
        );
    }
}
