//! Configuration loading and management

use anyhow::{Context, Result};
use hirecast_domain::PlatformKey;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub website: WebsiteConfig,

    #[serde(default)]
    pub linkedin: LinkedInConfig,

    #[serde(default)]
    pub x: XConfig,

    #[serde(default)]
    pub facebook: FacebookConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_adapter_timeout")]
    pub adapter_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default = "default_signing_key_env")]
    pub signing_key_env: String,

    #[serde(default = "default_next_signing_key_env")]
    pub next_signing_key_env: String,

    /// Accept trigger calls without a signature when no key is configured
    #[serde(default)]
    pub allow_unsigned: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebsiteConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkedInConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_linkedin_access_token_env")]
    pub access_token_env: String,

    #[serde(default = "default_linkedin_organization_env")]
    pub organization_urn_env: String,

    #[serde(default = "default_linkedin_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_x_bearer_token_env")]
    pub bearer_token_env: String,

    #[serde(default = "default_x_base_url")]
    pub base_url: String,

    #[serde(default = "default_x_max_chars")]
    pub max_chars: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacebookConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_facebook_page_id_env")]
    pub page_id_env: String,

    #[serde(default = "default_facebook_token_env")]
    pub page_access_token_env: String,

    #[serde(default = "default_facebook_graph_version")]
    pub graph_version: String,

    #[serde(default = "default_facebook_base_url")]
    pub base_url: String,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_adapter_timeout() -> u64 {
    15
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_signing_key_env() -> String {
    "HIRECAST_SIGNING_KEY".to_string()
}

fn default_next_signing_key_env() -> String {
    "HIRECAST_NEXT_SIGNING_KEY".to_string()
}

fn default_true() -> bool {
    true
}

fn default_linkedin_access_token_env() -> String {
    "LINKEDIN_ACCESS_TOKEN".to_string()
}

fn default_linkedin_organization_env() -> String {
    "LINKEDIN_ORGANIZATION_URN".to_string()
}

fn default_linkedin_base_url() -> String {
    "https://api.linkedin.com".to_string()
}

fn default_x_bearer_token_env() -> String {
    "X_BEARER_TOKEN".to_string()
}

fn default_x_base_url() -> String {
    "https://api.twitter.com".to_string()
}

fn default_x_max_chars() -> usize {
    280
}

fn default_facebook_page_id_env() -> String {
    "FACEBOOK_PAGE_ID".to_string()
}

fn default_facebook_token_env() -> String {
    "FACEBOOK_PAGE_ACCESS_TOKEN".to_string()
}

fn default_facebook_graph_version() -> String {
    "v19.0".to_string()
}

fn default_facebook_base_url() -> String {
    "https://graph.facebook.com".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            adapter_timeout_secs: default_adapter_timeout(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            signing_key_env: default_signing_key_env(),
            next_signing_key_env: default_next_signing_key_env(),
            allow_unsigned: false,
        }
    }
}

impl Default for WebsiteConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
        }
    }
}

impl Default for LinkedInConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            access_token_env: default_linkedin_access_token_env(),
            organization_urn_env: default_linkedin_organization_env(),
            base_url: default_linkedin_base_url(),
        }
    }
}

impl Default for XConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            bearer_token_env: default_x_bearer_token_env(),
            base_url: default_x_base_url(),
            max_chars: default_x_max_chars(),
        }
    }
}

impl Default for FacebookConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            page_id_env: default_facebook_page_id_env(),
            page_access_token_env: default_facebook_token_env(),
            graph_version: default_facebook_graph_version(),
            base_url: default_facebook_base_url(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Try default config path if none specified
        let default_path = PathBuf::from("./config.toml");
        let path = config_path.unwrap_or(&default_path);

        if path.exists() {
            builder = builder.add_source(config::File::from(path));
        } else if config_path.is_some() {
            // User specified a path that doesn't exist
            anyhow::bail!("Config file not found: {}", path.display());
        }

        // Add environment variable overrides
        builder = builder.add_source(
            config::Environment::with_prefix("HIRECAST")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    pub fn adapter_timeout(&self) -> Duration {
        Duration::from_secs(self.general.adapter_timeout_secs.max(1))
    }

    pub fn platform_enabled(&self, platform: PlatformKey) -> bool {
        match platform {
            PlatformKey::Website => self.website.enabled,
            PlatformKey::Linkedin => self.linkedin.enabled,
            PlatformKey::X => self.x.enabled,
            PlatformKey::Facebook => self.facebook.enabled,
        }
    }

    /// Generate example configuration as TOML string
    pub fn example_toml() -> String {
        r#"# hirecast configuration
#
# Secrets are never stored here: each *_env key names the environment
# variable the value is read from at startup.

[general]
log_level = "info"
# Per-platform request deadline
adapter_timeout_secs = 15

[server]
bind = "0.0.0.0:8080"
signing_key_env = "HIRECAST_SIGNING_KEY"
next_signing_key_env = "HIRECAST_NEXT_SIGNING_KEY"
# Development only: accept unsigned trigger calls when no key is set
allow_unsigned = false

[website]
enabled = true

[linkedin]
enabled = true
access_token_env = "LINKEDIN_ACCESS_TOKEN"
organization_urn_env = "LINKEDIN_ORGANIZATION_URN"
base_url = "https://api.linkedin.com"

[x]
enabled = true
bearer_token_env = "X_BEARER_TOKEN"
base_url = "https://api.twitter.com"
max_chars = 280

[facebook]
enabled = true
page_id_env = "FACEBOOK_PAGE_ID"
page_access_token_env = "FACEBOOK_PAGE_ACCESS_TOKEN"
graph_version = "v19.0"
base_url = "https://graph.facebook.com"
"#
        .to_string()
    }
}
