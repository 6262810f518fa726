//! Domain models and value objects

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;

/// A social platform the fan-out knows how to publish to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKey {
    /// The owning careers site; saving the job already published it
    Website,
    Linkedin,
    /// X (formerly Twitter)
    X,
    Facebook,
}

impl PlatformKey {
    pub const ALL: [PlatformKey; 4] = [
        PlatformKey::Website,
        PlatformKey::Linkedin,
        PlatformKey::X,
        PlatformKey::Facebook,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformKey::Website => "website",
            PlatformKey::Linkedin => "linkedin",
            PlatformKey::X => "x",
            PlatformKey::Facebook => "facebook",
        }
    }
}

impl fmt::Display for PlatformKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when an external platform string does not name a supported platform
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Platform not integrated: {0}")]
pub struct UnknownPlatform(pub String);

impl FromStr for PlatformKey {
    type Err = UnknownPlatform;

    /// Case-insensitive; surrounding whitespace is ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "website" => Ok(PlatformKey::Website),
            "linkedin" => Ok(PlatformKey::Linkedin),
            "x" | "twitter" => Ok(PlatformKey::X),
            "facebook" => Ok(PlatformKey::Facebook),
            _ => Err(UnknownPlatform(s.to_string())),
        }
    }
}

/// Job posting as handed over by the job store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobPosting {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    /// Public careers site root, e.g. `https://acme.example`
    #[serde(default)]
    pub company_site: Option<String>,
}

impl JobPosting {
    /// Canonical public URL of the posting on the company site
    pub fn public_url(&self) -> Option<String> {
        let site = non_blank(self.company_site.as_deref())?;
        let id = non_blank(self.id.as_deref())?;
        Some(format!("{}/jobs/{}", site.trim_end_matches('/'), id))
    }
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// An attachment to publish alongside the post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePayload {
    pub name: String,
    pub content_type: String,
    #[serde(default)]
    pub bytes: Vec<u8>,
}

/// Platform-agnostic description of a job ad, built once per fan-out
#[derive(Debug, Clone, Serialize)]
pub struct PublishPayload {
    pub title: String,
    pub text: String,
    /// Canonical public job URL
    pub url: String,
    pub company: String,
    pub team_id: String,
    /// `None` publishes immediately
    #[serde(with = "time::serde::rfc3339::option")]
    pub schedule_at: Option<OffsetDateTime>,
    pub media: Vec<FilePayload>,
}

/// Successful outcome reported by an adapter
#[derive(Debug, Clone, Default)]
pub struct PublishReceipt {
    /// Platform identifier of the created post
    pub external_id: String,
    pub status: Option<u16>,
    pub status_text: Option<String>,
    pub message: Option<String>,
}

impl PublishReceipt {
    pub fn new(external_id: impl Into<String>) -> Self {
        Self {
            external_id: external_id.into(),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: u16, status_text: impl Into<String>) -> Self {
        self.status = Some(status);
        self.status_text = Some(status_text.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Outcome of one requested platform
///
/// `platform` holds the canonical key for supported platforms and the raw
/// requested string otherwise. A failed result never carries `external_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialResult {
    pub platform: String,
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_after_sec: Option<u64>,
}

impl SocialResult {
    pub const NOT_INTEGRATED: &'static str = "Platform not integrated";

    pub fn success(platform: PlatformKey, receipt: PublishReceipt) -> Self {
        Self {
            platform: platform.to_string(),
            ok: true,
            status: receipt.status,
            status_text: receipt.status_text,
            message: receipt.message,
            external_id: Some(receipt.external_id),
            retry_after_sec: None,
        }
    }

    pub fn failure(platform: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            ok: false,
            status: None,
            status_text: None,
            message: Some(message.into()),
            external_id: None,
            retry_after_sec: None,
        }
    }

    pub fn not_integrated(requested: impl Into<String>) -> Self {
        Self::failure(requested, Self::NOT_INTEGRATED)
    }
}

/// Body delivered by the queue trigger
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    #[serde(default)]
    pub organization_id: String,
    #[serde(default)]
    pub team_id: String,
    #[serde(default)]
    pub job: JobPosting,
    /// Anything other than a JSON array is treated as "no platforms"
    #[serde(default, deserialize_with = "deserialize_platforms")]
    pub platforms: Vec<String>,
    /// RFC 3339 with an explicit offset, e.g. `2026-11-01T09:00:00Z`
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub schedule_at: Option<OffsetDateTime>,
    #[serde(default)]
    pub media: Vec<FilePayload>,
}

fn deserialize_platforms<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let platforms = match value {
        Some(serde_json::Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
        _ => vec![],
    };
    Ok(platforms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_key_parses_case_insensitively() {
        assert_eq!("LINKEDIN".parse::<PlatformKey>(), Ok(PlatformKey::Linkedin));
        assert_eq!(" LinkedIn ".parse::<PlatformKey>(), Ok(PlatformKey::Linkedin));
        assert_eq!("Twitter".parse::<PlatformKey>(), Ok(PlatformKey::X));
        assert_eq!("X".parse::<PlatformKey>(), Ok(PlatformKey::X));
        assert!("myspace".parse::<PlatformKey>().is_err());
    }

    #[test]
    fn public_url_joins_site_and_id() {
        let job = JobPosting {
            id: Some("job-42".to_string()),
            company_site: Some("https://acme.example/".to_string()),
            ..Default::default()
        };
        assert_eq!(
            job.public_url().as_deref(),
            Some("https://acme.example/jobs/job-42")
        );

        let no_site = JobPosting {
            id: Some("job-42".to_string()),
            company_site: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(no_site.public_url().is_none());
    }

    #[test]
    fn request_with_non_list_platforms_has_none() {
        let request: PublishRequest = serde_json::from_value(serde_json::json!({
            "organizationId": "org",
            "teamId": "team",
            "job": {"id": "1", "title": "Engineer"},
            "platforms": "linkedin"
        }))
        .unwrap();

        assert!(request.platforms.is_empty());
    }

    #[test]
    fn request_parses_wire_shape() {
        let request: PublishRequest = serde_json::from_value(serde_json::json!({
            "organizationId": "org_1",
            "teamId": "team_1",
            "job": {
                "id": "job_1",
                "title": "Backend Engineer",
                "description": "Build things",
                "company_name": "Acme",
                "company_site": "https://acme.example"
            },
            "platforms": ["website", "LINKEDIN", 7],
            "scheduleAt": "2026-11-01T09:00:00Z"
        }))
        .unwrap();

        assert_eq!(request.platforms, vec!["website", "LINKEDIN", "7"]);
        assert_eq!(request.job.company_name.as_deref(), Some("Acme"));
        assert!(request.schedule_at.is_some());
    }

    #[test]
    fn schedule_at_requires_an_offset() {
        let with_offset: PublishRequest =
            serde_json::from_str(r#"{"scheduleAt":"2026-11-01T09:00:00+01:00"}"#).unwrap();
        assert_eq!(
            with_offset.schedule_at.map(|t| t.unix_timestamp()),
            Some(1_793_520_000)
        );

        let local = serde_json::from_str::<PublishRequest>(r#"{"scheduleAt":"2026-11-01T09:00:00"}"#);
        assert!(local.is_err());

        let absent: PublishRequest = serde_json::from_str("{}").unwrap();
        assert!(absent.schedule_at.is_none());
    }

    #[test]
    fn failed_result_serializes_without_external_id() {
        let value = serde_json::to_value(SocialResult::not_integrated("myspace")).unwrap();
        assert_eq!(value["platform"], "myspace");
        assert_eq!(value["ok"], false);
        assert_eq!(value["message"], "Platform not integrated");
        assert!(value.get("externalId").is_none());
    }
}
