//! Outbox publisher for review-before-posting mode.

use async_trait::async_trait;
use hirecast_domain::usecases::Renderer;
use hirecast_domain::{PlatformKey, PublishError, PublishPayload, PublishReceipt, SocialPublisher};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum OutboxError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct OutboxWriter {
    path: PathBuf,
    file: Arc<Mutex<tokio::fs::File>>,
}

impl OutboxWriter {
    pub async fn new(path: PathBuf) -> Result<Self, OutboxError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;

        Ok(Self {
            path,
            file: Arc::new(Mutex::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn append(&self, entry: &OutboxEntry<'_>) -> Result<(), OutboxError> {
        let line = serde_json::to_string(entry)?;
        let mut file = self.file.lock().await;
        file.write_all(line.as_bytes()).await?;
        file.write_all(b"\n").await?;
        file.flush().await?;
        Ok(())
    }
}

/// Writes the would-be post for one platform to the outbox
#[derive(Debug, Clone)]
pub struct OutboxPublisher {
    writer: OutboxWriter,
    platform: PlatformKey,
    renderer: Renderer,
}

impl OutboxPublisher {
    pub fn new(writer: OutboxWriter, platform: PlatformKey) -> Self {
        Self {
            writer,
            platform,
            renderer: Renderer::default(),
        }
    }
}

#[derive(Serialize)]
struct OutboxEntry<'a> {
    id: String,
    platform: PlatformKey,
    team_id: &'a str,
    url: &'a str,
    title: &'a str,
    text: String,
    #[serde(with = "time::serde::rfc3339::option")]
    schedule_at: Option<OffsetDateTime>,
    media: Vec<&'a str>,
}

#[async_trait]
impl SocialPublisher for OutboxPublisher {
    async fn publish(&self, payload: &PublishPayload) -> Result<PublishReceipt, PublishError> {
        let entry = OutboxEntry {
            id: Uuid::new_v4().to_string(),
            platform: self.platform,
            team_id: &payload.team_id,
            url: &payload.url,
            title: &payload.title,
            text: self.renderer.render_for(self.platform, payload),
            schedule_at: payload.schedule_at,
            media: payload.media.iter().map(|m| m.name.as_str()).collect(),
        };

        self.writer.append(&entry).await.map_err(|error| {
            PublishError::Network(format!("Outbox write failed: {}", error))
        })?;

        Ok(PublishReceipt::new(entry.id)
            .with_message(format!("Queued in outbox {}", self.writer.path().display())))
    }

    fn platform(&self) -> PlatformKey {
        self.platform
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hirecast_domain::FilePayload;
    use serde_json::Value;
    use tempfile::TempDir;

    #[tokio::test]
    async fn outbox_publisher_writes_jsonl_entry() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("nested").join("outbox.jsonl");

        let writer = OutboxWriter::new(path.clone()).await.expect("writer");
        let publisher = OutboxPublisher::new(writer, PlatformKey::X);

        let payload = PublishPayload {
            title: "Backend Engineer".to_string(),
            text: "Build the hiring platform".to_string(),
            url: "https://acme.example/jobs/job_1".to_string(),
            company: "Acme".to_string(),
            team_id: "team_1".to_string(),
            schedule_at: None,
            media: vec![FilePayload {
                name: "banner.png".to_string(),
                content_type: "image/png".to_string(),
                bytes: vec![1, 2, 3],
            }],
        };

        let receipt = publisher.publish(&payload).await.expect("publish");
        assert!(!receipt.external_id.is_empty());

        let contents = tokio::fs::read_to_string(&path).await.expect("read outbox");
        let line = contents.trim();
        let value: Value = serde_json::from_str(line).expect("valid json");

        assert_eq!(value["id"], receipt.external_id.as_str());
        assert_eq!(value["platform"], "x");
        assert_eq!(value["team_id"], "team_1");
        assert_eq!(value["url"], "https://acme.example/jobs/job_1");
        assert_eq!(
            value["text"],
            "We're hiring: Backend Engineer at Acme\nhttps://acme.example/jobs/job_1"
        );
        assert_eq!(value["schedule_at"], Value::Null);
        assert_eq!(value["media"][0], "banner.png");
    }
}
