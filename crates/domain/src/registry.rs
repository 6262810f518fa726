//! Adapter registry - maps each platform key to its publisher

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::model::PlatformKey;
use crate::ports::SocialPublisher;

/// Fixed mapping from platform to publisher, built once at startup
#[derive(Clone, Default)]
pub struct AdapterRegistry {
    adapters: HashMap<PlatformKey, Arc<dyn SocialPublisher>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a publisher under its own platform key, replacing any previous one
    pub fn with_adapter(mut self, adapter: Arc<dyn SocialPublisher>) -> Self {
        self.adapters.insert(adapter.platform(), adapter);
        self
    }

    pub fn resolve(&self, key: PlatformKey) -> Option<Arc<dyn SocialPublisher>> {
        self.adapters.get(&key).cloned()
    }

    /// Registered platforms in canonical order
    pub fn platforms(&self) -> Vec<PlatformKey> {
        let mut keys: Vec<_> = self.adapters.keys().copied().collect();
        keys.sort();
        keys
    }
}

impl fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterRegistry")
            .field("platforms", &self.platforms())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PublishPayload, PublishReceipt};
    use crate::ports::PublishError;
    use async_trait::async_trait;

    struct Named(PlatformKey, &'static str);

    #[async_trait]
    impl SocialPublisher for Named {
        async fn publish(&self, _payload: &PublishPayload) -> Result<PublishReceipt, PublishError> {
            Ok(PublishReceipt::new(self.1))
        }

        fn platform(&self) -> PlatformKey {
            self.0
        }
    }

    #[test]
    fn resolves_registered_platforms_only() {
        let registry = AdapterRegistry::new()
            .with_adapter(Arc::new(Named(PlatformKey::X, "x")))
            .with_adapter(Arc::new(Named(PlatformKey::Website, "web")));

        assert!(registry.resolve(PlatformKey::X).is_some());
        assert!(registry.resolve(PlatformKey::Facebook).is_none());
        assert_eq!(
            registry.platforms(),
            vec![PlatformKey::Website, PlatformKey::X]
        );
    }

    #[tokio::test]
    async fn later_registration_replaces_earlier() {
        let registry = AdapterRegistry::new()
            .with_adapter(Arc::new(Named(PlatformKey::X, "first")))
            .with_adapter(Arc::new(Named(PlatformKey::X, "second")));

        let adapter = registry.resolve(PlatformKey::X).unwrap();
        let payload = PublishPayload {
            title: "t".to_string(),
            text: String::new(),
            url: "https://acme.example/jobs/1".to_string(),
            company: String::new(),
            team_id: "team".to_string(),
            schedule_at: None,
            media: vec![],
        };
        let receipt = adapter.publish(&payload).await.unwrap();
        assert_eq!(receipt.external_id, "second");
    }
}
