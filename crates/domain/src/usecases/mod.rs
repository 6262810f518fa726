//! Application use cases / business logic

pub mod publish;
pub mod render;

pub use publish::{OrchestrateError, PublishConfig, PublishOrchestrator};
pub use render::{RenderConfig, Renderer};
