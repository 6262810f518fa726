//! X (Twitter) API adapters

mod write;

pub use write::{XConfig, XPublisher};
