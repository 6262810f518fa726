//! hirecast adapters crate
//!
//! This crate contains infrastructure adapters implementing the domain ports:
//! - `website`: the no-op company site publisher
//! - `linkedin`, `x`, `facebook`: social platform API publishers
//! - `stub`: offline publisher for dry runs and tests
//! - `outbox`: JSONL outbox for review-before-posting

mod credentials;
mod facebook;
mod http;
mod linkedin;
pub mod outbox;
mod stub;
mod website;

pub mod x_api;

pub use credentials::Credential;
pub use http::DEFAULT_TIMEOUT;

/// Re-exports for platform publishers
pub mod platforms {
    pub use crate::facebook::{FacebookConfig, FacebookPublisher};
    pub use crate::linkedin::{LinkedInConfig, LinkedInPublisher};
    pub use crate::stub::StubPublisher;
    pub use crate::website::WebsitePublisher;
    pub use crate::x_api::{XConfig, XPublisher};
}
