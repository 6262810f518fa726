//! hirecast domain crate
//!
//! This crate contains the core domain logic following hexagonal architecture:
//! - `model`: Domain entities and value objects
//! - `ports`: Trait definitions for external dependencies (adapters)
//! - `registry`: Platform key to publisher mapping
//! - `usecases`: Publish fan-out orchestration and rendering

pub mod model;
pub mod ports;
pub mod registry;
pub mod usecases;

pub use model::*;
pub use ports::*;
pub use registry::AdapterRegistry;

use sha2::{Digest, Sha256};

/// Compute the deduplication key the trigger queue uses for a publish request
///
/// The platform list is normalized (trimmed, lowercased, sorted, deduplicated)
/// so redeliveries with reordered platforms collapse onto the same key.
pub fn compute_dedup_key(job_id: &str, organization_id: &str, platforms: &[String]) -> String {
    let mut normalized: Vec<String> = platforms
        .iter()
        .map(|p| p.trim().to_ascii_lowercase())
        .filter(|p| !p.is_empty())
        .collect();
    normalized.sort();
    normalized.dedup();

    let mut hasher = Sha256::new();
    hasher.update(job_id.as_bytes());
    hasher.update([0u8]);
    hasher.update(organization_id.as_bytes());
    hasher.update([0u8]);
    hasher.update(normalized.join(",").as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn platforms(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn dedup_key_ignores_order_and_case() {
        let a = compute_dedup_key("job_1", "org_1", &platforms(&["x", "LinkedIn"]));
        let b = compute_dedup_key("job_1", "org_1", &platforms(&["linkedin", "X", "x"]));
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn dedup_key_separates_fields() {
        let a = compute_dedup_key("job_1", "org_1", &platforms(&["x"]));
        let b = compute_dedup_key("job_1org_1", "", &platforms(&["x"]));
        let c = compute_dedup_key("job_1", "org_2", &platforms(&["x"]));
        assert_ne!(a, b);
        assert_ne!(a, c);
    }
}
