//! Request signature gate for the queue trigger
//!
//! The queue signs each delivery with HMAC-SHA256 over the raw body and sends
//! `sha256=<hex>` in the signature header. Two keys are accepted so the queue
//! can rotate its signing key without dropping deliveries.

use hirecast_adapters::Credential;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_HEADER: &str = "x-hirecast-signature";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("missing signature header")]
    Missing,
    #[error("malformed signature")]
    Malformed,
    #[error("signature mismatch")]
    Mismatch,
    #[error("no signing key configured")]
    NotConfigured,
}

#[derive(Debug, Clone)]
pub struct SignatureVerifier {
    keys: Vec<Credential>,
    allow_unsigned: bool,
}

impl SignatureVerifier {
    /// Unset credentials are ignored
    pub fn new(keys: Vec<Credential>, allow_unsigned: bool) -> Self {
        let keys = keys.into_iter().filter(Credential::is_set).collect();
        Self {
            keys,
            allow_unsigned,
        }
    }

    pub fn has_keys(&self) -> bool {
        !self.keys.is_empty()
    }

    /// Header value for `body` signed with `key`
    #[cfg(test)]
    pub(crate) fn sign(key: &str, body: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(key.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(body);
        format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
    }

    pub fn verify(&self, header: Option<&str>, body: &[u8]) -> Result<(), SignatureError> {
        if self.keys.is_empty() {
            return if self.allow_unsigned {
                Ok(())
            } else {
                Err(SignatureError::NotConfigured)
            };
        }

        let header = header.ok_or(SignatureError::Missing)?;
        let encoded = header.trim().strip_prefix("sha256=").unwrap_or(header.trim());
        let signature = hex::decode(encoded).map_err(|_| SignatureError::Malformed)?;

        let matched = self.keys.iter().filter_map(|key| key.require().ok()).any(|key| {
            HmacSha256::new_from_slice(key.as_bytes())
                .map(|mut mac| {
                    mac.update(body);
                    mac.verify_slice(&signature).is_ok()
                })
                .unwrap_or(false)
        });

        if matched {
            Ok(())
        } else {
            Err(SignatureError::Mismatch)
        }
    }
}
