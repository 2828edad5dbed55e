//! Content fingerprinting.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 content fingerprint of extracted text.
///
/// Stable across runs for unchanged content; identical content under two
/// different file names produces identical fingerprints.
pub fn fingerprint(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}
