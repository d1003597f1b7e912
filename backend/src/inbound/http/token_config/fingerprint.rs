//! Token secret fingerprinting for operational visibility.
//!
//! Operators compare fingerprints across replicas to confirm they share a
//! secret without ever seeing it.

use sha2::{Digest, Sha256};

use super::TokenSecret;

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// First 8 bytes of the SHA-256 of the secret, as 16 lowercase hex digits.
#[must_use]
pub fn secret_fingerprint(secret: &TokenSecret) -> String {
    fingerprint_bytes(secret.as_bytes())
}

fn fingerprint_bytes(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    hex::encode(digest.get(..FINGERPRINT_BYTES).unwrap_or_default())
}
