//! Content digests used as cache keys.

use sha2::{Digest, Sha256};

/// A content digest: the lowercase hex encoding of the SHA-256 hash of a
/// document's UTF-8 bytes.
///
/// Equal text always yields an equal digest. Distinct text collides only at
/// cryptographic-hash probability, which the cache treats as never.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentDigest(String);

impl ContentDigest {
    /// Compute the digest of a piece of document text.
    #[must_use]
    pub fn of_text(text: &str) -> Self {
        let hash = Sha256::digest(text.as_bytes());
        Self(hex::encode(hash))
    }

    /// Get the hex representation.
    #[must_use]
    pub fn as_hex(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
