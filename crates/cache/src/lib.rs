//! Content-addressed render caching for vellum.
//!
//! Rendering markdown to HTML is deterministic but not free, and an editor
//! re-renders the same document text constantly: on every preview refresh, on
//! background timers, and after undo snaps the buffer back to a prior state.
//! This crate avoids recomputing the transform for previously seen inputs
//! while holding only a bounded number of results in memory:
//!
//! - Document text is fingerprinted by [`ContentDigest`] (SHA-256 over the
//!   UTF-8 bytes, hex-encoded).
//! - [`RenderCache`] maps digests to rendered output with a hard capacity
//!   bound and least-recently-used eviction.
//!
//! The rendering engine itself is a collaborator: callers pass the transform
//! as a closure, and the cache only assumes it is deterministic. Identical
//! digest therefore implies identical cached output.

mod digest;
mod store;

pub use digest::ContentDigest;
pub use store::{CacheStats, RenderCache, RenderCacheConfig};

/// Whether a document's UTF-8 byte length strictly exceeds `threshold_kb`
/// kibibytes.
///
/// Callers use this to defer or throttle rendering of very large documents;
/// the cache itself never consults it.
#[must_use]
pub fn is_large(text: &str, threshold_kb: usize) -> bool {
    text.len() / 1024 > threshold_kb
}
