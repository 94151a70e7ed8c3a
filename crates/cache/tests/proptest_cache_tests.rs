//! Property-based tests for digest stability and cache bounding behaviors.
//!
//! These verify the behavioral contracts of the render cache:
//! - Determinism: same text always produces the same digest
//! - Sensitivity: different text produces different digests
//! - Bounding: the entry count never exceeds capacity, whatever the inputs

use proptest::prelude::*;
use vellum_cache::{ContentDigest, RenderCache};

/// Generate markdown-ish document text, including non-ASCII.
fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[ -~]{0,64}".prop_map(String::from),
        "[#>*a-z0-9 \\n]{1,128}".prop_map(String::from),
        "(é|日本語|αβγ|[a-z]){1,32}".prop_map(String::from),
    ]
}

proptest! {
    /// Contract: same text always produces the same digest.
    ///
    /// If this ever broke, identical previews would stop hitting the cache.
    #[test]
    fn digest_is_deterministic(text in text_strategy()) {
        let first = ContentDigest::of_text(&text);
        let second = ContentDigest::of_text(&text);
        prop_assert_eq!(first, second);
    }

    /// Contract: the digest is always 64 lowercase hex characters.
    #[test]
    fn digest_is_stable_hex(text in text_strategy()) {
        let digest = ContentDigest::of_text(&text);
        prop_assert_eq!(digest.as_hex().len(), 64);
        prop_assert!(digest.as_hex().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    /// Contract: distinct text produces distinct digests.
    ///
    /// A SHA-256 collision between two short documents would mean one
    /// document silently received the other's rendered output.
    #[test]
    fn digest_distinguishes_distinct_text(a in text_strategy(), b in text_strategy()) {
        prop_assume!(a != b);
        prop_assert_ne!(ContentDigest::of_text(&a), ContentDigest::of_text(&b));
    }
}

proptest! {
    /// Contract: after any sequence of renders, the cache never holds more
    /// than `capacity` entries, and rendering never changes the output.
    #[test]
    fn cache_never_exceeds_capacity(
        texts in prop::collection::vec(text_strategy(), 1..40),
        capacity in 0usize..8,
    ) {
        let cache = RenderCache::new(capacity);
        for text in &texts {
            let rendered = cache.render(text, |t| format!("<p>{t}</p>"));
            // Empty input maps to the fixed empty output, bypassing the cache.
            let expected = if text.is_empty() { String::new() } else { format!("<p>{text}</p>") };
            prop_assert_eq!(rendered, expected);
            prop_assert!(cache.len() <= capacity);
        }
    }

    /// Contract: re-rendering the full sequence serves every non-empty,
    /// still-cached text from the store rather than the transform.
    #[test]
    fn hits_accumulate_on_replay(
        texts in prop::collection::vec("[a-f]{1,8}", 1..16),
    ) {
        let cache = RenderCache::new(texts.len());
        for text in &texts {
            cache.render(text, str::to_uppercase);
        }
        let first_pass = cache.stats();
        for text in &texts {
            cache.render(text, str::to_uppercase);
        }
        // Everything fit in capacity, so the replay adds no misses and every
        // replayed render is a hit.
        prop_assert_eq!(cache.stats().misses, first_pass.misses);
        prop_assert_eq!(cache.stats().hits, first_pass.hits + texts.len() as u64);
    }
}
