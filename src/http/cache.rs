//! Cache-control policy module
//!
//! Classifies request paths into cache policies and provides `ETag`
//! generation and conditional request handling.

use hyper::header::{HeaderMap, HeaderValue, CACHE_CONTROL, EXPIRES, PRAGMA};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::config::CdnConfig;

/// Cache policy attached to a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Always fetch fresh: manifest and root JSON. Disables storage on
    /// private and shared caches and carries the legacy HTTP/1.0 signals.
    NoStore,
    /// Long-lived public cache for versioned asset content (max-age seconds)
    Immutable(u32),
    /// No cache headers; leave response defaults alone
    PassThrough,
}

impl CachePolicy {
    /// Apply this policy's headers to a response header map.
    ///
    /// Header mutation only; `PassThrough` is a no-op.
    pub fn apply(self, headers: &mut HeaderMap) {
        match self {
            Self::NoStore => {
                headers.insert(
                    CACHE_CONTROL,
                    HeaderValue::from_static(
                        "no-store, no-cache, must-revalidate, proxy-revalidate",
                    ),
                );
                headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
                headers.insert(EXPIRES, HeaderValue::from_static("0"));
            }
            Self::Immutable(max_age) => {
                let value = format!("public, max-age={max_age}, immutable");
                if let Ok(value) = HeaderValue::from_str(&value) {
                    headers.insert(CACHE_CONTROL, value);
                }
            }
            Self::PassThrough => {}
        }
    }
}

/// Ordered path classification rules, built once at startup.
#[derive(Debug, Clone)]
pub struct CacheRules {
    /// Prefixes forced to `NoStore` (checked first, together with `/`)
    no_store_prefixes: Vec<String>,
    /// Prefixes of versioned asset trees eligible for long-lived caching
    long_cache_prefixes: Vec<String>,
    /// max-age for long-lived caching, in seconds
    long_cache_max_age: u32,
}

impl CacheRules {
    pub fn from_config(cdn: &CdnConfig) -> Self {
        Self {
            no_store_prefixes: cdn.no_store_prefixes.clone(),
            long_cache_prefixes: cdn.long_cache_prefixes.clone(),
            long_cache_max_age: cdn.long_cache_max_age,
        }
    }

    /// Classify a request path. First match wins.
    ///
    /// The manifest rule is a plain prefix match, so `/cdn_manifest_v2.json`
    /// classifies the same as `/cdn_manifest.json`. Matching is
    /// case-sensitive and performed on the path exactly as received.
    pub fn classify(&self, path: &str) -> CachePolicy {
        // Manifest and root JSON: the client must always see the latest
        if path == "/"
            || self
                .no_store_prefixes
                .iter()
                .any(|p| path.starts_with(p.as_str()))
        {
            return CachePolicy::NoStore;
        }

        // Versioned asset folders (v0.1.0, v0.2.0, ...) can be cached hard
        if self
            .long_cache_prefixes
            .iter()
            .any(|p| path.starts_with(p.as_str()))
        {
            return CachePolicy::Immutable(self.long_cache_max_age);
        }

        CachePolicy::PassThrough
    }
}

/// Generate a quoted `ETag` from file content using fast hashing.
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("\"{:x}\"", hasher.finish())
}

/// Check a client `If-None-Match` header against the server `ETag`.
///
/// Handles comma-separated lists and the `*` wildcard. Returns true when the
/// response should be 304 Not Modified.
pub fn etag_matches(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|header| {
        header
            .split(',')
            .any(|candidate| candidate.trim() == etag || candidate.trim() == "*")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> CacheRules {
        CacheRules::from_config(&CdnConfig::default())
    }

    #[test]
    fn test_root_is_no_store() {
        assert_eq!(rules().classify("/"), CachePolicy::NoStore);
    }

    #[test]
    fn test_manifest_prefix_is_no_store() {
        let rules = rules();
        assert_eq!(rules.classify("/cdn_manifest.json"), CachePolicy::NoStore);
        // Deliberately broad prefix semantics
        assert_eq!(rules.classify("/cdn_manifest"), CachePolicy::NoStore);
        assert_eq!(
            rules.classify("/cdn_manifest_v2.json"),
            CachePolicy::NoStore
        );
    }

    #[test]
    fn test_asset_prefixes_are_immutable() {
        let rules = rules();
        for path in [
            "/addressables/standalone/v0.1.0/catalog.json",
            "/maps/outpost9/outpost9_base_layout.png",
            "/ui/icons/extract.png",
            "/audio/sigma/sigma_log_01.mp3",
        ] {
            assert_eq!(rules.classify(path), CachePolicy::Immutable(2_592_000));
        }
    }

    #[test]
    fn test_unmatched_paths_pass_through() {
        let rules = rules();
        assert_eq!(rules.classify("/health"), CachePolicy::PassThrough);
        assert_eq!(rules.classify("/favicon.ico"), CachePolicy::PassThrough);
        // Asset prefixes include the trailing slash
        assert_eq!(rules.classify("/addressables"), CachePolicy::PassThrough);
        // Matching is case-sensitive
        assert_eq!(rules.classify("/Maps/x.png"), CachePolicy::PassThrough);
    }

    #[test]
    fn test_no_store_wins_over_long_cache() {
        // A path satisfying both rule sets resolves via the first rule
        let rules = CacheRules {
            no_store_prefixes: vec!["/cdn_manifest".to_string()],
            long_cache_prefixes: vec!["/cdn_manifest/addressables/".to_string()],
            long_cache_max_age: 2_592_000,
        };
        assert_eq!(
            rules.classify("/cdn_manifest/addressables/x.json"),
            CachePolicy::NoStore
        );
    }

    #[test]
    fn test_no_store_headers() {
        let mut headers = HeaderMap::new();
        CachePolicy::NoStore.apply(&mut headers);
        let cache_control = headers.get(CACHE_CONTROL).unwrap().to_str().unwrap();
        assert!(cache_control.contains("no-store"));
        assert!(cache_control.contains("must-revalidate"));
        assert!(cache_control.contains("proxy-revalidate"));
        assert_eq!(headers.get(PRAGMA).unwrap(), "no-cache");
        assert_eq!(headers.get(EXPIRES).unwrap(), "0");
    }

    #[test]
    fn test_immutable_headers() {
        let mut headers = HeaderMap::new();
        CachePolicy::Immutable(2_592_000).apply(&mut headers);
        assert_eq!(
            headers.get(CACHE_CONTROL).unwrap(),
            "public, max-age=2592000, immutable"
        );
        assert!(headers.get(PRAGMA).is_none());
    }

    #[test]
    fn test_pass_through_sets_nothing() {
        let mut headers = HeaderMap::new();
        CachePolicy::PassThrough.apply(&mut headers);
        assert!(headers.is_empty());
    }

    #[test]
    fn test_generate_etag() {
        let etag = generate_etag(b"catalog content");
        assert!(etag.starts_with('"') && etag.ends_with('"'));
        assert_eq!(etag, generate_etag(b"catalog content"));
        assert_ne!(etag, generate_etag(b"other content"));
    }

    #[test]
    fn test_etag_matches() {
        let etag = "\"abc123\"";
        assert!(etag_matches(Some("\"abc123\""), etag));
        assert!(etag_matches(Some("\"xyz\", \"abc123\""), etag));
        assert!(etag_matches(Some("*"), etag));
        assert!(!etag_matches(Some("\"different\""), etag));
        assert!(!etag_matches(None, etag));
    }
}
