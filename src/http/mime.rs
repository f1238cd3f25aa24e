//! Content-type resolution module
//!
//! Maps file extensions to MIME types for the asset trees this CDN serves.
//! A small set of CDN-specific overrides is consulted before the generic
//! extension table.

/// Content-type overrides for extensions the generic table would
/// misclassify or leave ambiguous.
///
/// Addressables catalogs must be declared as JSON with an explicit charset,
/// and `.hash` companion files have no conventional MIME mapping at all.
pub fn content_type_override(extension: Option<&str>) -> Option<&'static str> {
    match extension {
        Some("json") => Some("application/json; charset=utf-8"),
        Some("hash") => Some("text/plain; charset=utf-8"),
        _ => None,
    }
}

/// Resolve the Content-Type for a file extension.
///
/// Overrides win; anything unknown falls back to a generic binary type,
/// which is the right answer for Addressables `.bundle` payloads.
pub fn get_content_type(extension: Option<&str>) -> &'static str {
    if let Some(forced) = content_type_override(extension) {
        return forced;
    }

    match extension {
        // Text
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("txt" | "md") => "text/plain; charset=utf-8",
        Some("xml") => "application/xml",

        // Maps and UI images
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",

        // Audio logs
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",
        Some("flac") => "audio/flac",
        Some("m4a") => "audio/mp4",

        // Video briefings
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",

        // Archives
        Some("zip") => "application/zip",
        Some("gz" | "gzip") => "application/gzip",

        // Default, covers .bundle and .bin asset payloads
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_override() {
        assert_eq!(
            get_content_type(Some("json")),
            "application/json; charset=utf-8"
        );
    }

    #[test]
    fn test_hash_override() {
        assert_eq!(get_content_type(Some("hash")), "text/plain; charset=utf-8");
    }

    #[test]
    fn test_asset_types() {
        assert_eq!(get_content_type(Some("png")), "image/png");
        assert_eq!(get_content_type(Some("mp3")), "audio/mpeg");
        assert_eq!(get_content_type(Some("webp")), "image/webp");
        assert_eq!(get_content_type(Some("html")), "text/html; charset=utf-8");
    }

    #[test]
    fn test_bundle_falls_back_to_binary() {
        assert_eq!(
            get_content_type(Some("bundle")),
            "application/octet-stream"
        );
        assert_eq!(get_content_type(None), "application/octet-stream");
    }

    #[test]
    fn test_override_is_none_for_regular_types() {
        assert!(content_type_override(Some("png")).is_none());
        assert!(content_type_override(None).is_none());
    }
}
