//! Static file serving module
//!
//! Loads assets from the public content root, resolves their content type,
//! and builds responses with conditional-request and range support.

use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime, resolve_range, RangeOutcome};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Serve a request path from the content root
pub async fn serve(ctx: &RequestContext<'_>, public_dir: &str) -> Response<Full<Bytes>> {
    let Some(file_path) = resolve_asset_path(public_dir, ctx.path) else {
        return http::build_404_response();
    };

    let content = match fs::read(&file_path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {}",
                file_path.display(),
                e
            ));
            return http::build_404_response();
        }
    };

    let content_type =
        mime::get_content_type(file_path.extension().and_then(|e| e.to_str()));

    build_asset_response(content, content_type, ctx)
}

/// Resolve a request path to a file inside the content root.
///
/// Rejects directory traversal by cleaning the path and verifying the
/// canonical result still lives under the canonical root. Directory
/// requests fall back to an `index.html` inside the directory.
pub fn resolve_asset_path(public_dir: &str, path: &str) -> Option<PathBuf> {
    let clean_path = path.trim_start_matches('/').replace("..", "");
    let mut file_path = Path::new(public_dir).join(clean_path);

    let root_canonical = match Path::new(public_dir).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Content root not found or inaccessible '{public_dir}': {e}"
            ));
            return None;
        }
    };

    if file_path.is_dir() {
        file_path = file_path.join("index.html");
    }

    // Missing file is a plain 404, not worth a log line
    let file_canonical = file_path.canonicalize().ok()?;
    if !file_canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            path,
            file_canonical.display()
        ));
        return None;
    }

    if !file_canonical.is_file() {
        return None;
    }

    Some(file_canonical)
}

/// Build the response for a loaded asset: 304, 206, or full 200
fn build_asset_response(
    data: Vec<u8>,
    content_type: &str,
    ctx: &RequestContext<'_>,
) -> Response<Full<Bytes>> {
    let etag = cache::generate_etag(&data);
    let total_size = data.len();

    if cache::etag_matches(ctx.if_none_match.as_deref(), &etag) {
        return http::build_304_response(&etag);
    }

    match resolve_range(ctx.range_header.as_deref(), total_size) {
        RangeOutcome::Partial(range) => {
            let body = Bytes::from(data[range.start..=range.end].to_vec());
            http::build_206_response(body, content_type, &etag, range, total_size, ctx.is_head)
        }
        RangeOutcome::NotSatisfiable => http::build_416_response(total_size),
        RangeOutcome::Full => {
            http::build_200_response(Bytes::from(data), content_type, &etag, ctx.is_head)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;

    /// Content root on disk, removed on drop
    struct TestRoot(PathBuf);

    impl TestRoot {
        fn new(name: &str) -> Self {
            let root = std::env::temp_dir().join(format!("asset-cdn-test-{name}-{}", std::process::id()));
            std_fs::create_dir_all(root.join("addressables/standalone/v0.1.0")).unwrap();
            std_fs::write(
                root.join("addressables/standalone/v0.1.0/catalog.json"),
                b"{}",
            )
            .unwrap();
            std_fs::write(root.join("cdn_manifest.json"), b"{\"v\":1}").unwrap();
            Self(root)
        }

        fn dir(&self) -> &str {
            self.0.to_str().unwrap()
        }
    }

    impl Drop for TestRoot {
        fn drop(&mut self) {
            let _ = std_fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn test_resolve_existing_file() {
        let root = TestRoot::new("resolve");
        let resolved =
            resolve_asset_path(root.dir(), "/addressables/standalone/v0.1.0/catalog.json");
        assert!(resolved.is_some());
        assert!(resolved.unwrap().ends_with("catalog.json"));
    }

    #[test]
    fn test_resolve_missing_file() {
        let root = TestRoot::new("missing");
        assert!(resolve_asset_path(root.dir(), "/maps/nope.png").is_none());
    }

    #[test]
    fn test_traversal_is_rejected() {
        let root = TestRoot::new("traversal");
        assert!(resolve_asset_path(root.dir(), "/../../etc/passwd").is_none());
        assert!(resolve_asset_path(root.dir(), "/..%2f..%2fetc/passwd").is_none());
    }

    #[test]
    fn test_missing_root_is_none() {
        assert!(resolve_asset_path("no-such-content-root", "/cdn_manifest.json").is_none());
    }
}
