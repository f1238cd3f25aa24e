//! HTTP response building module
//!
//! Builders for the status codes this server produces. Cache-control and
//! CORS headers are not set here; the response-policy layer in the request
//! handler applies them uniformly after the body is built.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::http::range::ByteRange;
use crate::logger;

/// Build a 200 response for a fully served file
pub fn build_200_response(
    data: Bytes,
    content_type: &str,
    etag: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("Accept-Ranges", "bytes")
        .header("ETag", etag)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a 206 Partial Content response
pub fn build_206_response(
    data: Bytes,
    content_type: &str,
    etag: &str,
    range: ByteRange,
    total_size: usize,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = range.len();
    let body = if is_head { Bytes::new() } else { data };

    Response::builder()
        .status(206)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header(
            "Content-Range",
            format!("bytes {}-{}/{}", range.start, range.end, total_size),
        )
        .header("Accept-Ranges", "bytes")
        .header("ETag", etag)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("206", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a 304 Not Modified response
pub fn build_304_response(etag: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(304)
        .header("ETag", etag)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("404 Not Found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("404 Not Found")))
        })
}

/// Build a 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build a 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(413)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("413 Payload Too Large")))
        .unwrap_or_else(|e| {
            log_build_error("413", &e);
            Response::new(Full::new(Bytes::from("413 Payload Too Large")))
        })
}

/// Build a 416 Range Not Satisfiable response
pub fn build_416_response(file_size: usize) -> Response<Full<Bytes>> {
    Response::builder()
        .status(416)
        .header("Content-Type", "text/plain")
        .header("Content-Range", format!("bytes */{file_size}"))
        .body(Full::new(Bytes::from("Range Not Satisfiable")))
        .unwrap_or_else(|e| {
            log_build_error("416", &e);
            Response::new(Full::new(Bytes::from("Range Not Satisfiable")))
        })
}

/// Build a 204 response for an OPTIONS preflight request
pub fn build_preflight_response(enable_cors: bool) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(204)
        .header("Allow", "GET, HEAD, OPTIONS");

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Methods", "GET, HEAD, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type, Range")
            .header("Access-Control-Max-Age", "86400");
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error("OPTIONS", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build a JSON response for the info and health endpoints
pub fn build_json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let json = match serde_json::to_string(body) {
        Ok(j) => j,
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            return Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .header("Content-Type", "application/json; charset=utf-8")
                .body(Full::new(Bytes::from(
                    r#"{"error":"Internal server error"}"#,
                )))
                .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("Error"))));
        }
    };

    let content_length = json.len();
    let body = if is_head { Bytes::new() } else { Bytes::from(json) };

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json; charset=utf-8")
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("JSON", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log a response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_200_head_has_empty_body_and_full_length() {
        let resp = build_200_response(Bytes::from("payload"), "image/png", "\"e\"", true);
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Length"], "7");
        assert_eq!(resp.headers()["Accept-Ranges"], "bytes");
    }

    #[test]
    fn test_206_content_range() {
        let resp = build_206_response(
            Bytes::from("load"),
            "application/octet-stream",
            "\"e\"",
            ByteRange { start: 3, end: 6 },
            7,
            false,
        );
        assert_eq!(resp.status(), 206);
        assert_eq!(resp.headers()["Content-Range"], "bytes 3-6/7");
        assert_eq!(resp.headers()["Content-Length"], "4");
    }

    #[test]
    fn test_builders_set_no_cache_control() {
        // The policy layer owns cache headers
        let resp = build_200_response(Bytes::from("x"), "text/plain", "\"e\"", false);
        assert!(resp.headers().get("Cache-Control").is_none());
        let resp = build_304_response("\"e\"");
        assert!(resp.headers().get("Cache-Control").is_none());
    }

    #[test]
    fn test_preflight_cors_headers() {
        let resp = build_preflight_response(true);
        assert_eq!(resp.status(), 204);
        assert_eq!(
            resp.headers()["Access-Control-Allow-Methods"],
            "GET, HEAD, OPTIONS"
        );

        let resp = build_preflight_response(false);
        assert!(resp
            .headers()
            .get("Access-Control-Allow-Methods")
            .is_none());
    }

    #[test]
    fn test_json_response() {
        let body = serde_json::json!({"status": "ok"});
        let resp = build_json_response(StatusCode::OK, &body, false);
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers()["Content-Type"],
            "application/json; charset=utf-8"
        );
    }
}
