//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, the info and
//! health endpoints, static file dispatch, and the response-policy layer
//! that stamps cache-control and CORS headers on every response.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_LENGTH};
use hyper::{Method, Request, Response, StatusCode, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub range_header: Option<String>,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();

    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(ToString::to_string);
    let version = req.version();
    let is_head = method == Method::HEAD;

    let referer = header_value(&req, "referer");
    let user_agent = header_value(&req, "user-agent");

    let ctx = RequestContext {
        path: &path,
        is_head,
        if_none_match: header_value(&req, "if-none-match"),
        range_header: header_value(&req, "range"),
    };

    let mut response = if let Some(resp) =
        check_http_method(&method, state.config.http.enable_cors)
    {
        resp
    } else if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
        resp
    } else {
        dispatch(&ctx, &state).await
    };

    // Response policy: cache headers by path classification, then CORS.
    // Runs for every response, mirroring middleware-before-handler ordering.
    state.cache_rules.classify(&path).apply(response.headers_mut());
    if state.config.http.enable_cors {
        response
            .headers_mut()
            .insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    }

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            remote_addr.to_string(),
            method.to_string(),
            path.clone(),
        );
        entry.query = query;
        entry.http_version = http_version_label(version).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = content_length_of(&response);
        entry.referer = referer;
        entry.user_agent = user_agent;
        entry.duration_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Dispatch a validated GET/HEAD request to the matching endpoint
async fn dispatch(ctx: &RequestContext<'_>, state: &Arc<AppState>) -> Response<Full<Bytes>> {
    // Healthcheck, always fast
    if ctx.path == "/health" {
        return http::build_json_response(StatusCode::OK, &health_payload(), ctx.is_head);
    }

    // Info endpoint for anyone hitting the base URL in a browser
    if ctx.path == "/" {
        return http::build_json_response(StatusCode::OK, &service_info(), ctx.is_head);
    }

    // Everything else comes from the content root
    static_files::serve(ctx, &state.config.cdn.public_dir).await
}

/// Check HTTP method; only GET/HEAD reach the dispatcher
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD => None,
        &Method::OPTIONS => Some(http::build_preflight_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Validate the declared Content-Length and return 413 if exceeded
fn check_body_size(
    req: &Request<hyper::body::Incoming>,
    max_body_size: u64,
) -> Option<Response<Full<Bytes>>> {
    let declared = req.headers().get(CONTENT_LENGTH)?.to_str().ok()?;
    match declared.parse::<u64>() {
        Ok(size) if size > max_body_size => {
            logger::log_warning(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            Some(http::build_413_response())
        }
        _ => None,
    }
}

fn health_payload() -> serde_json::Value {
    serde_json::json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "time": chrono::Utc::now().to_rfc3339(),
    })
}

fn service_info() -> serde_json::Value {
    serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "manifest": "/cdn_manifest.json",
        "examples": {
            "standalone_catalog": "/addressables/standalone/v0.1.0/catalog.json",
            "android_catalog": "/addressables/android/v0.1.0/catalog.json",
            "outpost9_map": "/maps/outpost9/outpost9_base_layout.png",
            "sample_audio": "/audio/sigma/sigma_log_01.mp3",
        },
    })
}

fn header_value(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn content_length_of(response: &Response<Full<Bytes>>) -> usize {
    response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

fn http_version_label(version: Version) -> &'static str {
    if version == Version::HTTP_11 {
        "1.1"
    } else if version == Version::HTTP_10 {
        "1.0"
    } else if version == Version::HTTP_2 {
        "2"
    } else if version == Version::HTTP_09 {
        "0.9"
    } else {
        "3"
    }
}
