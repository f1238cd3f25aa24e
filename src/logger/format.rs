//! Access log format module
//!
//! Supported formats:
//! - `dev` (concise per-request line, the default)
//! - `common` (Common Log Format - CLF)
//! - `combined` (Apache/Nginx combined format)
//! - `json` (structured, one object per line)

use chrono::Local;

/// Access log entry containing all request/response information
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    /// Client address
    pub remote_addr: String,
    /// Request timestamp
    pub time: chrono::DateTime<Local>,
    /// HTTP method (GET, HEAD, ...)
    pub method: String,
    /// Request URI path
    pub path: String,
    /// Query string (without leading ?)
    pub query: Option<String>,
    /// HTTP version (1.0, 1.1, 2)
    pub http_version: String,
    /// Response status code
    pub status: u16,
    /// Response body size in bytes
    pub body_bytes: usize,
    /// Referer header
    pub referer: Option<String>,
    /// User-Agent header
    pub user_agent: Option<String>,
    /// Request processing time in microseconds
    pub duration_us: u64,
}

impl AccessLogEntry {
    /// Create a new access log entry with the current timestamp
    pub fn new(remote_addr: String, method: String, path: String) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            method,
            path,
            query: None,
            http_version: "1.1".to_string(),
            status: 200,
            body_bytes: 0,
            referer: None,
            user_agent: None,
            duration_us: 0,
        }
    }

    /// Format the entry according to the configured format name.
    /// Unknown names fall back to `dev`.
    pub fn format(&self, format: &str) -> String {
        match format {
            "common" => self.format_common(),
            "combined" => self.format_combined(),
            "json" => self.format_json(),
            _ => self.format_dev(),
        }
    }

    fn request_uri(&self) -> String {
        match &self.query {
            Some(q) => format!("{}?{}", self.path, q),
            None => self.path.clone(),
        }
    }

    /// Concise development format:
    /// `GET /cdn_manifest.json 200 1.234 ms - 120`
    fn format_dev(&self) -> String {
        #[allow(clippy::cast_precision_loss)]
        let millis = self.duration_us as f64 / 1_000.0;
        format!(
            "{} {} {} {:.3} ms - {}",
            self.method,
            self.request_uri(),
            self.status,
            millis,
            self.body_bytes,
        )
    }

    /// Common Log Format (CLF):
    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent`
    fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{} {} HTTP/{}\" {} {}",
            self.remote_addr,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.method,
            self.request_uri(),
            self.http_version,
            self.status,
            self.body_bytes,
        )
    }

    /// Combined format: CLF plus referer and user agent
    fn format_combined(&self) -> String {
        format!(
            "{} \"{}\" \"{}\"",
            self.format_common(),
            self.referer.as_deref().unwrap_or("-"),
            self.user_agent.as_deref().unwrap_or("-"),
        )
    }

    /// Structured JSON, one object per line
    fn format_json(&self) -> String {
        serde_json::json!({
            "remote_addr": self.remote_addr,
            "time": self.time.to_rfc3339(),
            "method": self.method,
            "path": self.path,
            "query": self.query,
            "http_version": self.http_version,
            "status": self.status,
            "body_bytes": self.body_bytes,
            "referer": self.referer,
            "user_agent": self.user_agent,
            "duration_us": self.duration_us,
        })
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> AccessLogEntry {
        let mut entry = AccessLogEntry::new(
            "10.0.0.7:51234".to_string(),
            "GET".to_string(),
            "/addressables/standalone/v0.1.0/catalog.json".to_string(),
        );
        entry.status = 200;
        entry.body_bytes = 4321;
        entry.referer = Some("https://game.example".to_string());
        entry.user_agent = Some("UnityPlayer/2022.3".to_string());
        entry.duration_us = 1500;
        entry
    }

    #[test]
    fn test_dev_format() {
        let log = entry().format("dev");
        assert!(log.starts_with("GET /addressables/"));
        assert!(log.contains("200"));
        assert!(log.contains("ms - 4321"));
    }

    #[test]
    fn test_unknown_format_falls_back_to_dev() {
        assert_eq!(entry().format("dev"), entry().format("whatever"));
    }

    #[test]
    fn test_common_format() {
        let log = entry().format("common");
        assert!(log.contains("10.0.0.7:51234"));
        assert!(log.contains("\"GET /addressables/standalone/v0.1.0/catalog.json HTTP/1.1\""));
        assert!(log.contains("200 4321"));
        assert!(!log.contains("UnityPlayer"));
    }

    #[test]
    fn test_combined_format() {
        let log = entry().format("combined");
        assert!(log.contains("\"https://game.example\""));
        assert!(log.contains("\"UnityPlayer/2022.3\""));
    }

    #[test]
    fn test_json_format() {
        let log = entry().format("json");
        let parsed: serde_json::Value = serde_json::from_str(&log).unwrap();
        assert_eq!(parsed["status"], 200);
        assert_eq!(parsed["body_bytes"], 4321);
        assert_eq!(parsed["query"], serde_json::Value::Null);
    }

    #[test]
    fn test_query_appended_to_request_uri() {
        let mut e = entry();
        e.query = Some("ver=2".to_string());
        assert!(e.format("common").contains("catalog.json?ver=2"));
    }
}
