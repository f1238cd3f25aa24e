// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub cdn: CdnConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// CDN content and cache policy configuration
///
/// Everything here is read once at startup; the derived rule tables never
/// change afterwards.
#[derive(Debug, Deserialize, Clone)]
pub struct CdnConfig {
    /// Content root directory (addressables/, maps/, ui/, audio/,
    /// cdn_manifest.json live under it)
    pub public_dir: String,
    /// Path prefixes that must never be cached (the manifest family)
    pub no_store_prefixes: Vec<String>,
    /// Path prefixes of versioned asset trees eligible for long-lived caching
    pub long_cache_prefixes: Vec<String>,
    /// max-age in seconds for long-lived caching (30 days)
    pub long_cache_max_age: u32,
}

impl Default for CdnConfig {
    fn default() -> Self {
        Self {
            public_dir: "public".to_string(),
            no_store_prefixes: vec!["/cdn_manifest".to_string()],
            long_cache_prefixes: vec![
                "/addressables/".to_string(),
                "/maps/".to_string(),
                "/ui/".to_string(),
                "/audio/".to_string(),
            ],
            long_cache_max_age: 2_592_000,
        }
    }
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub enable_cors: bool,
    pub max_body_size: u64,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (dev, common, combined, or json)
    pub access_log_format: String,
    /// Access log file path (stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}
