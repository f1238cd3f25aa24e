// Configuration module entry point
// Manages application configuration and runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{CdnConfig, Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig};

impl Config {
    /// Load configuration from the default "config.toml" location
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the specified file path (without extension),
    /// merged with `CDN`-prefixed environment variables and built-in
    /// defaults. The file is optional; the defaults alone describe a
    /// working server on port 3000.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let defaults = CdnConfig::default();
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("CDN").separator("__"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("cdn.public_dir", defaults.public_dir)?
            .set_default("cdn.no_store_prefixes", defaults.no_store_prefixes)?
            .set_default("cdn.long_cache_prefixes", defaults.long_cache_prefixes)?
            .set_default("cdn.long_cache_max_age", i64::from(defaults.long_cache_max_age))?
            .set_default("http.enable_cors", true)?
            .set_default("http.max_body_size", 10_485_760)? // 10MB
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "dev")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_config_file() {
        let cfg = Config::load_from("no_such_config_file").unwrap();
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.cdn.public_dir, "public");
        assert_eq!(cfg.cdn.long_cache_max_age, 2_592_000);
        assert_eq!(cfg.cdn.no_store_prefixes, vec!["/cdn_manifest"]);
        assert_eq!(cfg.cdn.long_cache_prefixes.len(), 4);
        assert!(cfg.http.enable_cors);
        assert_eq!(cfg.logging.access_log_format, "dev");
    }

    #[test]
    fn test_socket_addr() {
        let cfg = Config::load_from("no_such_config_file").unwrap();
        let addr = cfg.socket_addr().unwrap();
        assert_eq!(addr.port(), 3000);
    }
}
