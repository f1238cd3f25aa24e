// Application state module
// Read-only runtime state derived from configuration at startup

use crate::http::cache::CacheRules;

use super::types::Config;

/// Application state shared across request handlers.
///
/// Nothing here mutates after startup, so concurrent requests read it
/// without any locking.
pub struct AppState {
    pub config: Config,
    /// Path classification rules compiled from the cdn config section
    pub cache_rules: CacheRules,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let cache_rules = CacheRules::from_config(&config.cdn);
        Self {
            config,
            cache_rules,
        }
    }
}
