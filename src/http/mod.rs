//! HTTP protocol layer module
//!
//! Protocol-level building blocks shared by the request handler: cache
//! policy classification, content-type resolution, range parsing, and
//! response builders.

pub mod cache;
pub mod mime;
pub mod range;
pub mod response;

// Re-export commonly used items
pub use cache::{CachePolicy, CacheRules};
pub use range::{resolve_range, RangeOutcome};
pub use response::{
    build_200_response, build_206_response, build_304_response, build_404_response,
    build_405_response, build_413_response, build_416_response, build_json_response,
    build_preflight_response,
};
