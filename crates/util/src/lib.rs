//! json-omit-util - JSON value helpers for json-omit
//!
//! Small predicates and measurements over `serde_json::Value` shared by the
//! pruning transform and the size report.

pub mod is_empty;
pub mod json_size;

// Re-exports for convenience
pub use is_empty::is_empty_container;
pub use json_size::{json_size, json_size_all};
