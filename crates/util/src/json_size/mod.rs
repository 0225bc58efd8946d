//! JSON size calculation utilities.
//!
//! Computes the size of JSON values as they would be written by
//! `serde_json::to_string`, without allocating the serialized text.

mod json;

pub use json::{json_size, json_size_all};
