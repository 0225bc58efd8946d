//! Recursive key omission for JSON values.
//!
//! Given a JSON value and a list of key specifiers, produce a copy with the
//! matching keys removed and every mapping or sequence left empty pruned
//! away, all the way up to the root.
//!
//! Specifiers come in two forms:
//! - a plain key (`"mimes"`) is removed from every mapping at any depth;
//! - a dotted path (`"user.ext"`, `"p.q.r"`) removes its last segment from
//!   mappings whose ancestor keys end with the preceding segments. Matching
//!   is against the trailing keys only, so `"user.ext"` also applies to
//!   `{"imp": {"user": {"ext": ..}}}`. Sequences do not contribute keys.
//!
//! # Example
//!
//! ```
//! use json_omit::deep_omit;
//! use serde_json::json;
//!
//! let doc = json!({
//!     "id": "a1",
//!     "sizes": [[300, 250]],
//!     "user": {"ext": {"eids": []}, "id": "u"},
//!     "imp": [{"mimes": ["video/mp4"]}],
//! });
//! let out = deep_omit(&doc, &["sizes", "mimes", "user.ext"]).unwrap();
//! assert_eq!(out, json!({"id": "a1", "user": {"id": "u"}}));
//! ```
//!
//! # Preconditions
//!
//! Recursion depth follows the nesting depth of the input. Values parsed by
//! `serde_json` are limited to 128 levels; hand-built values nested deeply
//! enough to exhaust the stack are not supported.

pub mod path;
pub mod prune;
pub mod report;
pub mod spec;

pub use path::path_ends_with;
pub use spec::{parse_specifier, OmitSpec, PathRule, Specifier, SpecifierError, SEGMENT_DELIMITER};

use serde_json::Value;

/// Classify `specifiers` and return a pruned copy of `value`.
///
/// An input that prunes down to nothing yields an empty object.
///
/// # Errors
///
/// Returns [`SpecifierError`] if any specifier is empty or has an empty
/// segment (`"a..b"`, `".a"`, `"a."`).
pub fn deep_omit<S: AsRef<str>>(value: &Value, specifiers: &[S]) -> Result<Value, SpecifierError> {
    Ok(OmitSpec::new(specifiers)?.apply(value))
}
