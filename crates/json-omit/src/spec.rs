//! Key specifiers and their classification.
//!
//! A specifier is either a plain key (`"mimes"`), removed wherever it
//! appears, or a dotted path (`"user.ext"`), whose last segment is removed
//! only from mappings reached through the preceding segments.

use std::collections::HashSet;

use thiserror::Error;
use tracing::debug;

use crate::path::path_ends_with;

/// Separator between segments of a dotted specifier.
pub const SEGMENT_DELIMITER: char = '.';

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpecifierError {
    #[error("key specifier is empty")]
    Empty,
    #[error("key specifier {specifier:?} has an empty segment at position {position}")]
    EmptySegment { specifier: String, position: usize },
}

/// A dotted specifier split into its ancestor suffix and terminal key.
///
/// `"p.q.r"` becomes `ancestors = ["p", "q"]`, `key = "r"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathRule {
    pub ancestors: Vec<String>,
    pub key: String,
}

impl PathRule {
    /// Check whether `key`, found in a mapping at `path`, is targeted by this rule.
    pub fn matches<P: AsRef<str>>(&self, path: &[P], key: &str) -> bool {
        self.key == key && path_ends_with(path, self.ancestors.as_slice())
    }
}

/// A single parsed specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Specifier {
    /// Matches a key name at any depth.
    Key(String),
    /// Matches a key under a specific chain of ancestors.
    Path(PathRule),
}

/// Parse one specifier, rejecting empty input and empty segments.
///
/// # Example
///
/// ```
/// use json_omit::{parse_specifier, PathRule, Specifier};
///
/// assert_eq!(parse_specifier("mimes").unwrap(), Specifier::Key("mimes".into()));
/// assert_eq!(
///     parse_specifier("site.ext").unwrap(),
///     Specifier::Path(PathRule { ancestors: vec!["site".into()], key: "ext".into() }),
/// );
/// assert!(parse_specifier("site.").is_err());
/// ```
pub fn parse_specifier(specifier: &str) -> Result<Specifier, SpecifierError> {
    if specifier.is_empty() {
        return Err(SpecifierError::Empty);
    }
    let mut segments: Vec<String> = Vec::new();
    for (position, segment) in specifier.split(SEGMENT_DELIMITER).enumerate() {
        if segment.is_empty() {
            return Err(SpecifierError::EmptySegment {
                specifier: specifier.to_string(),
                position,
            });
        }
        segments.push(segment.to_string());
    }
    match segments.pop() {
        Some(key) if segments.is_empty() => Ok(Specifier::Key(key)),
        Some(key) => Ok(Specifier::Path(PathRule {
            ancestors: segments,
            key,
        })),
        // split always yields at least one segment
        None => Err(SpecifierError::Empty),
    }
}

/// A classified, validated set of specifiers.
///
/// Build once with [`OmitSpec::new`] and apply to any number of values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OmitSpec {
    keys: HashSet<String>,
    rules: Vec<PathRule>,
}

impl OmitSpec {
    /// Classify `specifiers` into plain keys and path rules.
    ///
    /// Order is irrelevant and duplicates collapse.
    pub fn new<I, S>(specifiers: I) -> Result<Self, SpecifierError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut spec = OmitSpec::default();
        for specifier in specifiers {
            match parse_specifier(specifier.as_ref())? {
                Specifier::Key(key) => {
                    spec.keys.insert(key);
                }
                Specifier::Path(rule) => {
                    if !spec.rules.contains(&rule) {
                        spec.rules.push(rule);
                    }
                }
            }
        }
        debug!(
            keys = spec.keys.len(),
            paths = spec.rules.len(),
            empty = spec.is_empty(),
            "classified key specifiers"
        );
        Ok(spec)
    }

    /// Path rules removed under matching ancestors.
    pub fn rules(&self) -> &[PathRule] {
        &self.rules
    }

    /// True when no specifier was given. Applying an empty spec still
    /// prunes empty containers.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.rules.is_empty()
    }

    /// Decide whether `key` is removed from a mapping reached through `path`.
    pub fn should_omit<P: AsRef<str>>(&self, path: &[P], key: &str) -> bool {
        self.keys.contains(key) || self.rules.iter().any(|rule| rule.matches(path, key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_segment() {
        assert_eq!(parse_specifier("a").unwrap(), Specifier::Key("a".into()));
    }

    #[test]
    fn test_parse_multi_segment() {
        let spec = parse_specifier("p.q.r").unwrap();
        assert_eq!(
            spec,
            Specifier::Path(PathRule {
                ancestors: vec!["p".into(), "q".into()],
                key: "r".into(),
            })
        );
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(parse_specifier(""), Err(SpecifierError::Empty));
    }

    #[test]
    fn test_parse_rejects_empty_segments() {
        let cases = [(".a", 0), ("a.", 1), ("a..b", 1), (".", 0)];
        for (input, position) in cases {
            assert_eq!(
                parse_specifier(input),
                Err(SpecifierError::EmptySegment {
                    specifier: input.to_string(),
                    position,
                }),
                "{input}"
            );
        }
    }

    #[test]
    fn test_classify_and_dedupe() {
        let spec = OmitSpec::new(["a", "b.c", "a", "b.c", "x.y.z"]).unwrap();
        assert_eq!(spec, OmitSpec::new(["a", "b.c", "x.y.z"]).unwrap());
        assert_eq!(spec.rules().len(), 2);
        assert!(spec.should_omit(&["any"], "a"));
        assert!(!spec.is_empty());
    }

    #[test]
    fn test_classify_stops_at_first_error() {
        let err = OmitSpec::new(["ok", "bad..spec"]).unwrap_err();
        assert!(matches!(err, SpecifierError::EmptySegment { position: 1, .. }));
    }

    #[test]
    fn test_empty_spec() {
        let spec = OmitSpec::new(Vec::<String>::new()).unwrap();
        assert!(spec.is_empty());
        assert!(!spec.should_omit(&["a"], "b"));
    }

    #[test]
    fn test_spec_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<OmitSpec>();
    }

    #[test]
    fn test_should_omit() {
        let spec = OmitSpec::new(["k", "a.b", "p.q.r"]).unwrap();
        let root: &[&str] = &[];

        assert!(spec.should_omit(root, "k"));
        assert!(spec.should_omit(&["deep", "er"], "k"));

        assert!(spec.should_omit(&["a"], "b"));
        assert!(spec.should_omit(&["x", "a"], "b"));
        assert!(!spec.should_omit(&["a", "x"], "b"));
        assert!(!spec.should_omit(root, "b"));

        assert!(spec.should_omit(&["p", "q"], "r"));
        assert!(!spec.should_omit(&["z", "q"], "r"));
        assert!(!spec.should_omit(&["q"], "r"));
    }
}
