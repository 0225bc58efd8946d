//! Ancestor path matching.

/// Check if `path` ends with `suffix`, element for element.
///
/// Comparison is exact and case-sensitive. A suffix longer than the path
/// never matches; an empty suffix matches every path.
///
/// # Example
///
/// ```
/// use json_omit::path_ends_with;
///
/// assert!(path_ends_with(&["x", "a", "b"], &["a", "b"]));
/// assert!(path_ends_with(&["x"], &[] as &[&str]));
/// assert!(!path_ends_with(&["a", "b"], &["a"]));
/// assert!(!path_ends_with(&["b"], &["a", "b"]));
/// ```
pub fn path_ends_with<P, S>(path: &[P], suffix: &[S]) -> bool
where
    P: AsRef<str>,
    S: AsRef<str>,
{
    if suffix.len() > path.len() {
        return false;
    }
    let offset = path.len() - suffix.len();
    path[offset..]
        .iter()
        .zip(suffix)
        .all(|(step, expected)| step.as_ref() == expected.as_ref())
}
