use serde_json::Value;

/// Check if a value is a container with no members.
///
/// Empty objects and empty arrays are the leftovers the pruner collapses.
/// Scalars (including `null`, `""` and `0`) are never empty containers.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use json_omit_util::is_empty::is_empty_container;
///
/// assert!(is_empty_container(&json!({})));
/// assert!(is_empty_container(&json!([])));
/// assert!(!is_empty_container(&json!(null)));
/// assert!(!is_empty_container(&json!({"a": {}})));
/// ```
pub fn is_empty_container(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.is_empty(),
        Value::Array(arr) => arr.is_empty(),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => false,
    }
}
