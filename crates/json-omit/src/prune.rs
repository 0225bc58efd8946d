//! The recursive pruning transform.

use json_omit_util::is_empty_container;
use serde_json::{Map, Value};

use crate::spec::OmitSpec;

impl OmitSpec {
    /// Return a pruned copy of `value`.
    ///
    /// Matching keys are removed, then every mapping or sequence left
    /// without members is dropped from its parent. If nothing survives the
    /// result is an empty object. The input is not modified.
    ///
    /// # Example
    ///
    /// ```
    /// use json_omit::OmitSpec;
    /// use serde_json::json;
    ///
    /// let spec = OmitSpec::new(["k", "a.b"]).unwrap();
    /// let doc = json!({"list": [{"k": 1, "keep": 2}, {"k": 1}], "x": {"a": {"b": 1, "c": 2}}});
    /// assert_eq!(spec.apply(&doc), json!({"list": [{"keep": 2}], "x": {"a": {"c": 2}}}));
    ///
    /// let only = OmitSpec::new(["only.nested"]).unwrap();
    /// assert_eq!(only.apply(&json!({"only": {"nested": "x"}})), json!({}));
    /// ```
    pub fn apply(&self, value: &Value) -> Value {
        self.prune(value).unwrap_or_else(|| Value::Object(Map::new()))
    }

    /// Like [`OmitSpec::apply`], but returns `None` when the whole value
    /// collapses instead of substituting an empty object.
    ///
    /// Scalars are never collapsed, so `None` only comes back for containers.
    pub fn prune(&self, value: &Value) -> Option<Value> {
        let mut path = Vec::new();
        self.prune_at(value, &mut path)
    }

    /// `path` holds the keys from the root down to the mapping that owns
    /// `value`. Array elements share their array's path.
    fn prune_at<'v>(&self, value: &'v Value, path: &mut Vec<&'v str>) -> Option<Value> {
        let pruned = match value {
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .filter_map(|item| self.prune_at(item, path))
                    .collect(),
            ),
            Value::Object(map) => {
                let mut out = Map::with_capacity(map.len());
                for (key, child) in map {
                    if self.should_omit(path.as_slice(), key) {
                        continue;
                    }
                    path.push(key);
                    let child = self.prune_at(child, path);
                    path.pop();
                    if let Some(child) = child {
                        out.insert(key.clone(), child);
                    }
                }
                Value::Object(out)
            }
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                return Some(value.clone());
            }
        };
        (!is_empty_container(&pruned)).then_some(pruned)
    }
}
