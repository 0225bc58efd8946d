use serde_json::Value;

/// Computes the JSON-encoded size of a number.
fn number_size(n: &serde_json::Number) -> usize {
    // Display and the serializer share the same formatting
    n.to_string().len()
}

/// Computes the JSON-encoded size of a string including quotes and escape sequences.
fn string_size(s: &str) -> usize {
    let mut size = 2; // Opening and closing quotes

    for ch in s.chars() {
        match ch {
            // Short escape sequences: \b \t \n \f \r \" \\
            '\u{0008}' | '\t' | '\n' | '\u{000C}' | '\r' | '"' | '\\' => {
                size += 2;
            }
            // Remaining C0 controls are written as \u00XX
            c if (c as u32) < 0x20 => {
                size += 6;
            }
            c => {
                size += c.len_utf8();
            }
        }
    }

    size
}

/// Computes the exact JSON size as would be output from `serde_json::to_string()`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use json_omit_util::json_size::json_size;
///
/// assert_eq!(json_size(&json!(null)), 4);
/// assert_eq!(json_size(&json!(true)), 4);
/// assert_eq!(json_size(&json!(false)), 5);
/// assert_eq!(json_size(&json!("hello")), 7); // "hello"
/// assert_eq!(json_size(&json!(123)), 3);
/// ```
pub fn json_size(value: &Value) -> usize {
    match value {
        Value::Null => 4,
        Value::Bool(true) => 4,
        Value::Bool(false) => 5,
        Value::Number(n) => number_size(n),
        Value::String(s) => string_size(s),
        Value::Array(arr) => json_size_all(arr),
        Value::Object(obj) => {
            let mut size = 2; // { }
            for (i, (key, val)) in obj.iter().enumerate() {
                if i > 0 {
                    size += 1; // comma
                }
                size += string_size(key);
                size += 1; // colon
                size += json_size(val);
            }
            size
        }
    }
}

/// Computes the compact JSON size of a list of values written as one array.
///
/// This is the size of `serde_json::to_string(items)`, which lets callers
/// measure a batch without first wrapping it in a `Value::Array`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use json_omit_util::json_size::json_size_all;
///
/// assert_eq!(json_size_all(&[]), 2);
/// assert_eq!(json_size_all(&[json!(1), json!({"a": 2})]), 11); // [1,{"a":2}]
/// ```
pub fn json_size_all(items: &[Value]) -> usize {
    let mut size = 2; // [ ]
    for (i, elem) in items.iter().enumerate() {
        if i > 0 {
            size += 1; // comma
        }
        size += json_size(elem);
    }
    size
}
