//! Path lookup over the substitution data.
//!
//! Data is plain [`serde_json::Value`]. A missing value is `None`, which keeps
//! it distinct from a present `null`.

use serde_json::{Number, Value};

/// Looks up a dot separated `path` in `root`.
///
/// Only objects are descended into. Indexing into a string, number, array or
/// null yields `None`, never an error. Empty segments are treated as literal
/// (empty) keys.
///
/// # Example
/// ```
/// let data = serde_json::json!({ "user": { "name": "Ann" } });
/// assert_eq!(tmplcopy::lookup::get(&data, "user.name"), Some(&serde_json::json!("Ann")));
/// assert_eq!(tmplcopy::lookup::get(&data, "user.name.first"), None);
/// ```
pub fn get<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(root, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        _ => None,
    })
}

/// Returns the text spliced into output for `value`.
///
/// Strings are emitted verbatim, numbers without a trailing `.0` when they are
/// integral, and lists and objects as compact JSON.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if !n.is_i64() && !n.is_u64() && f.fract() == 0.0 && f.abs() < 1e21 => {
                if f == 0.0 {
                    "0".to_string()
                } else {
                    format!("{f:.0}")
                }
            }
            _ => n.to_string(),
        },
        Value::Array(_) | Value::Object(_) => normalize_numbers(value).to_string(),
        other => other.to_string(),
    }
}

/// Rewrites integral floats (`1.0`, `-0.0`) as integers, at any depth.
///
/// Serialized output then prints `1` rather than `1.0`, matching how the same
/// number is spliced on its own.
pub fn normalize_numbers(value: &Value) -> Value {
    match value {
        Value::Number(n) => integral_float(n).map_or_else(|| value.clone(), Value::from),
        Value::Array(items) => Value::Array(items.iter().map(normalize_numbers).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| (key.clone(), normalize_numbers(item)))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn integral_float(n: &Number) -> Option<i64> {
    if n.is_i64() || n.is_u64() {
        return None;
    }
    let f = n.as_f64()?;
    (f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64).then_some(f as i64)
}

/// True for the values a `@path@` token may splice: strings and numbers.
pub fn is_scalar_text(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_))
}
