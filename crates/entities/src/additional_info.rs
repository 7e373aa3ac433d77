//! Helpers over the open-ended `additionalInfo` JSON container.
//!
//! A JSON `null` is treated the same as an absent container.

use serde_json::{Map, Value};

/// Normalize a container: JSON `null` becomes `None`.
pub fn normalize(info: Option<Value>) -> Option<Value> {
    info.filter(|v| !v.is_null())
}

/// Read a boolean flag. Missing container, missing key or non-boolean value yield `false`.
pub fn bool_flag(info: Option<&Value>, key: &str) -> bool {
    info.and_then(|v| v.get(key))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Read a string field.
pub fn text<'a>(info: Option<&'a Value>, key: &str) -> Option<&'a str> {
    info.and_then(|v| v.get(key)).and_then(Value::as_str)
}

/// Set `key` on the container, creating an empty object first when needed.
///
/// A non-object container is replaced by a fresh object.
pub fn set_field(info: &mut Option<Value>, key: impl Into<String>, value: impl Into<Value>) {
    if !matches!(info, Some(Value::Object(_))) {
        *info = Some(Value::Object(Map::new()));
    }
    if let Some(Value::Object(map)) = info {
        map.insert(key.into(), value.into());
    }
}
