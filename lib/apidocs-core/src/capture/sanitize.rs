//! Parameter normalization before documentation.

use super::value::{BINARY_SENTINEL, Value};

/// Normalizes request parameters into their documented form.
///
/// - mappings keep their key order, values are sanitized recursively
/// - sequences keep their order, items are sanitized recursively
/// - binary uploads become the `"BINARY"` sentinel
/// - every other scalar becomes its string representation (`Null` becomes `""`)
///
/// The result only contains mappings, sequences and text, so sanitizing twice yields
/// the same value.
///
/// # Example
///
/// ```rust
/// use apidocs_core::{BinaryUpload, Value, sanitize};
///
/// let params = Value::mapping([
///     ("id", Value::from(12)),
///     ("avatar", Value::from(BinaryUpload::new("me.png", "image/png", vec![0x89]))),
/// ]);
///
/// let clean = sanitize(&params);
/// assert_eq!(clean, Value::mapping([("id", "12"), ("avatar", "BINARY")]));
/// ```
pub fn sanitize(value: &Value) -> Value {
    match value {
        Value::Mapping(entries) => Value::Mapping(
            entries
                .iter()
                .map(|(key, value)| (key.clone(), sanitize(value)))
                .collect(),
        ),
        Value::Sequence(items) => Value::Sequence(items.iter().map(sanitize).collect()),
        Value::Binary(_) => Value::Text(BINARY_SENTINEL.to_string()),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::Text(_) => {
            Value::Text(value.scalar_string())
        }
    }
}
