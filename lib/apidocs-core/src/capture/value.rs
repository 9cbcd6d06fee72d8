use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

/// Sentinel written in place of binary upload content.
pub const BINARY_SENTINEL: &str = "BINARY";

/// A file attached to a request, e.g. a multipart upload.
///
/// The content is forwarded to the test driver but never documented:
/// sanitization replaces it with [`BINARY_SENTINEL`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinaryUpload {
    /// Original file name.
    pub file_name: String,
    /// MIME type of the content.
    pub content_type: String,
    /// Raw content.
    pub data: Vec<u8>,
}

impl BinaryUpload {
    /// Creates an upload from a file name, a content type and its bytes.
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }
}

/// A nested request parameter or annotation value.
///
/// Mappings keep their insertion order. The variants mirror what a test can send to an
/// endpoint: scalars, sequences, mappings and binary uploads.
///
/// # Example
///
/// ```rust
/// use apidocs_core::Value;
///
/// let params = Value::mapping([
///     ("name", Value::from("Ada")),
///     ("tags", Value::sequence(["admin", "staff"])),
///     ("age", Value::from(36)),
/// ]);
///
/// assert_eq!(params.canonical(), r#"{"age":36,"name":"Ada","tags":["admin","staff"]}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// No value.
    Null,
    /// A boolean.
    Bool(bool),
    /// An integer or floating point number.
    Number(serde_json::Number),
    /// A string.
    Text(String),
    /// A binary upload marker.
    Binary(BinaryUpload),
    /// An ordered sequence of values.
    Sequence(Vec<Value>),
    /// An ordered, string-keyed mapping.
    Mapping(IndexMap<String, Value>),
}

/// An empty mapping.
impl Default for Value {
    fn default() -> Self {
        Self::Mapping(IndexMap::new())
    }
}

impl Value {
    /// Builds a mapping, coercing every key to a string.
    pub fn mapping<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: ToString,
        V: Into<Value>,
    {
        Self::Mapping(
            entries
                .into_iter()
                .map(|(key, value)| (key.to_string(), value.into()))
                .collect(),
        )
    }

    /// Builds a sequence.
    pub fn sequence<V: Into<Value>>(items: impl IntoIterator<Item = V>) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// Returns the entries when this value is a mapping.
    pub fn as_mapping(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Self::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Returns the string when this value is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// String form used when a value ends up in a path, a key, or a sanitized param.
    ///
    /// `Null` renders as an empty string; sequences and mappings use their canonical form.
    pub fn scalar_string(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(value) => value.to_string(),
            Self::Number(number) => number.to_string(),
            Self::Text(text) => text.clone(),
            Self::Binary(_) => BINARY_SENTINEL.to_string(),
            Self::Sequence(_) | Self::Mapping(_) => self.canonical(),
        }
    }

    /// Canonical, order-independent text of this value.
    ///
    /// Compact JSON with mapping keys sorted. Two values that only differ by the
    /// insertion order of their mapping keys share the same canonical form.
    pub fn canonical(&self) -> String {
        let mut out = String::new();
        self.write_canonical(&mut out);
        out
    }

    pub(crate) fn write_canonical(&self, out: &mut String) {
        match self {
            Self::Null => out.push_str("null"),
            Self::Bool(value) => out.push_str(if *value { "true" } else { "false" }),
            Self::Number(number) => out.push_str(&number.to_string()),
            Self::Text(text) => push_quoted(out, text),
            Self::Binary(_) => push_quoted(out, BINARY_SENTINEL),
            Self::Sequence(items) => {
                out.push('[');
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        out.push(',');
                    }
                    item.write_canonical(out);
                }
                out.push(']');
            }
            Self::Mapping(entries) => write_canonical_mapping(entries, out),
        }
    }
}

pub(crate) fn write_canonical_mapping(entries: &IndexMap<String, Value>, out: &mut String) {
    let mut sorted: Vec<_> = entries.iter().collect();
    sorted.sort_by(|(left, _), (right, _)| left.cmp(right));

    out.push('{');
    for (index, (key, value)) in sorted.into_iter().enumerate() {
        if index > 0 {
            out.push(',');
        }
        push_quoted(out, key);
        out.push(':');
        value.write_canonical(out);
    }
    out.push('}');
}

fn push_quoted(out: &mut String, text: &str) {
    out.push_str(&serde_json::Value::from(text).to_string());
}

// Conversions

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! value_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::Number(serde_json::Number::from(value))
                }
            }
        )*
    };
}

value_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value).map_or_else(|| Self::Text(value.to_string()), Self::Number)
    }
}

impl From<BinaryUpload> for Value {
    fn from(value: BinaryUpload) -> Self {
        Self::Binary(value)
    }
}

impl<V: Into<Value>> From<Vec<V>> for Value {
    fn from(value: Vec<V>) -> Self {
        Self::sequence(value)
    }
}

impl<V: Into<Value>> From<Option<V>> for Value {
    fn from(value: Option<V>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(value: IndexMap<String, Value>) -> Self {
        Self::Mapping(value)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(value) => Self::Bool(value),
            serde_json::Value::Number(number) => Self::Number(number),
            serde_json::Value::String(text) => Self::Text(text),
            serde_json::Value::Array(items) => Self::sequence(items),
            serde_json::Value::Object(entries) => Self::mapping(entries),
        }
    }
}

// Serde

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Number(number) => number.serialize(serializer),
            Self::Text(text) => serializer.serialize_str(text),
            Self::Binary(_) => serializer.serialize_str(BINARY_SENTINEL),
            Self::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Mapping(entries) => entries.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a scalar, a sequence or a mapping")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Value, E> {
        Ok(Value::Bool(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Value, E> {
        Ok(Value::from(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Value, E> {
        Ok(Value::from(value))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Value, E> {
        Ok(Value::from(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Value, E> {
        Ok(Value::from(value))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Value, E> {
        Ok(Value::Text(value))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or_default());
        while let Some(item) = seq.next_element::<Value>()? {
            items.push(item);
        }
        Ok(Value::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut entries = IndexMap::with_capacity(map.size_hint().unwrap_or_default());
        while let Some((key, value)) = map.next_entry::<Value, Value>()? {
            entries.insert(key.scalar_string(), value);
        }
        Ok(Value::Mapping(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_mapping_with_string_keys() {
        let value = Value::mapping([(1, "one"), (2, "two")]);

        let keys: Vec<_> = value
            .as_mapping()
            .expect("a mapping")
            .keys()
            .cloned()
            .collect();
        assert_eq!(keys, vec!["1".to_string(), "2".to_string()]);
    }

    #[test]
    fn should_render_empty_mapping_canonically() {
        assert_eq!(Value::default().canonical(), "{}");
        assert_eq!(Value::Sequence(vec![]).canonical(), "[]");
    }

    #[test]
    fn should_sort_keys_in_canonical_form() {
        let first = Value::mapping([("b", 2), ("a", 1)]);
        let second = Value::mapping([("a", 1), ("b", 2)]);

        assert_eq!(first.canonical(), second.canonical());
        assert_eq!(first.canonical(), r#"{"a":1,"b":2}"#);
    }

    #[test]
    fn should_escape_text_in_canonical_form() {
        let value = Value::from("say \"hi\"\n");

        assert_eq!(value.canonical(), r#""say \"hi\"\n""#);
    }

    #[test]
    fn should_render_scalars_as_strings() {
        assert_eq!(Value::Null.scalar_string(), "");
        assert_eq!(Value::from(true).scalar_string(), "true");
        assert_eq!(Value::from(42).scalar_string(), "42");
        assert_eq!(Value::from(1.5).scalar_string(), "1.5");
        assert_eq!(
            Value::from(BinaryUpload::new("a.png", "image/png", vec![1, 2])).scalar_string(),
            "BINARY"
        );
    }

    #[test]
    fn should_keep_non_finite_floats_as_text() {
        assert_eq!(Value::from(f64::NAN), Value::Text("NaN".to_string()));
    }

    #[test]
    fn should_convert_from_json() {
        let value = Value::from(serde_json::json!({
            "name": "Ada",
            "tags": ["a", null],
            "admin": false,
        }));

        insta::assert_snapshot!(value.canonical(), @r#"{"admin":false,"name":"Ada","tags":["a",null]}"#);
    }

    #[test]
    fn should_serialize_binary_as_sentinel() {
        let value = Value::mapping([(
            "avatar",
            Value::from(BinaryUpload::new("a.png", "image/png", vec![0xff])),
        )]);

        let json = serde_json::to_string(&value).expect("should serialize");

        assert_eq!(json, r#"{"avatar":"BINARY"}"#);
    }

    #[test]
    fn should_deserialize_nested_values() {
        let value: Value =
            serde_json::from_str(r#"{"user":{"id":7,"roles":["admin"]},"active":true,"note":null}"#)
                .expect("should deserialize");

        let expected = Value::mapping([
            (
                "user",
                Value::mapping([
                    ("id", Value::from(7)),
                    ("roles", Value::sequence(["admin"])),
                ]),
            ),
            ("active", Value::from(true)),
            ("note", Value::Null),
        ]);
        assert_eq!(value, expected);
    }
}
