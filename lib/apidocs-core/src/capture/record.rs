use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use super::value::{Value, write_canonical_mapping};
use crate::driver::{ApiCall, DriverOutput, RouteMeta};

/// Free-form annotations attached to a capture by the test.
///
/// Annotations take part in the fingerprint: the same call documented with two
/// different descriptions yields two examples.
///
/// # Example
///
/// ```rust
/// use apidocs_core::Meta;
///
/// let mut meta = Meta::default();
/// meta.describe("Fetch a single user");
/// meta.set("since", "1.2");
///
/// assert_eq!(meta.len(), 2);
/// ```
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Deref,
    derive_more::DerefMut,
)]
#[serde(transparent)]
pub struct Meta(IndexMap<String, Value>);

impl Meta {
    /// Sets an annotation, replacing any previous value for the same key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Sets the `description` annotation.
    pub fn describe(&mut self, description: impl Into<String>) {
        self.set("description", description.into());
    }

    pub(crate) fn write_canonical(&self, out: &mut String) {
        write_canonical_mapping(&self.0, out);
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Meta {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// One documented example of an endpoint being exercised.
///
/// Every field has a default so that partial driver output, or a persisted entry
/// missing some keys, still yields a complete record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureRecord {
    /// Uppercase HTTP verb.
    pub method: String,
    /// Path template as written in the test (placeholders are kept).
    pub path: String,
    /// Request headers sent by the test.
    #[serde(deserialize_with = "deserialize_headers")]
    pub headers: IndexMap<String, String>,
    /// Sanitized request parameters.
    pub params: Value,
    /// Response status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
    /// Annotations supplied by the test.
    pub meta: Meta,
    /// Endpoint group, e.g. `admin/users`.
    pub controller: String,
    /// Endpoint within the group, e.g. `show`.
    pub action: String,
}

impl CaptureRecord {
    /// Assembles a record from a call, its output, the resolved route, annotations and
    /// already sanitized params.
    pub fn build(
        call: &ApiCall,
        output: &DriverOutput,
        route: RouteMeta,
        meta: Meta,
        params: Value,
    ) -> Self {
        let RouteMeta { controller, action } = route;
        Self {
            method: call.method().as_str().to_ascii_uppercase(),
            path: call.path_template().to_string(),
            headers: call.headers().clone(),
            params,
            status: output.status.as_u16(),
            body: output.body.clone(),
            meta,
            controller,
            action,
        }
    }
}

// Hand-edited files may hold non-string header values
fn deserialize_headers<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<IndexMap<String, String>, D::Error> {
    let headers = Option::<IndexMap<String, Value>>::deserialize(deserializer)?;
    Ok(headers
        .unwrap_or_default()
        .into_iter()
        .map(|(name, value)| (name, value.scalar_string()))
        .collect())
}

#[cfg(test)]
mod tests {
    use http::StatusCode;

    use super::*;
    use crate::sanitize;

    #[test]
    fn should_build_record_from_call() {
        let call = ApiCall::get("/users/:id")
            .with_param("id", 123)
            .with_header("Accept", "application/json");
        let output = DriverOutput::new(StatusCode::OK, r#"{"id":123}"#);
        let mut meta = Meta::default();
        meta.describe("Fetch a user");

        let record = CaptureRecord::build(
            &call,
            &output,
            RouteMeta::new("users", "show"),
            meta,
            sanitize(&call.params()),
        );

        assert_eq!(record.method, "GET");
        assert_eq!(record.path, "/users/:id");
        assert_eq!(record.params, Value::mapping([("id", "123")]));
        assert_eq!(record.status, 200);
        assert_eq!(record.body, r#"{"id":123}"#);
        assert_eq!(record.controller, "users");
        assert_eq!(record.action, "show");
        assert_eq!(
            record.headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(
            record.meta.get("description"),
            Some(&Value::from("Fetch a user"))
        );
    }

    #[test]
    fn should_default_missing_fields() {
        let record: CaptureRecord =
            serde_json::from_str(r#"{"method":"GET","status":204}"#).expect("should deserialize");

        assert_eq!(record.method, "GET");
        assert_eq!(record.status, 204);
        assert_eq!(record.path, "");
        assert_eq!(record.body, "");
        assert!(record.headers.is_empty());
        assert!(record.meta.is_empty());
        assert_eq!(record.params, Value::default());
    }

    #[test]
    fn should_coerce_header_values() {
        let record: CaptureRecord =
            serde_json::from_str(r#"{"headers":{"X-Retry":3,"X-Flag":true}}"#)
                .expect("should deserialize");

        assert_eq!(record.headers.get("X-Retry").map(String::as_str), Some("3"));
        assert_eq!(record.headers.get("X-Flag").map(String::as_str), Some("true"));
    }

    #[test]
    fn should_collect_meta() {
        let meta: Meta = [("description", "List users"), ("group", "admin")]
            .into_iter()
            .collect();

        let mut out = String::new();
        meta.write_canonical(&mut out);

        assert_eq!(out, r#"{"description":"List users","group":"admin"}"#);
    }
}
