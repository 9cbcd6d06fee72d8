use serde::{Deserialize, Serialize};

use super::record::{CaptureRecord, Meta};
use super::value::Value;

/// Prefix of every derived fingerprint.
pub const FINGERPRINT_PREFIX: &str = "ID-";

/// Stable identity of a documented exchange.
///
/// Derived from the method, path, annotation metadata, sanitized params and status of a
/// capture. Headers and body are not part of it, so re-running a test refreshes the
/// stored example instead of adding a new one.
///
/// # Example
///
/// ```rust
/// use apidocs_core::{Fingerprint, Meta, Value};
///
/// let fingerprint = Fingerprint::derive("GET", "/users/123", &Meta::default(), &Value::default(), 200);
///
/// // md5("GET/users/123{}{}200")
/// assert_eq!(fingerprint.as_str(), "ID-c033f660d823374cbe76b7725ab6aa0e");
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
#[display("{_0}")]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Derives the fingerprint of an exchange.
    ///
    /// The five fields are concatenated in a fixed order (method, path, meta, params,
    /// status) using the canonical text of `meta` and `params`, then hashed with MD5.
    pub fn derive(method: &str, path: &str, meta: &Meta, params: &Value, status: u16) -> Self {
        let mut buffer = String::with_capacity(method.len() + path.len() + 64);
        buffer.push_str(method);
        buffer.push_str(path);
        meta.write_canonical(&mut buffer);
        params.write_canonical(&mut buffer);
        buffer.push_str(&status.to_string());

        let digest = md5::compute(buffer.as_bytes());
        Self(format!("{FINGERPRINT_PREFIX}{digest:x}"))
    }

    /// Derives the fingerprint of a capture record.
    pub fn of(record: &CaptureRecord) -> Self {
        Self::derive(
            &record.method,
            &record.path,
            &record.meta,
            &record.params,
            record.status,
        )
    }

    /// The fingerprint text, `ID-` followed by a hex digest.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Fingerprint {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Fingerprint {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn base() -> CaptureRecord {
        CaptureRecord {
            method: "GET".to_string(),
            path: "/users/:id".to_string(),
            params: Value::mapping([("id", "123")]),
            status: 200,
            body: r#"{"id":123}"#.to_string(),
            controller: "users".to_string(),
            action: "show".to_string(),
            ..CaptureRecord::default()
        }
    }

    #[test]
    fn should_match_known_digest() {
        let fingerprint =
            Fingerprint::derive("GET", "/users/123", &Meta::default(), &Value::default(), 200);

        insta::assert_snapshot!(fingerprint, @"ID-c033f660d823374cbe76b7725ab6aa0e");
    }

    #[test]
    fn should_be_deterministic() {
        let record = base();

        assert_eq!(Fingerprint::of(&record), Fingerprint::of(&record.clone()));
    }

    #[test]
    fn should_ignore_param_key_order() {
        let mut first = base();
        first.params = Value::mapping([("a", "1"), ("b", "2")]);
        let mut second = base();
        second.params = Value::mapping([("b", "2"), ("a", "1")]);

        assert_eq!(Fingerprint::of(&first), Fingerprint::of(&second));
    }

    #[rstest]
    #[case::method(|record: &mut CaptureRecord| record.method = "POST".to_string())]
    #[case::path(|record: &mut CaptureRecord| record.path = "/users/:user_id".to_string())]
    #[case::meta(|record: &mut CaptureRecord| record.meta.describe("Fetch a user"))]
    #[case::params(|record: &mut CaptureRecord| record.params = Value::mapping([("id", "124")]))]
    #[case::status(|record: &mut CaptureRecord| record.status = 404)]
    fn should_change_with_identity_fields(#[case] change: fn(&mut CaptureRecord)) {
        let original = base();
        let mut changed = base();
        change(&mut changed);

        assert_ne!(Fingerprint::of(&original), Fingerprint::of(&changed));
    }

    #[rstest]
    #[case::headers(|record: &mut CaptureRecord| {
        record.headers.insert("Accept".to_string(), "application/json".to_string());
    })]
    #[case::body(|record: &mut CaptureRecord| record.body = r#"{"id":123,"name":"Ada"}"#.to_string())]
    #[case::route(|record: &mut CaptureRecord| record.action = "fetch".to_string())]
    fn should_not_change_with_other_fields(#[case] change: fn(&mut CaptureRecord)) {
        let original = base();
        let mut changed = base();
        change(&mut changed);

        assert_eq!(Fingerprint::of(&original), Fingerprint::of(&changed));
    }

    #[test]
    fn should_hash_fields_in_fixed_order_without_separator() {
        let mut meta = Meta::default();
        meta.describe("Fetch a user");
        let params = Value::mapping([("id", "123")]);

        let fingerprint = Fingerprint::derive("GET", "/users/:id", &meta, &params, 200);

        let buffer = r#"GET/users/:id{"description":"Fetch a user"}{"id":"123"}200"#;
        assert_eq!(
            fingerprint.as_str(),
            format!("ID-{:x}", md5::compute(buffer))
        );
    }
}
