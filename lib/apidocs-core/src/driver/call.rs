use std::sync::LazyLock;

use http::Method;
use indexmap::IndexMap;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::{Captures, Regex};
use tracing::warn;

use super::DriverRequest;
use crate::Value;

/// Regular expression for matching path placeholders in the format `:param_name`.
static RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":(?<name>\w+)").expect("a valid regex"));

/// Characters kept verbatim in a substituted path segment (RFC 3986 unreserved).
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

fn encode_path_param_value(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// A test call to document.
///
/// The path is a template where `:name` placeholders are filled from the params with
/// the same name. Params used by the path are not sent again as request params, but
/// the documented example keeps the template and all params.
///
/// # Example
///
/// ```rust
/// use apidocs_core::ApiCall;
///
/// let call = ApiCall::get("/users/:id/posts")
///     .with_param("id", 12345)
///     .with_param("page", 2)
///     .with_header("Accept", "application/json");
///
/// let request = call.to_request();
/// assert_eq!(request.path, "/users/12345/posts");
/// assert_eq!(call.path_template(), "/users/:id/posts");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiCall {
    method: Method,
    path: String,
    params: IndexMap<String, Value>,
    headers: IndexMap<String, String>,
}

impl ApiCall {
    /// Creates a call with the given method and path template.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: IndexMap::new(),
            headers: IndexMap::new(),
        }
    }

    /// Creates a `GET` call.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Creates a `POST` call.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Creates a `PUT` call.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Creates a `PATCH` call.
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// Creates a `DELETE` call.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Adds a request param, replacing any previous value with the same name.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Adds several request params.
    pub fn with_params<K, V>(mut self, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.params.extend(
            params
                .into_iter()
                .map(|(name, value)| (name.into(), value.into())),
        );
        self
    }

    /// Adds a request header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The path template, placeholders included.
    pub fn path_template(&self) -> &str {
        &self.path
    }

    /// All params as a mapping, path params included.
    pub fn params(&self) -> Value {
        Value::Mapping(self.params.clone())
    }

    /// The request headers.
    pub fn headers(&self) -> &IndexMap<String, String> {
        &self.headers
    }

    /// Resolves the path template into the request handed to the driver.
    ///
    /// Placeholders without a matching param are left untouched.
    pub fn to_request(&self) -> DriverRequest {
        let mut remaining = self.params.clone();
        let mut unresolved = Vec::new();

        let path = RE.replace_all(&self.path, |captures: &Captures| {
            let placeholder = captures.get(0).map_or("", |found| found.as_str());
            let name = captures.name("name").map_or("", |found| found.as_str());
            match self.params.get(name) {
                Some(value) => {
                    remaining.shift_remove(name);
                    encode_path_param_value(&value.scalar_string())
                }
                None => {
                    unresolved.push(name.to_string());
                    placeholder.to_string()
                }
            }
        });

        if !unresolved.is_empty() {
            warn!(path = %self.path, ?unresolved, "path placeholders without a matching param");
        }

        DriverRequest {
            method: self.method.clone(),
            path: path.into_owned(),
            params: Value::Mapping(remaining),
            headers: self.headers.clone(),
        }
    }
}
