//! YAML support using serde-saphyr.
//!
//! Documentation files are plain YAML so they can be reviewed in pull requests and
//! consumed by other tools.
//!
//! # Example
//!
//! ```rust
//! use apidocs_core::{DocumentStore, ToYaml};
//!
//! # fn main() -> Result<(), apidocs_core::YamlError> {
//! let store = DocumentStore::new();
//! let yaml = store.to_yaml()?;
//! println!("{yaml}");
//! # Ok(())
//! # }
//! ```

use std::fmt::Display;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Error type for YAML serialization operations.
pub type YamlError = serde_saphyr::ser_error::Error;

/// Extension trait for serializing types to YAML.
///
/// This trait is implemented for all types that implement [`Serialize`].
pub trait ToYaml: Serialize + Sized {
    /// Serializes this value to a YAML string.
    ///
    /// # Errors
    ///
    /// Returns a [`YamlError`] if serialization fails.
    fn to_yaml(&self) -> Result<String, YamlError> {
        serde_saphyr::to_string(self)
    }
}

impl<T: Serialize + Sized> ToYaml for T {}

/// Parses a YAML document.
pub(crate) fn from_yaml<T: DeserializeOwned>(input: &str) -> Result<T, impl Display> {
    serde_saphyr::from_str(input)
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;
    use crate::{CaptureRecord, DocumentStore, Fingerprint, Value};

    #[test]
    fn should_serialize_simple_struct_to_yaml() {
        #[derive(Serialize)]
        struct Config {
            name: String,
            version: u32,
        }

        let config = Config {
            name: "test".to_string(),
            version: 1,
        };

        let yaml = config.to_yaml().expect("should serialize to YAML");

        assert_snapshot!(yaml, @r"
        name: test
        version: 1
        ");
    }

    #[test]
    fn should_keep_string_params_as_strings() {
        let params = Value::mapping([("id", "123"), ("active", "true"), ("cursor", "")]);

        let yaml = params.to_yaml().expect("should serialize to YAML");
        let parsed: Value = match from_yaml(&yaml) {
            Ok(parsed) => parsed,
            Err(err) => panic!("should parse YAML: {err}"),
        };

        assert_eq!(parsed, params);
    }

    #[test]
    fn should_read_back_a_store() {
        let record = CaptureRecord {
            method: "GET".to_string(),
            path: "/users/:id".to_string(),
            params: Value::mapping([("id", "1")]),
            status: 200,
            body: r#"{"id":1}"#.to_string(),
            controller: "users".to_string(),
            action: "show".to_string(),
            ..CaptureRecord::default()
        };
        let mut store = DocumentStore::new();
        store.merge("show", Fingerprint::of(&record), record);

        let yaml = store.to_yaml().expect("should serialize to YAML");
        let parsed: DocumentStore = match from_yaml(&yaml) {
            Ok(parsed) => parsed,
            Err(err) => panic!("should parse YAML: {err}"),
        };

        assert_eq!(parsed, store);
    }

    #[test]
    fn should_reject_malformed_yaml() {
        let result = from_yaml::<DocumentStore>("show: [unclosed");

        assert!(result.is_err());
    }
}
